use std::sync::Arc;

use crate::manager::BikeManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<BikeManager>,
}

impl AppState {
    pub fn new(manager: Arc<BikeManager>) -> Self {
        Self { manager }
    }
}
