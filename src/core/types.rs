use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bike category. Serialized by name; the numeric tags `0` (City) and
/// `1` (Mountain) are accepted on read as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BikeTypeRepr")]
pub enum BikeType {
    City,
    Mountain,
}

impl BikeType {
    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0 => Some(Self::City),
            1 => Some(Self::Mountain),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("city") {
            Some(Self::City)
        } else if name.eq_ignore_ascii_case("mountain") {
            Some(Self::Mountain)
        } else {
            None
        }
    }
}

impl fmt::Display for BikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BikeType::City => write!(f, "City"),
            BikeType::Mountain => write!(f, "Mountain"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BikeTypeRepr {
    Name(String),
    Tag(u64),
}

impl TryFrom<BikeTypeRepr> for BikeType {
    type Error = String;

    fn try_from(repr: BikeTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            BikeTypeRepr::Name(name) => BikeType::from_name(&name)
                .ok_or_else(|| format!("unknown bike type '{}'", name)),
            BikeTypeRepr::Tag(tag) => {
                BikeType::from_tag(tag).ok_or_else(|| format!("unknown bike type tag {}", tag))
            }
        }
    }
}

/// Create/update payload: every bike field except the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertBike {
    pub model: String,
    pub make: String,
    pub color: String,
    #[serde(rename = "type")]
    pub bike_type: BikeType,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    pub id: Uuid,
    pub model: String,
    pub make: String,
    pub color: String,
    #[serde(rename = "type")]
    pub bike_type: BikeType,
    pub size: f64,
}

impl Bike {
    /// Builds a bike with a freshly minted identity.
    pub fn create(payload: UpsertBike) -> Self {
        Self::with_id(Uuid::new_v4(), payload)
    }

    pub fn with_id(id: Uuid, payload: UpsertBike) -> Self {
        Self {
            id,
            model: payload.model,
            make: payload.make,
            color: payload.color,
            bike_type: payload.bike_type,
            size: payload.size,
        }
    }

    /// Replaces every field except `id`.
    pub fn apply(&mut self, payload: UpsertBike) {
        self.model = payload.model;
        self.make = payload.make;
        self.color = payload.color;
        self.bike_type = payload.bike_type;
        self.size = payload.size;
    }
}

/// The full ordered sequence of bikes backing one store.
///
/// A collection is loaded once per operation, mutated in memory and moved
/// into the store's overwrite call. Two collections loaded before either is
/// written are independent snapshots; whichever is written last wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    bikes: Vec<Bike>,
}

impl Collection {
    pub fn new(bikes: Vec<Bike>) -> Self {
        Self { bikes }
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bike> {
        self.bikes.iter()
    }

    pub fn as_slice(&self) -> &[Bike] {
        &self.bikes
    }

    pub fn push(&mut self, bike: Bike) {
        self.bikes.push(bike);
    }

    pub fn find(&self, id: Uuid) -> Option<&Bike> {
        self.bikes.iter().find(|bike| bike.id == id)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Bike> {
        self.bikes.iter_mut().find(|bike| bike.id == id)
    }

    /// Removes the first bike with the given identity.
    pub fn remove(&mut self, id: Uuid) -> Option<Bike> {
        let index = self.bikes.iter().position(|bike| bike.id == id)?;
        Some(self.bikes.remove(index))
    }

    pub fn into_vec(self) -> Vec<Bike> {
        self.bikes
    }
}

impl From<Vec<Bike>> for Collection {
    fn from(bikes: Vec<Bike>) -> Self {
        Self::new(bikes)
    }
}

impl IntoIterator for Collection {
    type Item = Bike;
    type IntoIter = std::vec::IntoIter<Bike>;

    fn into_iter(self) -> Self::IntoIter {
        self.bikes.into_iter()
    }
}
