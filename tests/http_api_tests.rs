use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use bike_store::{AppState, Bike, BikeManager, BikeType, InMemoryBikeStore, UpsertBike, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app_with(store: Arc<InMemoryBikeStore>) -> Router {
    let manager = Arc::new(BikeManager::new(store));
    build_router(AppState::new(manager))
}

fn seeded_bike(model: &str, bike_type: BikeType, size: f64) -> Bike {
    Bike::create(UpsertBike {
        model: model.to_string(),
        make: format!("{model}Make"),
        color: "Blue".to_string(),
        bike_type,
        size,
    })
}

async fn send(app: &Router, method: Method, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let app = app_with(Arc::new(InMemoryBikeStore::new()));

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn create_then_list_and_get() {
    let app = app_with(Arc::new(InMemoryBikeStore::new()));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bike",
        Some(json!({
            "model": "model1",
            "make": "make1",
            "color": "Blue",
            "type": "City",
            "size": 30.1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/api/bike", None).await;
    assert_eq!(status, StatusCode::OK);
    let bikes = body.as_array().expect("list should be an array");
    assert_eq!(bikes.len(), 1);
    assert_eq!(bikes[0]["model"], json!("model1"));
    assert_eq!(bikes[0]["type"], json!("City"));

    let id = bikes[0]["id"].as_str().expect("id should be a string");
    let (status, body) = send(&app, Method::GET, &format!("/api/bike/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["size"], json!(30.1));
}

#[tokio::test]
async fn create_accepts_numeric_type_tag() {
    let store = Arc::new(InMemoryBikeStore::new());
    let app = app_with(store.clone());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bike",
        Some(json!({
            "model": "Ridge",
            "make": "Peak",
            "color": "Black",
            "type": 1,
            "size": 29
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let stored = store.snapshot().await.unwrap();
    assert_eq!(stored.as_slice()[0].bike_type, BikeType::Mountain);
}

#[tokio::test]
async fn create_rejects_unknown_type_before_reaching_the_store() {
    let store = Arc::new(InMemoryBikeStore::new());
    let app = app_with(store.clone());

    for bad_type in [json!("Road"), json!(7)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/bike",
            Some(json!({
                "model": "Bad",
                "make": "Bad",
                "color": "Bad",
                "type": bad_type,
                "size": 1.0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("input_error"));
    }

    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn update_returns_true_and_persists_fields() {
    let a = seeded_bike("Test1", BikeType::City, 22.2);
    let store = Arc::new(InMemoryBikeStore::with_bikes(vec![a.clone()]));
    let app = app_with(store.clone());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/bike/{}", a.id),
        Some(json!({
            "model": "Test1UU",
            "make": "Test1MakeUU",
            "color": "BlueUU",
            "type": "Mountain",
            "size": 30
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));
    let stored = store.snapshot().await.unwrap();
    let updated = stored.find(a.id).unwrap();
    assert_eq!(updated.model, "Test1UU");
    assert_eq!(updated.bike_type, BikeType::Mountain);
    assert_eq!(updated.size, 30.0);
}

#[tokio::test]
async fn update_write_fault_returns_false() {
    let a = seeded_bike("Test1", BikeType::City, 22.2);
    let store = Arc::new(InMemoryBikeStore::with_bikes(vec![a.clone()]));
    store.set_fail_writes(true);
    let app = app_with(store);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/bike/{}", a.id),
        Some(json!({
            "model": "X",
            "make": "X",
            "color": "X",
            "type": "City",
            "size": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(false));
}

#[tokio::test]
async fn delete_uses_bike_id_query_parameter() {
    let a = seeded_bike("Test1", BikeType::City, 22.2);
    let b = seeded_bike("Test2", BikeType::Mountain, 23.2);
    let store = Arc::new(InMemoryBikeStore::with_bikes(vec![a.clone(), b.clone()]));
    let app = app_with(store.clone());

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/bike?bikeId={}", a.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));
    assert_eq!(store.snapshot().await.unwrap().as_slice(), &[b]);
}

#[tokio::test]
async fn faults_map_to_status_codes() {
    let a = seeded_bike("Test1", BikeType::City, 22.2);
    let app = app_with(Arc::new(InMemoryBikeStore::with_bikes(vec![a])));
    let missing = Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/api/bike/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/bike?bikeId={missing}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/bike/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("input_error"));

    let (status, _) = send(&app, Method::DELETE, "/api/bike", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let absent = app_with(Arc::new(InMemoryBikeStore::absent()));
    let (status, body) = send(&absent, Method::GET, "/api/bike", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("empty_collection"));

    let missing_file = app_with(Arc::new(InMemoryBikeStore::new()));
    let (status, body) = send(&missing_file, Method::GET, "/api/bike", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], json!("storage_error"));
}
