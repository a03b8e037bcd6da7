use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

use sereno_api::{app, state::AppState};
use sereno_notify::Notifier;
use sereno_store::{
    BookingRepository, CatalogRepository, Db, ReservationRepository, SlotRepository,
};

struct TestApp {
    app: Router,
    // Holds the outbox directory alive for the duration of the test.
    _outbox: tempfile::TempDir,
}

/// In-memory database with one service and one slot on 2025-06-01 at 09:00.
async fn setup() -> TestApp {
    let db = Db::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();

    let catalog = CatalogRepository::new(db.pool.clone());
    let slots = SlotRepository::new(db.pool.clone());

    let service_id = catalog.insert("Swedish Massage", 60, 50.0).await.unwrap();
    slots
        .insert("2025-06-01", "09:00", service_id, true)
        .await
        .unwrap();

    let outbox = tempfile::tempdir().unwrap();
    let state = AppState {
        catalog,
        slots,
        reservations: ReservationRepository::new(db.pool.clone()),
        bookings: BookingRepository::new(db.pool.clone()),
        notifier: Arc::new(Notifier::log_only(Some(outbox.path().to_path_buf()))),
        hold_ttl: chrono::Duration::minutes(10),
    };

    TestApp {
        app: app(state),
        _outbox: outbox,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking_payload(reservation_id: i64) -> serde_json::Value {
    json!({
        "reservation_id": reservation_id,
        "client_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+33612345678",
        "service_id": 1,
        "date": "2025-06-01",
        "time_slot": "09:00"
    })
}

#[tokio::test]
async fn full_booking_flow() {
    let test = setup().await;
    let app = &test.app;

    let (status, services) = send(app, get("/api/massage-types")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(services.as_array().unwrap().len(), 1);
    assert_eq!(services[0]["name"], "Swedish Massage");

    let (status, slots) = send(app, get("/api/slots?date=2025-06-01&service_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slots.as_array().unwrap().len(), 1);
    assert_eq!(slots[0]["time"], "09:00");
    let slot_id = slots[0]["id"].as_i64().unwrap();

    let (status, reservation) = send(
        app,
        post_json("/api/reservations", json!({ "slot_id": slot_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reservation["reservation_id"], 1);
    let expires_in = reservation["expires_in_seconds"].as_i64().unwrap();
    assert!((595..=600).contains(&expires_in));

    // The held slot disappears from the listing.
    let (status, slots) = send(app, get("/api/slots?date=2025-06-01&service_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(slots.as_array().unwrap().is_empty());

    let (status, booking) = send(app, post_json("/api/bookings", booking_payload(1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["reference"], "BK-20250601-001");
    assert_eq!(booking["client_name"], "Jane Doe");
    let booking_id = booking["id"].as_i64().unwrap();

    let (status, detail) = send(app, get(&format!("/api/bookings/{booking_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["reference"], "BK-20250601-001");
    assert_eq!(detail["service_name"], "Swedish Massage");
    assert_eq!(detail["duration"], 60);

    // The booked slot stays gone even though its hold was consumed.
    let (status, slots) = send(app, get("/api/slots?date=2025-06-01&service_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(slots.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn slots_require_date_and_service_id() {
    let test = setup().await;
    let app = &test.app;

    let (status, body) = send(app, get("/api/slots?service_id=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameter: date");
    assert_eq!(body["field"], "date");

    let (status, body) = send(app, get("/api/slots?date=2025-06-01")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameter: service_id");

    let (status, body) = send(app, get("/api/slots?date=2025-06-01&service_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid service_id parameter");
}

#[tokio::test]
async fn reserving_a_held_slot_conflicts() {
    let test = setup().await;
    let app = &test.app;

    let (status, _) = send(app, post_json("/api/reservations", json!({ "slot_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, post_json("/api/reservations", json!({ "slot_id": 1 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "slot is already reserved");
}

#[tokio::test]
async fn reservation_rejects_bad_slot_ids() {
    let test = setup().await;
    let app = &test.app;

    let (status, body) = send(app, post_json("/api/reservations", json!({ "slot_id": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid slot_id");

    let (status, body) =
        send(app, post_json("/api/reservations", json!({ "slot_id": 999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "slot not found");
}

#[tokio::test]
async fn cancel_reservation_then_cancel_again() {
    let test = setup().await;
    let app = &test.app;

    let (status, reservation) =
        send(app, post_json("/api/reservations", json!({ "slot_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    let id = reservation["reservation_id"].as_i64().unwrap();

    let delete = |id: i64| {
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/reservations/{id}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(app, delete(id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(app, delete(id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "reservation not found");
}

#[tokio::test]
async fn booking_validation_failures_return_field() {
    let test = setup().await;
    let app = &test.app;

    let (status, _) = send(app, post_json("/api/reservations", json!({ "slot_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);

    let mut bad_name = booking_payload(1);
    bad_name["client_name"] = json!("J");
    let (status, body) = send(app, post_json("/api/bookings", bad_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name must be at least 2 characters");
    assert_eq!(body["field"], "client_name");

    let mut bad_email = booking_payload(1);
    bad_email["email"] = json!("not-an-email");
    let (status, body) = send(app, post_json("/api/bookings", bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email");
    assert_eq!(body["field"], "email");

    let mut bad_phone = booking_payload(1);
    bad_phone["phone"] = json!("123");
    let (status, body) = send(app, post_json("/api/bookings", bad_phone)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid phone number");
    assert_eq!(body["field"], "phone");
}

#[tokio::test]
async fn booking_with_unknown_reservation_is_not_found() {
    let test = setup().await;
    let app = &test.app;

    let (status, body) = send(app, post_json("/api/bookings", booking_payload(42))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "reservation not found or expired");
}

#[tokio::test]
async fn unknown_booking_lookup_is_not_found() {
    let test = setup().await;
    let app = &test.app;

    let (status, body) = send(app, get("/api/bookings/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "booking not found");
}

#[tokio::test]
async fn preflight_requests_are_allowed() {
    let test = setup().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/reservations")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = test.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
