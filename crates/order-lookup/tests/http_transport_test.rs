use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use order_lookup::{
    DisplaySurface, HttpTransport, LookupConfig, LookupOutcome, MemorySurface, OrderLookupWidget,
    StatusClass,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

const KNOWN_UID: &str = "b563feb7b2b84b6test";

fn sample_order() -> Value {
    json!({
        "order_uid": KNOWN_UID,
        "track_number": "WBILMTESTTRACK",
        "entry": "WBIL",
        "delivery": {
            "name": "Test Testov",
            "phone": "+9720000000",
            "city": "Kiryat Mozkin"
        },
        "payment": {
            "transaction": KNOWN_UID,
            "currency": "USD",
            "amount": 1817
        },
        "items": [
            { "chrt_id": 9934930, "name": "Mascaras", "price": 453 }
        ],
        "locale": "en"
    })
}

/// Stand-in for the order API: one route, a handful of canned behaviours.
async fn get_order(Path(order_uid): Path<String>) -> Response {
    match order_uid.as_str() {
        KNOWN_UID => Json(sample_order()).into_response(),
        "broken" => (StatusCode::OK, "{\"order_uid\": ").into_response(),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database down" })),
        )
            .into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "order_uid": "slow" })).into_response()
        }
        uid if uid.starts_with("echo-") => Json(json!({ "order_uid": uid })).into_response(),
        _ => (StatusCode::NOT_FOUND, "order not found").into_response(),
    }
}

async fn spawn_order_api() -> SocketAddr {
    let app = Router::new().route("/order/:order_uid", get(get_order));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn widget_for(config: LookupConfig) -> (OrderLookupWidget<HttpTransport, MemorySurface>, MemorySurface) {
    let transport = HttpTransport::new(&config).unwrap();
    let surface = MemorySurface::new();
    (
        OrderLookupWidget::new(config, transport, surface.clone()),
        surface,
    )
}

async fn widget_against_api() -> (OrderLookupWidget<HttpTransport, MemorySurface>, MemorySurface) {
    let addr = spawn_order_api().await;
    widget_for(LookupConfig::new(&format!("http://{addr}/order/")).unwrap())
}

#[tokio::test]
async fn test_found_order_is_rendered_in_received_key_order() {
    let (widget, surface) = widget_against_api().await;

    let outcome = widget.lookup(KNOWN_UID).await;

    assert_eq!(outcome, LookupOutcome::Rendered(StatusClass::Success));
    let shown = surface.snapshot();
    assert_eq!(shown.status, StatusClass::Success);
    assert_eq!(shown.text, serde_json::to_string_pretty(&sample_order()).unwrap());
    assert!(shown.text.starts_with("{\n  \"order_uid\": "));
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let (widget, surface) = widget_against_api().await;

    widget.lookup("does-not-exist").await;

    assert_eq!(surface.snapshot().text, "Order not found");
    assert_eq!(surface.snapshot().status, StatusClass::Error);
}

#[tokio::test]
async fn test_server_error_is_reported_as_not_found() {
    let (widget, surface) = widget_against_api().await;

    widget.lookup("boom").await;

    assert_eq!(surface.snapshot().text, "Order not found");
}

#[tokio::test]
async fn test_malformed_body_is_request_failure() {
    let (widget, surface) = widget_against_api().await;

    let outcome = widget.lookup("broken").await;

    assert_eq!(outcome, LookupOutcome::Rendered(StatusClass::Error));
    assert!(surface.snapshot().text.starts_with("Request failed: "));
}

#[tokio::test]
async fn test_reserved_characters_reach_server_as_one_segment() {
    let (widget, surface) = widget_against_api().await;

    widget.lookup("echo-a b/c?d").await;

    let shown = surface.snapshot();
    assert_eq!(shown.status, StatusClass::Success);
    assert!(shown.text.contains("\"order_uid\": \"echo-a b/c?d\""), "{}", shown.text);
}

#[tokio::test]
async fn test_repeated_lookup_is_identical() {
    let (widget, surface) = widget_against_api().await;

    widget.lookup(KNOWN_UID).await;
    let first = surface.snapshot();
    widget.lookup(KNOWN_UID).await;

    assert_eq!(surface.snapshot(), first);
}

#[tokio::test]
async fn test_connection_refused_shows_detail() {
    // Grab a free port, then close it again.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (widget, surface) = widget_for(LookupConfig::new(&format!("http://{addr}/order/")).unwrap());
    let outcome = widget.lookup(KNOWN_UID).await;

    assert_eq!(outcome, LookupOutcome::Rendered(StatusClass::Error));
    let shown = surface.snapshot();
    assert!(shown.text.starts_with("Request failed: "), "{}", shown.text);
    assert!(shown.text.len() > "Request failed: ".len());
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let addr = spawn_order_api().await;
    let config = LookupConfig::new(&format!("http://{addr}/order/"))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let (widget, surface) = widget_for(config);

    widget.lookup("slow").await;

    assert!(surface.snapshot().text.starts_with("Request failed: "));
    assert_eq!(surface.snapshot().status, StatusClass::Error);
}
