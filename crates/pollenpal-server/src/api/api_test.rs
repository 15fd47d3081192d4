use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use pollenpal_scraper::ClientSettings;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRAGMENT: &str = r#"
<input id="cityName" value="London" />
<input class="pollen-lat" value="51.5" />
<input class="pollen-lng" value="-0.12" />
<button class="day-link active" data-grass="High" data-grass-count="72"
        data-trees="Moderate" data-trees-count="38" data-weeds="Low" data-weeds-count="4">
  <span class="day-name">Mon</span><span class="day-number">12</span>
</button>
<button class="day-link" data-grass="Moderate" data-trees="Low" data-weeds="Low">
  <span class="day-name">Tue</span><span class="day-number">13</span>
</button>
<ul>
  <li class="diagram-container" data-details="grass">
    <p class="level-text">High</p><p class="ppm-level">72</p>
  </li>
</ul>
"#;

fn test_state(upstream: &str) -> AppState {
    let client = PollenClient::new(&ClientSettings {
        source_url: format!("{upstream}/pollen"),
        timeout_secs: 5,
        user_agent: "pollenpal-test/0.1".to_string(),
        max_retries: 0,
        backoff_base_secs: 0,
    })
    .expect("client");
    AppState::new(client, "UK")
}

async fn upstream_with(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

// -----------------------------------------------------------------------
// static routes
// -----------------------------------------------------------------------

#[tokio::test]
async fn health_reports_healthy() {
    let app = build_app(test_state("http://127.0.0.1:9"));
    let (status, json) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn info_lists_endpoints() {
    let app = build_app(test_state("http://127.0.0.1:9"));
    let (status, json) = get_json(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "PollenPal API");
    let endpoints = json["endpoints"].as_object().expect("endpoints map");
    assert_eq!(endpoints.len(), 6);
    assert_eq!(
        endpoints["/pollen/{city}"],
        "Get current pollen data for a city"
    );
}

// -----------------------------------------------------------------------
// pollen routes
// -----------------------------------------------------------------------

#[tokio::test]
async fn full_record_route() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string(FRAGMENT)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("data").is_none());
    assert_eq!(json["location"], "London");
    assert_eq!(json["coordinates"]["latitude"], "51.5");
    assert_eq!(json["forecast"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["current_day"]["day_name"], "Mon");
    assert_eq!(json["detailed_breakdown"]["grass"]["ppm"], "72");
}

#[tokio::test]
async fn current_route_projects_today() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string(FRAGMENT)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London/current").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location"], "London");
    assert_eq!(json["current_day"]["grass"]["level"], "High");
    assert!(json.get("forecast").is_none());
    assert!(json.get("detailed_breakdown").is_none());
}

#[tokio::test]
async fn forecast_route_projects_days() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string(FRAGMENT)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London/forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["forecast"][1]["day_name"], "Tue");
    assert_eq!(json["coordinates"]["longitude"], "-0.12");
    assert!(json.get("current_day").is_none());
}

#[tokio::test]
async fn detailed_route_projects_breakdown() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string(FRAGMENT)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London/detailed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["detailed_breakdown"]["grass"]["level"], "High");
    assert_eq!(json["current_day"]["day_name"], "Mon");
    assert!(json.get("forecast").is_none());
}

#[tokio::test]
async fn advice_route_runs_advisor() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string(FRAGMENT)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London/advice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["alert_level"], "high");
    assert_eq!(json["high_levels"], serde_json::json!(["grass"]));
    assert_eq!(json["moderate_levels"], serde_json::json!(["trees"]));
    assert_eq!(json["advice"].as_array().map(Vec::len), Some(9));
}

#[tokio::test]
async fn advice_without_active_day_is_unknown() {
    let upstream = upstream_with(
        ResponseTemplate::new(200).set_body_string(r#"<input id="cityName" value="Oban" />"#),
    )
    .await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/Oban/advice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["alert_level"], "unknown");
}

#[tokio::test]
async fn country_query_param_is_forwarded() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("country=IE"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FRAGMENT))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, _) = get_json(app, "/pollen/Dublin?country=IE").await;
    assert_eq!(status, StatusCode::OK);
}

// -----------------------------------------------------------------------
// error mapping
// -----------------------------------------------------------------------

#[tokio::test]
async fn empty_upstream_body_is_not_found() {
    let upstream = upstream_with(ResponseTemplate::new(200).set_body_string("")).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["detail"],
        "No pollen data found for 'Atlantis'. Please check the location and try again."
    );
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let upstream = upstream_with(ResponseTemplate::new(502)).await;
    let app = build_app(test_state(&upstream.uri()));

    let (status, json) = get_json(app, "/pollen/London/forecast").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["detail"]
        .as_str()
        .is_some_and(|m| m.starts_with("Error fetching data:")));
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let app = build_app(test_state("http://127.0.0.1:9"));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
}

#[tokio::test]
async fn api_error_serializes_detail_only() {
    let response = ApiError::not_found("missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
    assert_eq!(json, serde_json::json!({ "detail": "missing" }));
}

#[test]
fn api_error_internal_maps_to_500() {
    let response = ApiError::internal("boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
