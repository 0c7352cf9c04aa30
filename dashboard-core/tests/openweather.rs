//! Gateway and dashboard behaviour against a mock OpenWeatherMap server.

use dashboard_core::{
    Dashboard, MemoryStore, OpenWeatherGateway, Phase, WeatherError, WeatherGateway, WeatherQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body(name: &str, temp: f64, condition: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"id": 800, "main": condition, "description": condition.to_lowercase(), "icon": "01d"}],
        "main": {"temp": temp, "feels_like": temp - 1.0, "humidity": 65, "pressure": 1015},
        "wind": {"speed": 4.1, "deg": 250},
        "dt": 1_760_875_200,
        "sys": {"country": "FR"},
        "name": name,
        "cod": 200
    })
}

fn forecast_body(name: &str, entries: usize) -> serde_json::Value {
    let list: Vec<_> = (0..entries)
        .map(|i| {
            serde_json::json!({
                "dt": 1_760_875_200 + (i as i64) * 10_800,
                "main": {"temp": 15.0 + i as f64 * 0.1, "feels_like": 14.0, "humidity": 60, "pressure": 1015},
                "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
                "wind": {"speed": 3.0},
                "dt_txt": "2025-10-19 12:00:00"
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": entries,
        "list": list,
        "city": {"id": 2988507, "name": name, "country": "FR"}
    })
}

async fn mount_ok(server: &MockServer, city: &str, temp: f64, condition: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(city, temp, condition)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(city, 40)))
        .mount(server)
        .await;
}

fn gateway(server: &MockServer) -> OpenWeatherGateway {
    OpenWeatherGateway::new(Some("TEST_KEY".into())).with_base_url(server.uri())
}

fn query(city: &str) -> WeatherQuery {
    WeatherQuery::parse(city).unwrap()
}

#[tokio::test]
async fn fetches_current_and_forecast() {
    let server = MockServer::start().await;
    mount_ok(&server, "Paris", 18.0, "Clear").await;

    let report = gateway(&server).fetch_report(&query("Paris")).await.unwrap();

    assert_eq!(report.current.location, "Paris");
    assert_eq!(report.current.country, "FR");
    assert_eq!(report.current.temperature_c, 18.0);
    assert_eq!(report.forecast.entries.len(), 40);
    assert_eq!(report.forecast.daily().count(), 5);
}

#[tokio::test]
async fn paris_search_succeeds_with_advice() {
    let server = MockServer::start().await;
    mount_ok(&server, "Paris", 28.0, "Clear").await;

    let mut dash = Dashboard::new(MemoryStore::new());
    dash.set_input("Paris");
    let phase = dash.search(&gateway(&server), "Paris").await;

    assert_eq!(phase, Phase::Success);
    assert_eq!(dash.report().unwrap().current.location, "Paris");
    assert_eq!(dash.advice().unwrap().message(), "Wear shorts.");
    assert_eq!(dash.recent().names(), ["Paris"]);
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let server = MockServer::start().await;
    mount_ok(&server, "Paris", 18.0, "Clear").await;

    let not_found = ResponseTemplate::new(404)
        .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"}));
    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(not_found)
        .mount(&server)
        .await;

    let gw = gateway(&server);
    let err = gw.fetch_current(&query("Atlantis")).await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(ref city) if city == "Atlantis"));

    let mut dash = Dashboard::new(MemoryStore::new());
    assert_eq!(dash.search(&gw, "Paris").await, Phase::Success);
    assert_eq!(dash.search(&gw, "Atlantis").await, Phase::Error);

    assert!(dash.report().is_none());
    assert!(dash.error().unwrap().contains("City not found"));
    assert!(dash.view(chrono::Utc::now().date_naive()).current.is_none());
}

#[tokio::test]
async fn missing_credential_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gw = OpenWeatherGateway::new(None).with_base_url(server.uri());
    let mut dash = Dashboard::new(MemoryStore::new());

    assert_eq!(dash.search(&gw, "Paris").await, Phase::Error);
    assert_eq!(dash.error(), Some("OpenWeather API key is not configured"));

    let err = gw.fetch_forecast(&query("Paris")).await.unwrap_err();
    assert!(matches!(err, WeatherError::Configuration));
}

#[tokio::test]
async fn provider_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_report(&query("Paris")).await.unwrap_err();
    match &err {
        WeatherError::Provider { status, message } => {
            assert_eq!(*status, 401);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn provider_error_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_current(&query("Paris")).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch weather data");
}

#[tokio::test]
async fn forecast_failure_discards_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.0, "Clear")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "internal error"})),
        )
        .mount(&server)
        .await;

    let mut dash = Dashboard::new(MemoryStore::new());
    assert_eq!(dash.search(&gateway(&server), "Paris").await, Phase::Error);
    assert_eq!(dash.error(), Some("internal error"));
    assert!(dash.report().is_none());
    assert!(dash.recent().is_empty());
}

#[tokio::test]
async fn malformed_payload_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Paris"})))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_current(&query("Paris")).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
    assert!(err.user_message().contains("unexpected"));
}
