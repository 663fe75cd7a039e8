#![allow(clippy::unwrap_used)]
// Integration tests for `PylightsClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pylights_api::{Error, PylightsClient};

// ── Helpers ─────────────────────────────────────────────────────────

fn api_path(suffix: &str) -> String {
    format!("/pylights-api{suffix}")
}

fn info_body() -> serde_json::Value {
    json!({
        "songs": {
            "songs": [{
                "title": "Carol of the Bells",
                "artist": "Trans-Siberian Orchestra",
                "album_art": "aGVsbG8=",
                "length_ms": 187000.0
            }],
            "playing": null,
            "paused": false,
            "current_time_ms": 0.0,
            "volume": 60
        },
        "lights": { "lights": [{ "name": "porch", "gpio": 17, "value": true }] },
        "presets": { "presets": [{ "name": "calm", "lights": ["porch"] }] }
    })
}

async fn mount_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(api_path("/info")))
        .respond_with(ResponseTemplate::new(200).set_body_json(info_body()))
        .mount(server)
        .await;
}

async fn setup() -> (MockServer, PylightsClient) {
    let server = MockServer::start().await;
    mount_info(&server).await;
    let client = PylightsClient::with_client(reqwest::Client::new());
    client.connect(&server.uri()).await.unwrap();
    (server, client)
}

// ── Connection tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_commits_address_and_returns_info() {
    let (server, client) = setup().await;

    assert_eq!(
        client.base_url().unwrap().as_str().trim_end_matches('/'),
        server.uri()
    );
    let info = client.info().await.unwrap();
    assert_eq!(info.songs.volume, 60);
    assert_eq!(info.lights.lights[0].gpio, 17);
}

#[tokio::test]
async fn test_connect_failure_rolls_back_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/info")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = PylightsClient::with_client(reqwest::Client::new());
    let result = client.connect(&server.uri()).await;

    assert!(
        matches!(result, Err(Error::Server { status: 503, .. })),
        "expected Server error, got: {result:?}"
    );
    assert!(client.base_url().is_none());
    assert!(matches!(client.pause_song().await, Err(Error::NotConnected)));
}

#[tokio::test]
async fn test_connect_rejects_unparseable_address() {
    let client = PylightsClient::with_client(reqwest::Client::new());
    let result = client.connect("not a url").await;

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
    assert!(client.base_url().is_none());
}

#[tokio::test]
async fn test_request_before_connect_is_not_connected() {
    let client = PylightsClient::with_client(reqwest::Client::new());
    let result = client.toggle_light("porch").await;

    assert!(matches!(result, Err(Error::NotConnected)));
    assert_eq!(client.in_flight().current(), 0);
}

// ── Endpoint tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_play_song_sends_title_as_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/songs/play")))
        .and(query_param("name", "Carol of the Bells"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "songs": [],
            "playing": {
                "title": "Carol of the Bells",
                "artist": "Trans-Siberian Orchestra",
                "album_art": "",
                "length_ms": 187000.0
            },
            "paused": false,
            "current_time_ms": 250.0,
            "volume": 60
        })))
        .expect(1)
        .mount(&server)
        .await;

    let songs = client.play_song("Carol of the Bells").await.unwrap();

    assert_eq!(songs.playing.unwrap().title, "Carol of the Bells");
    assert!((songs.current_time_ms - 250.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_set_volume_sends_integer_value() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/songs/volume")))
        .and(query_param("value", "35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "songs": [],
            "playing": null,
            "paused": false,
            "current_time_ms": 0.0,
            "volume": 35
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.set_volume(35).await.unwrap().volume, 35);
}

#[tokio::test]
async fn test_add_preset_joins_light_names() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/presets/add")))
        .and(query_param("name", "party"))
        .and(query_param("lights", "porch,garage,tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "presets": [{ "name": "party", "lights": ["porch", "garage", "tree"] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lights = vec!["porch".to_owned(), "garage".to_owned(), "tree".to_owned()];
    let presets = client.add_preset("party", &lights).await.unwrap();

    assert_eq!(presets.presets[0].lights.len(), 3);
}

#[tokio::test]
async fn test_remap_cancel_returns_null_remaining() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/remap/cancel")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "remaining": null })))
        .mount(&server)
        .await;

    assert_eq!(client.cancel_remap().await.unwrap().remaining, None);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_uses_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/lights/toggle")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Unknown light: attic" })),
        )
        .mount(&server)
        .await;

    match client.toggle_light("attic").await {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unknown light: attic");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_envelope_is_generic() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/songs/stop")))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    match client.stop_song().await {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500: Unknown error");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_mismatched_shape_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/lights/all-on")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "presets": [] })))
        .mount(&server)
        .await;

    let result = client.all_lights_on().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_in_flight_counter_released_on_every_outcome() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/songs/pause")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "Nothing playing" })))
        .mount(&server)
        .await;

    assert!(client.pause_song().await.is_err());
    assert!(client.info().await.is_ok());
    assert_eq!(client.in_flight().current(), 0);
}
