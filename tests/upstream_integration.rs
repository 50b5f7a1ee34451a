//! Upstream client integration tests
//!
//! A mock server stands in for the Icecast admin API so the real client
//! (basic auth, query encoding, XML parsing, status handling) is exercised
//! end to end.

use icestats::config::Config;
use icestats::geoip::{GeoError, GeoLookup, Location};
use icestats::icecast::{IcecastApi, IcecastClient, UpstreamError};
use icestats::stats::{by_country, Collector};
use std::net::IpAddr;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// base64("admin:hackme")
const EXPECTED_AUTH: &str = "Basic YWRtaW46aGFja21l";

const LISTMOUNTS: &str = r#"<?xml version="1.0"?>
<icestats>
  <source mount="/live"><listeners>2</listeners><Connected>100</Connected></source>
  <source mount="/broken"><listeners>1</listeners><Connected>50</Connected></source>
  <source mount="/lofi"><listeners>1</listeners><Connected>20</Connected></source>
</icestats>"#;

fn listclients(mount: &str, ips: &[&str]) -> String {
    let listeners: String = ips
        .iter()
        .enumerate()
        .map(|(i, ip)| {
            format!(
                "<listener><IP>{}</IP><UserAgent>curl/8.0</UserAgent><Connected>{}</Connected><ID>{}</ID></listener>",
                ip,
                i * 10,
                i
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><icestats><source mount="{}"><Listeners>{}</Listeners>{}</source></icestats>"#,
        mount,
        ips.len(),
        listeners
    )
}

async fn mount_clients(server: &MockServer, mount: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/admin/listclients"))
        .and(query_param("mount", mount))
        .and(header("authorization", EXPECTED_AUTH))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Start the mock admin API
async fn start_mock_icecast() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/listmounts"))
        .and(header("authorization", EXPECTED_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTMOUNTS))
        .mount(&server)
        .await;

    mount_clients(
        &server,
        "/live",
        ResponseTemplate::new(200).set_body_string(listclients("/live", &["192.0.2.1", "192.0.2.2"])),
    )
    .await;
    mount_clients(
        &server,
        "/lofi",
        ResponseTemplate::new(200).set_body_string(listclients("/lofi", &["192.0.2.1"])),
    )
    .await;
    mount_clients(
        &server,
        "/broken",
        ResponseTemplate::new(404).set_body_string("Source does not exist"),
    )
    .await;
    mount_clients(
        &server,
        "/garbled",
        ResponseTemplate::new(200).set_body_string("<icestats><source>"),
    )
    .await;

    // Anything not matched above, including bad credentials
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(10)
        .mount(&server)
        .await;

    server
}

fn test_config(url: String, password: &str) -> Config {
    Config {
        user: "admin".to_string(),
        password: password.to_string(),
        url,
        mounts: Vec::new(),
        geoip_db: "unused.mmdb".to_string(),
        timeout_secs: 5,
    }
}

struct EverywhereIsOslo;

impl GeoLookup for EverywhereIsOslo {
    fn locate(&self, _ip: IpAddr) -> Result<Location, GeoError> {
        Ok(Location {
            city: Some("Oslo".to_string()),
            country: Some("Norway".to_string()),
            iso_code: Some("NO".to_string()),
            continent: Some("Europe".to_string()),
            latitude: Some(59.9139),
            longitude: Some(10.7522),
        })
    }
}

#[tokio::test]
async fn test_list_mounts() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "hackme")).unwrap();

    let mounts = client.list_mounts().await.unwrap();
    assert_eq!(mounts, vec!["/live", "/broken", "/lofi"]);
}

#[tokio::test]
async fn test_list_clients() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "hackme")).unwrap();

    let live = client.list_clients("/live").await.unwrap();
    assert_eq!(live.mount, "/live");
    assert_eq!(live.reported, 2);
    assert_eq!(live.listeners.len(), 2);
    assert_eq!(live.listeners[1].ip, "192.0.2.2");
    assert_eq!(live.listeners[1].user_agent, "curl/8.0");
    assert_eq!(live.listeners[1].connected, 10);
    assert_eq!(live.listeners[1].id, "1");
}

#[tokio::test]
async fn test_non_success_status() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "hackme")).unwrap();

    match client.list_clients("/broken").await {
        Err(UpstreamError::Status(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_credentials() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "wrong")).unwrap();

    match client.list_mounts().await {
        Err(UpstreamError::Status(status)) => assert_eq!(status.as_u16(), 401),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "hackme")).unwrap();

    assert!(matches!(
        client.list_clients("/garbled").await,
        Err(UpstreamError::Xml(_))
    ));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = IcecastClient::new(&test_config(format!("http://{}", addr), "hackme")).unwrap();
    assert!(matches!(
        client.list_mounts().await,
        Err(UpstreamError::Http(_))
    ));
}

#[tokio::test]
async fn test_collector_skips_failing_mount() {
    let server = start_mock_icecast().await;
    let client = IcecastClient::new(&test_config(server.uri(), "hackme")).unwrap();
    let collector = Collector::new(Arc::new(client), Arc::new(EverywhereIsOslo), Vec::new());

    let snapshot = collector.snapshot().await;

    // "/broken" answers 404 and is left out
    assert_eq!(snapshot.reported.len(), 2);
    assert_eq!(snapshot.reported["/live"], 2);
    assert_eq!(snapshot.reported["/lofi"], 1);
    assert_eq!(snapshot.listeners.len(), 3);

    let stats = by_country(&snapshot);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.countries["Norway"].cities["Oslo"].total, 3);
}
