//! Integration tests for the fetch engine
//!
//! These tests use wiremock to stand up mock HTTP servers and drive the
//! reqwest transport, the dispatcher, and each consumer end-to-end.

use recon_fanout::config::{Config, SiteList};
use recon_fanout::fetch::{FetchJob, FetchOutcome, ReqwestTransport, Transport};
use recon_fanout::recon::to_wire;
use recon_fanout::{Dispatcher, Engine, TRANSPORT_ERROR_SENTINEL};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration whose search endpoint is the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.fetch.timeout_secs = 2;
    config.search.base_url = format!("{}/search", base_url);
    config
}

fn create_engine(base_url: &str) -> Engine {
    Engine::new(create_test_config(base_url)).expect("Failed to build engine")
}

#[tokio::test]
async fn test_body_returned_whatever_the_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let engine = create_engine(&mock_server.uri());
    let ok = format!("{}/ok", mock_server.uri());
    let missing = format!("{}/missing", mock_server.uri());

    let results = engine.bulk_scrape(vec![ok.clone(), missing.clone()]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[&ok], FetchOutcome::Body("hello".to_string()));
    assert_eq!(results[&missing], FetchOutcome::Body("not here".to_string()));
}

#[tokio::test]
async fn test_head_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new(&Config::default().fetch).expect("Failed to build client");

    let found = transport
        .head_status(&format!("{}/alice", mock_server.uri()))
        .await
        .expect("HEAD failed");
    let missing = transport
        .head_status(&format!("{}/nobody", mock_server.uri()))
        .await
        .expect("HEAD failed");

    assert_eq!(found, 200);
    assert_eq!(missing, 404);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved content"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let engine = create_engine(&mock_server.uri());
    let old = format!("{}/old", mock_server.uri());

    let results = engine.dispatcher().dispatch(vec![FetchJob::body(old.clone())]).await;
    assert_eq!(results[&old], FetchOutcome::Body("moved content".to_string()));

    let found = engine.dispatcher().dispatch_probe(vec![FetchJob::head(old.clone())]).await;
    assert_eq!(found, vec![old]);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast"))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.fetch.timeout_secs = 1;
    let engine = Engine::new(config).expect("Failed to build engine");

    let slow = format!("{}/slow", mock_server.uri());
    let fast = format!("{}/fast", mock_server.uri());

    let started = Instant::now();
    let results = engine.bulk_scrape(vec![slow.clone(), fast.clone()]).await;
    let elapsed = started.elapsed();

    assert!(results[&slow].is_error(), "expected a timeout, got {:?}", results[&slow]);
    assert_eq!(results[&fast], FetchOutcome::Body("fast".to_string()));
    assert!(elapsed < Duration::from_secs(3), "batch took {:?}", elapsed);
}

#[tokio::test]
async fn test_connection_refused_is_an_error_entry() {
    let engine = Engine::new(Config::default()).expect("Failed to build engine");
    let url = "http://127.0.0.1:1/".to_string();

    let results = engine.bulk_scrape(vec![url.clone()]).await;
    let wire = to_wire(&results);

    assert_eq!(results.len(), 1);
    assert!(results[&url].is_error());
    assert!(wire[&url].starts_with(TRANSPORT_ERROR_SENTINEL));
}

#[tokio::test]
async fn test_probe_end_to_end() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/a/alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/b/alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let sites = SiteList::from_templates(vec![
        ("A", format!("{}/a/{{username}}", base)),
        ("B", format!("{}/b/{{username}}", base)),
        ("C", format!("{}/c/{{username}}", base)),
        ("Broken", format!("{}/profile", base)),
    ]);
    let engine = create_engine(&base);

    let mut found = engine.probe_existence("alice", &sites).await;
    found.sort();
    assert_eq!(
        found,
        vec![format!("{}/a/alice", base), format!("{}/b/alice", base)]
    );

    let nobody = engine.probe_existence("zzz_no_such_user", &sites).await;
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_harvest_against_search_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "\"@example.com\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "write to a@example.com or b@other.org; docs at mail.example.com",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:*.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("see www.example.com"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string(""))
        .mount(&mock_server)
        .await;

    let engine = create_engine(&mock_server.uri());
    let mut harvested = engine.harvest("example.com").await.expect("Harvest failed");
    harvested.subdomains.sort();

    assert_eq!(harvested.emails, vec!["a@example.com"]);
    assert_eq!(harvested.subdomains, vec!["mail.example.com", "www.example.com"]);
}

#[tokio::test]
async fn test_dork_search_against_search_server() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:linkedin.com \"acme\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<a href="{}/settings">settings</a>
               <a href="https://www.linkedin.com/company/acme">Acme</a>"#,
            base
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>no results</p>"))
        .mount(&mock_server)
        .await;

    let engine = create_engine(&base);
    let found = engine.dork_search("acme").await.expect("Dork search failed");

    assert_eq!(found.len(), 5);
    assert_eq!(
        found["site:linkedin.com"],
        vec!["https://www.linkedin.com/company/acme"]
    );
    assert!(found["\"acme\""].is_empty());
}

#[tokio::test]
async fn test_dispatcher_over_reqwest_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page"))
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new(&Config::default().fetch).expect("Failed to build client");
    let dispatcher = Dispatcher::with_default_timeout(Arc::new(transport));

    let jobs: Vec<FetchJob> = (0..20)
        .map(|i| FetchJob::body(format!("{}/page/{}", mock_server.uri(), i)))
        .collect();
    let results = dispatcher.dispatch(jobs).await;

    assert_eq!(results.len(), 20);
    assert!(results.values().all(|o| o.body() == Some("page")));
}
