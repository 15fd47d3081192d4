use super::*;

fn settings(source_url: &str) -> ClientSettings {
    ClientSettings {
        source_url: source_url.to_string(),
        timeout_secs: 5,
        user_agent: "pollenpal-test/0.1".to_string(),
        max_retries: 0,
        backoff_base_secs: 0,
    }
}

#[test]
fn new_rejects_relative_source_url() {
    let result = PollenClient::new(&settings("not-a-url"));
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidSourceUrl { .. }),
        "expected InvalidSourceUrl, got: {err:?}"
    );
}

#[test]
fn new_accepts_absolute_source_url() {
    let client = PollenClient::new(&settings(
        "https://www.kleenex.co.uk/api/sitecore/Pollen/GetPollenContentCountryCity",
    ))
    .expect("client builds");
    assert_eq!(client.origin, "https://www.kleenex.co.uk");
}

#[test]
fn settings_from_app_config_copies_transport_fields() {
    let config = pollenpal_core::AppConfig {
        env: pollenpal_core::Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "debug".to_string(),
        source_url: "http://localhost:9/pollen".to_string(),
        default_country: "UK".to_string(),
        request_timeout_secs: 7,
        user_agent: "ua/1".to_string(),
        max_retries: 2,
        retry_backoff_base_secs: 3,
    };
    let s = ClientSettings::from_app_config(&config);
    assert_eq!(s.source_url, "http://localhost:9/pollen");
    assert_eq!(s.timeout_secs, 7);
    assert_eq!(s.user_agent, "ua/1");
    assert_eq!(s.max_retries, 2);
    assert_eq!(s.backoff_base_secs, 3);
}

#[test]
fn new_derives_origin_with_port() {
    let client = PollenClient::new(&settings("http://127.0.0.1:8080/pollen")).expect("client builds");
    assert_eq!(client.origin, "http://127.0.0.1:8080");
    assert_eq!(client.domain, "127.0.0.1");
}

#[test]
fn new_records_domain_for_rate_limit_errors() {
    let client = PollenClient::new(&settings(
        "https://www.kleenex.co.uk/api/sitecore/Pollen/GetPollenContentCountryCity",
    ))
    .expect("client builds");
    assert_eq!(client.domain, "www.kleenex.co.uk");
}

#[test]
fn new_rejects_url_without_host() {
    let err = PollenClient::new(&settings("mailto:pollen@example.com")).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidSourceUrl { ref reason, .. } if reason == "URL has no host"),
        "expected InvalidSourceUrl, got: {err:?}"
    );
}
