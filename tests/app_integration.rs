use std::fs;
use tracing::info;

// Adds automatic logging to tests
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(endpoint: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    /// Writes a config pointing every provider at the mock server, with
    /// the rate cache at `cache_path`.
    pub fn write_config(
        server_uri: &str,
        cache_path: &std::path::Path,
    ) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            providers:
              live:
                base_url: {server_uri}
                api_key: "testkey"
              historical:
                base_url: {server_uri}
            base_currency: "EUR"
            cache_path: "{}"
        "#,
            cache_path.display()
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

const LIVE_RESPONSE: &str = r#"{
    "result": "success",
    "base_code": "EUR",
    "rates": {
        "EUR": 1.0,
        "USD": 1.1,
        "JPY": 160.0
    }
}"#;

fn options_for(conversions: Vec<xrc::convert::ConversionRequest>, update: bool) -> xrc::RunOptions {
    xrc::RunOptions {
        base_currency: None,
        update,
        date: None,
        conversions,
        auto_update_hours: None,
        interactive: false,
    }
}

#[test_log::test(tokio::test)]
async fn test_update_fetches_and_caches() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");

    let mock_server = test_utils::create_mock_server("/testkey/latest/EUR", LIVE_RESPONSE).await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let request = "100,EUR,USD".parse().unwrap();
    let result = xrc::run(
        options_for(vec![request], true),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());

    // The fetched table must land in the cache file wholesale.
    let cached = fs::read_to_string(&cache_path).expect("cache file written");
    let table: xrc::rates::RateTable = serde_json::from_str(&cached).unwrap();
    assert_eq!(table.rate("USD"), Some(1.1));
    assert_eq!(table.len(), 3);
}

#[test_log::test(tokio::test)]
async fn test_missing_cache_falls_back_to_fetch() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");

    let mock_server = test_utils::create_mock_server("/testkey/latest/EUR", LIVE_RESPONSE).await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let request = "100,USD,JPY".parse().unwrap();
    let result = xrc::run(
        options_for(vec![request], false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "run failed with: {:?}", result.err());
    assert!(cache_path.exists(), "fallback fetch should fill the cache");
}

#[test_log::test(tokio::test)]
async fn test_cached_rates_used_without_network() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");
    fs::write(&cache_path, r#"{"EUR": 1.0, "USD": 1.1}"#).unwrap();

    // Point providers at a server with no mounted routes; a request
    // against it would fail the run.
    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let request = "110,USD,EUR".parse().unwrap();
    let result = xrc::run(
        options_for(vec![request], false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "run failed with: {:?}", result.err());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

#[test_log::test(tokio::test)]
async fn test_historical_date_uses_historical_endpoint() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");

    let historical_response = r#"{
        "result": "success",
        "rates": {
            "EUR": 1.0,
            "USD": 1.05
        }
    }"#;
    let mock_server = test_utils::create_mock_server("/2024-05-01", historical_response).await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let mut options = options_for(vec!["100,EUR,USD".parse().unwrap()], false);
    options.date = Some("2024-05-01".to_string());

    let result = xrc::run(options, Some(config_file.path().to_str().unwrap())).await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());

    let cached = fs::read_to_string(&cache_path).unwrap();
    info!(%cached, "historical rates cached");
    assert!(cached.contains("1.05"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_date_is_rejected() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");

    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let mut options = options_for(Vec::new(), false);
    options.date = Some("01-05-2024".to_string());

    let result = xrc::run(options, Some(config_file.path().to_str().unwrap())).await;
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().to_string(),
        "Invalid date format. Use YYYY-MM-DD."
    );
}

#[test_log::test(tokio::test)]
async fn test_empty_cached_table_is_no_rates() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");
    fs::write(&cache_path, "{}").unwrap();

    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let request = "100,USD,EUR".parse().unwrap();
    let result = xrc::run(
        options_for(vec![request], false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "No rates available.");
}

#[test_log::test(tokio::test)]
async fn test_fetch_failure_surfaces_no_rates() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");

    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    let request = "100,USD,EUR".parse().unwrap();
    let result = xrc::run(
        options_for(vec![request], true),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "No rates available.");
    assert!(!cache_path.exists(), "failed fetch must not touch the cache");
}

#[test_log::test(tokio::test)]
async fn test_invalid_currency_code_does_not_fail_the_run() {
    let cache_dir = tempfile::tempdir().unwrap();
    let cache_path = cache_dir.path().join("exchange_rates.json");
    fs::write(&cache_path, r#"{"EUR": 1.0, "USD": 1.1}"#).unwrap();

    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(&mock_server.uri(), &cache_path);

    // One bad request among good ones: the batch continues.
    let conversions = vec![
        "100,EUR,USD".parse().unwrap(),
        "100,XXX,USD".parse().unwrap(),
        "110,USD,EUR".parse().unwrap(),
    ];
    let result = xrc::run(
        options_for(conversions, false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "run failed with: {:?}", result.err());
}
