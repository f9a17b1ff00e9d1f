//! Configuration loading through the public API

#[cfg(test)]
mod tests {
    use ingest_console::config::{CliOverrides, LogFormat, load_config_with_precedence};
    use ingest_console::{HttpIngestClient, IngestError, PollSchedule};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_then_cli_precedence() {
        let file = write_config(
            r#"
service:
  base_url: "http://files.example.org:8080"
  endpoints:
    progress: /api/progress
polling:
  interval_ms: 2000
logging:
  level: debug
"#,
        );
        let cli = CliOverrides {
            base_url: Some("http://cli.example.org".to_string()),
            log_level: None,
            log_format: Some(LogFormat::Json),
        };

        let config = load_config_with_precedence(Some(file.path()), false, &cli)
            .await
            .unwrap();

        assert_eq!(config.service().base_url, "http://cli.example.org");
        assert_eq!(config.service().endpoints.progress, "/api/progress");
        assert_eq!(config.service().endpoints.results, "/services/result");
        assert_eq!(config.logging().level, "debug");
        assert_eq!(config.logging().format, LogFormat::Json);

        let schedule = PollSchedule::from_config(config.polling());
        assert_eq!(schedule.delay_before(0), Duration::from_millis(1000));
        assert_eq!(schedule.delay_before(1), Duration::from_millis(2000));

        let client = HttpIngestClient::new(config.service()).unwrap();
        assert_eq!(
            client.endpoint_url(&config.service().endpoints.progress).unwrap().as_str(),
            "http://cli.example.org/api/progress"
        );
    }

    #[tokio::test]
    async fn test_defaults_without_file() {
        let config = load_config_with_precedence(None, false, &CliOverrides::default())
            .await
            .unwrap();
        assert_eq!(config.service().base_url, "http://127.0.0.1:8080");
        assert_eq!(config.polling().csvgen_interval_ms, 100);
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected() {
        let cli = CliOverrides {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = load_config_with_precedence(None, false, &cli)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = load_config_with_precedence(
            Some(std::path::Path::new("/nonexistent/ingest.yaml")),
            false,
            &CliOverrides::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
