//! HttpIngestClient against a mock ingestion service

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ACCOUNT_UUID, API_KEY, result_row, status_json};
    use crate::common::{MockIngestService, form_fields};
    use ingest_console::core::service::{
        AuthService, BatchService, CsvGenService, HistoryService, PreferenceService,
    };
    use ingest_console::core::types::{
        CsvGenState, CsvGenerationRequest, CsvUploadRequest, DirectoryUploadRequest, ErrorFlag,
        GuidSyntax, JobKind, RowOutcome, Submission, WRONG_COMBINATION,
    };
    use ingest_console::{HttpIngestClient, IngestError};
    use ingest_console::config::ServiceConfig;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_directory_submission_sends_root_path() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&svc.server)
            .await;

        let ack = svc
            .client
            .submit(&Submission::New(
                DirectoryUploadRequest::new("/data/my images").into(),
            ))
            .await
            .unwrap();
        assert_eq!(ack.kind, JobKind::Directory);
        assert!(!ack.resumed);

        let requests = svc.requests_to("POST", "/services").await;
        let fields = form_fields(&requests[0]);
        assert_eq!(fields.get("rootPath").map(String::as_str), Some("/data/my images"));
    }

    #[tokio::test]
    async fn test_csv_submission_encodes_values_as_json() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services/csv"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&svc.server)
            .await;

        let request = CsvUploadRequest {
            license: Some("CC BY".to_string()),
            funding_purpose: Some("Digitize \"type\" specimens\\2024".to_string()),
            ..CsvUploadRequest::new("C:\\data\\list.csv", "rs-42")
        };
        svc.client
            .submit(&Submission::New(request.into()))
            .await
            .unwrap();

        let requests = svc.requests_to("POST", "/services/csv").await;
        let fields = form_fields(&requests[0]);
        let values: Value = serde_json::from_str(&fields["values"]).unwrap();
        assert_eq!(values["CSVfilePath"], "C:\\data\\list.csv");
        assert_eq!(values["RecordSetGUID"], "rs-42");
        assert_eq!(values["RightsLicense"], "CC BY");
        assert_eq!(values["FundingPurpose"], "Digitize \"type\" specimens\\2024");
        assert!(values.get("FundingSource").is_none());
    }

    #[tokio::test]
    async fn test_resume_posts_empty_form() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services/csv"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&svc.server)
            .await;

        let ack = svc
            .client
            .submit(&Submission::Resume(JobKind::Csv))
            .await
            .unwrap();
        assert!(ack.resumed);

        let requests = svc.requests_to("POST", "/services/csv").await;
        assert!(form_fields(&requests[0]).is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submission_carries_service_message() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(409).set_body_string("Root directory does not exist."))
            .mount(&svc.server)
            .await;

        let err = svc
            .client
            .submit(&Submission::New(DirectoryUploadRequest::new("/missing").into()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Root directory does not exist.");
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_status_and_flags() {
        let svc = MockIngestService::start().await;
        svc.mount_get_sequence(
            "/services/progress",
            vec![
                status_json(10, 3, 1, 1, false),
                json!({"fatal_server_error": true, "total": 10, "finished": false}),
            ],
        )
        .await;

        let status = svc.client.status().await.unwrap();
        assert_eq!(status.total, 10);
        assert_eq!(status.processed(), 5);
        assert_eq!(status.percent(), 50);
        assert!(status.error_flags.is_empty());

        let status = svc.client.status().await.unwrap();
        assert_eq!(status.terminal_flag(), Some(ErrorFlag::FatalServerError));
        assert_eq!(status.successes, 0);
    }

    #[tokio::test]
    async fn test_malformed_status_is_not_transport_error() {
        let svc = MockIngestService::start().await;
        Mock::given(method("GET"))
            .and(path("/services/progress"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&svc.server)
            .await;

        let err = svc.client.status().await.unwrap_err();
        assert!(matches!(err, IngestError::Rejected { .. }));
        assert!(err.to_string().starts_with("Malformed response"));
    }

    #[tokio::test]
    async fn test_results_rows() {
        let svc = MockIngestService::start().await;
        svc.mount_get_sequence(
            "/services/result",
            vec![json!([
                result_row("a.jpg", None, Some("http://media/a")),
                result_row("b.jpg", Some("Checksum mismatch"), None),
                {"OriginalFileName": "c.jpg", "MediaError": "", "MediaURL": null},
            ])],
        )
        .await;

        let rows = svc.client.results().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].outcome(), RowOutcome::Uploaded("http://media/a"));
        assert_eq!(rows[0].media_guid.as_deref(), Some("guid-a.jpg"));
        assert_eq!(rows[1].outcome(), RowOutcome::Failed("Checksum mismatch"));
        assert_eq!(rows[2].outcome(), RowOutcome::NotUploaded);
    }

    #[tokio::test]
    async fn test_last_batch_info() {
        let svc = MockIngestService::start().await;
        svc.mount_get_sequence(
            "/services/batch",
            vec![json!({
                "path": "/data/images",
                "start_time": "2024-03-01 10:00:00",
                "finished": false
            })],
        )
        .await;

        let info = svc.client.last_batch().await.unwrap();
        assert!(info.needs_retry());
        assert!(info.unfinished_warning().unwrap().contains("/data/images"));
    }

    #[tokio::test]
    async fn test_preferences_roundtrip() {
        let svc = MockIngestService::start().await;
        Mock::given(method("GET"))
            .and(path("/services/config"))
            .and(query_param("name", "rsguid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("rs-42")))
            .mount(&svc.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/config"))
            .and(query_param("name", "imagelicense"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not such config option is found."))
            .mount(&svc.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/services/config"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&svc.server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/services/config"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&svc.server)
            .await;

        assert_eq!(
            svc.client.get_preference("rsguid").await.unwrap().as_deref(),
            Some("rs-42")
        );
        assert_eq!(svc.client.get_preference("imagelicense").await.unwrap(), None);

        svc.client.set_preference("idsyntax", "filename").await.unwrap();
        let posted = svc.requests_to("POST", "/services/config").await;
        let fields = form_fields(&posted[0]);
        assert_eq!(fields["name"], "idsyntax");
        assert_eq!(fields["value"], "filename");

        svc.client.clear_preferences().await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_in_outcomes() {
        let svc = MockIngestService::start().await;
        Mock::given(method("GET"))
            .and(path("/services/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .mount(&svc.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/services/auth"))
            .respond_with(ResponseTemplate::new(409).set_body_string("Authentication combination incorrect."))
            .up_to_n_times(1)
            .mount(&svc.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/services/auth"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Currently Unavailable."))
            .mount(&svc.server)
            .await;

        assert!(svc.client.is_signed_in().await.unwrap());

        let err = svc.client.sign_in(ACCOUNT_UUID, API_KEY).await.unwrap_err();
        assert!(matches!(err, IngestError::Unauthorized(ref m) if m == WRONG_COMBINATION));

        let err = svc.client.sign_in(ACCOUNT_UUID, API_KEY).await.unwrap_err();
        assert!(matches!(err, IngestError::ServiceUnavailable(_)));

        let posted = svc.requests_to("POST", "/services/auth").await;
        let fields = form_fields(&posted[0]);
        assert_eq!(fields["user"], ACCOUNT_UUID);
        assert_eq!(fields["password"], API_KEY);
    }

    #[tokio::test]
    async fn test_history() {
        let svc = MockIngestService::start().await;
        Mock::given(method("GET"))
            .and(path("/services/history"))
            .and(query_param("table_id", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
                7, "/data/list.csv", null, null, null, null, "rs-42", null,
                "2024-03-01 10:00:00", "2024-03-01 10:30:00", null, null, null, null, null, 120
            ]])))
            .mount(&svc.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/history"))
            .and(query_param("table_id", "7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([result_row("a.jpg", None, Some("http://media/a"))])),
            )
            .mount(&svc.server)
            .await;

        let batches = svc.client.batches().await.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].id, "7");
        assert_eq!(batches[0].record_set_guid.as_deref(), Some("rs-42"));
        assert_eq!(batches[0].records.as_deref(), Some("120"));
        assert!(batches[0].is_finished());

        let records = svc.client.batch_records("7").await.unwrap();
        assert_eq!(records[0].local_identifier, "a.jpg");
    }

    #[tokio::test]
    async fn test_csv_generation_endpoints() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services/generatecsv"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&svc.server)
            .await;
        svc.mount_get_sequence(
            "/services/csvgenprogress",
            vec![json!({"count": 4, "result": 1, "targetfile": "D:\\\\out\\\\a.csv", "error": null})],
        )
        .await;

        let request = CsvGenerationRequest {
            guid_syntax: GuidSyntax::Fullpath,
            guid_prefix: Some("urn:x:".to_string()),
            ..CsvGenerationRequest::new("/data/images")
        };
        svc.client.start_generation(&request).await.unwrap();

        let posted = svc.requests_to("POST", "/services/generatecsv").await;
        let values: Value = serde_json::from_str(&form_fields(&posted[0])["values"]).unwrap();
        assert_eq!(values["g-imagedir"], "/data/images");
        assert_eq!(values["g-guidsyntax"], "fullpath");
        assert_eq!(values["g-guidprefix"], "urn:x:");

        let status = svc.client.generation_status().await.unwrap();
        assert_eq!(
            status.state(),
            CsvGenState::Saved {
                target_file: "D:\\out\\a.csv".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let config = ServiceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: 2,
            ..Default::default()
        };
        let client = HttpIngestClient::new(&config).unwrap();
        let err = client.status().await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.is_retryable());
    }
}
