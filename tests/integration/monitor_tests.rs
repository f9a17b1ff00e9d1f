//! Batch and CSV generation monitors driven over HTTP

#[cfg(test)]
mod tests {
    use crate::common::MockIngestService;
    use crate::common::fixtures::{flagged_status_json, result_row, status_json};
    use ingest_console::core::monitor::{AlertLevel, EMPTY_BATCH_TEXT, INPUT_FORMAT_ERROR_TEXT};
    use ingest_console::core::types::{
        CsvGenerationRequest, CsvUploadRequest, DirectoryUploadRequest, ErrorFlag, JobKind,
    };
    use ingest_console::{
        BatchMonitor, BatchOutcome, CsvGenMonitor, CsvGenOutcome, MonitorEvent, MonitorState,
        PollSchedule,
    };
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn fast_schedule() -> PollSchedule {
        PollSchedule::flat(Duration::from_millis(10))
    }

    fn drain(rx: &mut UnboundedReceiver<MonitorEvent>) -> Vec<MonitorEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn alert_messages(events: &[MonitorEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                MonitorEvent::Alert(alert) => Some(alert.message.clone()),
                _ => None,
            })
            .collect()
    }

    async fn accept_submissions(svc: &MockIngestService) {
        for endpoint in ["/services", "/services/csv"] {
            Mock::given(method("POST"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200))
                .mount(&svc.server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_directory_upload_to_success() {
        let svc = MockIngestService::start().await;
        accept_submissions(&svc).await;
        svc.mount_get_sequence(
            "/services/progress",
            vec![
                status_json(2, 0, 0, 0, false),
                status_json(2, 1, 0, 0, false),
                status_json(2, 2, 0, 0, true),
            ],
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/services/result"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                result_row("a.jpg", None, Some("http://media/a")),
                result_row("b.jpg", None, Some("http://media/b")),
            ])))
            .expect(1)
            .mount(&svc.server)
            .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let outcome = monitor
            .submit_and_watch(DirectoryUploadRequest::new("/data/images").into())
            .await
            .unwrap();

        assert_eq!(outcome, BatchOutcome::Success);
        assert_eq!(monitor.polls_done(), 3);
        assert!(monitor.form_enabled());

        let events = drain(&mut rx);
        let percents: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                MonitorEvent::Progress { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, vec![0, 50, 100]);
        assert_eq!(
            alert_messages(&events),
            vec!["Upload finished: 2 of 2 items uploaded successfully."]
        );
        assert_eq!(
            events.first(),
            Some(&MonitorEvent::StateChanged(MonitorState::Submitting))
        );
    }

    #[tokio::test]
    async fn test_partial_failure_then_retry() {
        let svc = MockIngestService::start().await;
        accept_submissions(&svc).await;
        svc.mount_get_sequence(
            "/services/progress",
            vec![status_json(4, 2, 2, 0, true), status_json(2, 2, 0, 0, true)],
        )
        .await;
        svc.mount_get_sequence(
            "/services/result",
            vec![json!([result_row("a.jpg", Some("Timed out"), None)])],
        )
        .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let request = CsvUploadRequest::new("/data/list.csv", "rs-1");
        let outcome = monitor.submit_and_watch(request.into()).await.unwrap();
        assert_eq!(outcome, BatchOutcome::PartialFailure);

        let events = drain(&mut rx);
        let retry_alert = events.iter().find_map(|e| match e {
            MonitorEvent::Alert(alert) => Some(alert.clone()),
            _ => None,
        });
        let retry_alert = retry_alert.unwrap();
        assert_eq!(retry_alert.level, AlertLevel::Warning);
        assert!(retry_alert.retry_offered);

        let outcome = monitor.retry_and_watch(JobKind::Csv).await.unwrap();
        assert_eq!(outcome, BatchOutcome::Success);

        let posts = svc.requests_to("POST", "/services/csv").await;
        assert_eq!(posts.len(), 2);
        assert!(posts[1].body.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_never_fetches_results() {
        let svc = MockIngestService::start().await;
        accept_submissions(&svc).await;
        svc.mount_get_sequence("/services/progress", vec![status_json(0, 0, 0, 0, true)])
            .await;
        svc.mount_get_sequence("/services/batch", vec![json!({"finished": true})])
            .await;
        Mock::given(method("GET"))
            .and(path("/services/result"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&svc.server)
            .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let outcome = monitor
            .submit_and_watch(DirectoryUploadRequest::new("/data/empty").into())
            .await
            .unwrap();

        assert_eq!(outcome, BatchOutcome::Empty { error_code: None });
        assert_eq!(alert_messages(&drain(&mut rx)), vec![EMPTY_BATCH_TEXT]);
    }

    #[tokio::test]
    async fn test_malformed_csv_stops_polling() {
        let svc = MockIngestService::start().await;
        accept_submissions(&svc).await;
        svc.mount_get_sequence("/services/progress", vec![flagged_status_json(false, true)])
            .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let outcome = monitor
            .submit_and_watch(CsvUploadRequest::new("/data/bad.csv", "rs-1").into())
            .await
            .unwrap();

        assert_eq!(outcome, BatchOutcome::FatalError(ErrorFlag::InputFormatError));
        assert!(outcome.is_failure());
        assert_eq!(monitor.polls_done(), 1);
        assert_eq!(alert_messages(&drain(&mut rx)), vec![INPUT_FORMAT_ERROR_TEXT]);
    }

    #[tokio::test]
    async fn test_rejected_submission_never_polls() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(409).set_body_string("Root directory does not exist."))
            .mount(&svc.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_json(1, 0, 0, 0, false)))
            .expect(0)
            .mount(&svc.server)
            .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let result = monitor
            .submit_and_watch(DirectoryUploadRequest::new("/missing").into())
            .await;

        assert!(result.is_err());
        assert!(monitor.form_enabled());
        assert_eq!(monitor.state(), &MonitorState::Idle);
        let events = drain(&mut rx);
        assert!(!events.contains(&MonitorEvent::FormEnabled(false)));
        assert_eq!(
            alert_messages(&events),
            vec!["Error! Root directory does not exist."]
        );
    }

    #[tokio::test]
    async fn test_progress_endpoint_failure_aborts() {
        let svc = MockIngestService::start().await;
        accept_submissions(&svc).await;
        Mock::given(method("GET"))
            .and(path("/services/progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_json(3, 1, 0, 0, false)))
            .up_to_n_times(1)
            .mount(&svc.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/progress"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&svc.server)
            .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = BatchMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let outcome = monitor
            .submit_and_watch(DirectoryUploadRequest::new("/data/images").into())
            .await
            .unwrap();

        assert_eq!(outcome, BatchOutcome::Aborted);
        assert!(monitor.form_enabled());
        let messages = alert_messages(&drain(&mut rx));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error! "));
    }

    #[tokio::test]
    async fn test_csv_generation_over_http() {
        let svc = MockIngestService::start().await;
        Mock::given(method("POST"))
            .and(path("/services/generatecsv"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&svc.server)
            .await;
        svc.mount_get_sequence(
            "/services/csvgenprogress",
            vec![
                json!({"count": 10, "result": 0, "targetfile": null, "error": null}),
                json!({"count": 20, "result": 1, "targetfile": "/tmp/gen.csv", "error": null}),
            ],
        )
        .await;

        let (tx, mut rx) = unbounded_channel();
        let mut monitor = CsvGenMonitor::new(svc.client.clone(), fast_schedule(), tx);
        let outcome = monitor
            .generate(CsvGenerationRequest::new("/data/images"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CsvGenOutcome::Saved {
                target_file: "/tmp/gen.csv".to_string()
            }
        );
        assert_eq!(
            alert_messages(&drain(&mut rx)),
            vec!["The CSV file is successfully saved to: /tmp/gen.csv"]
        );
    }
}
