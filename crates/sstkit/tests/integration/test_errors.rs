//! Failure paths: dispatch errors, the diagnostic channel and truncation.

use serde::{Serialize, Serializer};
use serde_json::Value;
use sstkit::Event;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("no JSON form"))
    }
}

fn report_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_rejected_collection_status_reports_exactly_once() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/pc/.+"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&collect)
        .await;
    let nexus = common::nexus_server("acct").await;
    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(nexus.uri()));

    let result = sstkit::track_event_with_result(Event::new("refused")).await;
    assert!(result.is_none());

    let received = nexus.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let report = report_json(&received[0].body);
    assert_eq!(report["errorKind"], "NetworkError");
    assert_eq!(report["sourceFunctionName"], "sstkit.track_event");
    assert!(report["message"].is_string());
}

#[tokio::test]
async fn test_unreachable_collection_endpoint_reports_exactly_once() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let nexus = common::nexus_server("acct").await;
    // port 1 refuses connections without any DNS involved
    sstkit::configure(
        common::test_config("acct", &collect)
            .with_domain("http://127.0.0.1:1")
            .with_nexus_host(nexus.uri()),
    );

    let result = sstkit::track_event_with_result(Event::new("unreachable")).await;
    assert!(result.is_none());
    assert_eq!(nexus.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_send_error_reflects_the_channel_outcome() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let nexus = common::nexus_server("acct").await;

    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(nexus.uri()));
    assert!(sstkit::send_error("boom", "tests.send_error", "TestError").await);

    let report = report_json(&nexus.received_requests().await.unwrap()[0].body);
    assert_eq!(report["errorKind"], "TestError");
    assert_eq!(report["message"], "boom");
    assert_eq!(report["sourceFunctionName"], "tests.send_error");

    // A host that answers with anything non-2xx means false
    let rejecting = MockServer::start().await;
    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(rejecting.uri()));
    assert!(!sstkit::send_error("boom", "tests.send_error", "TestError").await);
}

#[tokio::test]
async fn test_send_error_is_false_for_unreachable_hosts() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(
        common::test_config("acct", &collect).with_nexus_host("http://127.0.0.1:1"),
    );

    assert!(!sstkit::send_error("foo", "bar", "baz").await);
}

#[tokio::test]
async fn test_oversized_messages_are_truncated_before_sending() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let nexus = common::nexus_server("acct").await;
    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(nexus.uri()));

    let message = "A".repeat(65_535);
    assert!(sstkit::send_error(&message, "tests.large", "TestError").await);

    let report = report_json(&nexus.received_requests().await.unwrap()[0].body);
    let sent = report["message"].as_str().unwrap();
    assert_eq!(sent.chars().count(), sstkit::MAX_ERROR_MESSAGE_LEN);
    assert!(sent.ends_with("..."));
}

#[tokio::test]
async fn test_unserializable_event_data_drops_the_event_and_reports() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let nexus = common::nexus_server("acct").await;
    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(nexus.uri()));

    let result = sstkit::track_event_with_result(
        Event::new("poisoned").with_data("poison", Unserializable),
    )
    .await;
    assert!(result.is_none());

    // Nothing reached the collection endpoint; one report reached nexus
    assert!(collect.received_requests().await.unwrap().is_empty());
    let received = nexus.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(report_json(&received[0].body)["errorKind"], "SerializationError");
}

#[tokio::test]
async fn test_data_layer_failure_reports_through_the_runtime_sink() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let nexus = common::nexus_server("acct").await;
    sstkit::configure(common::test_config("acct", &collect).with_nexus_host(nexus.uri()));

    sstkit::data_layer().add("bad", Unserializable);

    // The report rides a spawned task, so wait for it
    let received = common::wait_for_requests(&nexus, 1).await;
    assert_eq!(received.len(), 1);
    let report = report_json(&received[0].body);
    assert_eq!(report["errorKind"], "SerializationError");
    assert_eq!(report["sourceFunctionName"], "DataLayer.add");

    // And nothing was stored
    assert!(sstkit::data_layer().get("bad").is_none());
}
