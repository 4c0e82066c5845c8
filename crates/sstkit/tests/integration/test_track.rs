//! End-to-end tracking against a mock collection endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sstkit::{Config, Event, IModel, ModelContext};

use crate::common;

fn body_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

struct ConsentModel;

#[async_trait]
impl IModel for ConsentModel {
    fn key(&self) -> &str {
        "consent"
    }

    fn version(&self) -> &str {
        "2.1.0"
    }

    async fn evaluate(&self, _event: &Event, _ctx: &ModelContext) -> anyhow::Result<Value> {
        Ok(Value::String("granted".to_string()))
    }
}

struct BrokenModel;

#[async_trait]
impl IModel for BrokenModel {
    fn key(&self) -> &str {
        "broken"
    }

    async fn evaluate(&self, _event: &Event, _ctx: &ModelContext) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("backend down"))
    }
}

#[tokio::test]
async fn test_tracked_event_carries_the_full_payload_shape() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let config = common::test_config("di_demo", &collect);
    let expected_ua = config.virtual_browser.user_agent.clone();
    sstkit::configure(config);

    let result = sstkit::track_event_with_result(Event::new("shape_check").with_data("answer", 42))
        .await
        .expect("event should send");

    let body = body_json(&result.request_body);
    let mobile = &body["dataLayer"]["__mobileData"];

    for field in ["build", "name", "namespace", "version"] {
        assert!(mobile["app"].get(field).is_some(), "missing app.{field}");
    }
    for field in ["architecture", "id", "manufacturer", "model"] {
        assert!(mobile["device"].get(field).is_some(), "missing device.{field}");
    }
    assert!(mobile["device"]["os"].get("name").is_some());
    assert!(mobile["device"]["os"].get("version").is_some());
    for field in ["orientation", "width", "height"] {
        assert!(mobile["device"]["screen"].get(field).is_some());
    }
    assert_eq!(mobile["library"]["name"], "sstkit");
    assert_eq!(mobile["library"]["version"], "1.0.0");
    assert!(mobile["library"].get("models").is_some());

    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "shape_check");
    assert_eq!(events[0]["data"]["answer"], 42);
    assert_eq!(events[0]["data"]["__timestamp"], common::FIXED_MILLIS);

    assert_eq!(body["settings"]["publishPath"], "sst");
    assert_eq!(body["settings"]["nexusHost"], collect.uri());
    for field in ["height", "width", "language", "timezone"] {
        assert!(body["virtualBrowser"].get(field).is_some());
    }

    // The endpoint received exactly the body and headers the result reports
    let received = collect.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].body, result.request_body.as_bytes());
    assert_eq!(result.user_agent, expected_ua);
    assert_eq!(
        received[0]
            .headers
            .get("user-agent")
            .unwrap()
            .to_str()
            .unwrap(),
        expected_ua
    );
}

#[tokio::test]
async fn test_url_is_exact_with_sorted_and_encoded_parameters() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(common::test_config("di_demo", &collect));

    let event = Event::new("url_check")
        .with_parameter("sstOrigin", "blah")
        .with_parameter("foo", "bar")
        .with_parameter("test foo", "true&1337 baz=");
    let result = sstkit::track_event_with_result(event).await.unwrap();

    assert_eq!(
        result.url,
        format!(
            "{}/pc/di_demo/sst?foo=bar&sstOrigin=mobile&sstVersion=1.0.0&test%20foo=true%261337%20baz%3D",
            collect.uri()
        )
    );
}

#[tokio::test]
async fn test_caller_timestamp_passes_through_whatever_its_type() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(common::test_config("di_demo", &collect));

    let result =
        sstkit::track_event_with_result(Event::new("ts_check").with_data("__timestamp", "foo"))
            .await
            .unwrap();

    let body = body_json(&result.request_body);
    assert_eq!(body["events"][0]["data"]["__timestamp"], "foo");
}

#[tokio::test]
async fn test_custom_model_composes_and_reports_its_version() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let models = sstkit::required().add(Arc::new(ConsentModel));
    sstkit::configure(common::test_config("di_demo", &collect).with_models(models));

    let result = sstkit::track_event_with_result(Event::new("custom_model"))
        .await
        .unwrap();

    let body = body_json(&result.request_body);
    assert_eq!(body["dataLayer"]["__mobileData"]["consent"], "granted");
    assert_eq!(
        body["dataLayer"]["__mobileData"]["library"]["models"]["consent"],
        "2.1.0"
    );
}

#[tokio::test]
async fn test_explicit_model_set_still_carries_the_builtins() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    // A whole-set registration, not required().add: the built-ins must
    // survive it.
    let models = sstkit::Models::new(vec![Arc::new(ConsentModel) as Arc<dyn IModel>]).unwrap();
    sstkit::configure(common::test_config("di_demo", &collect).with_models(models));

    let result = sstkit::track_event_with_result(Event::new("explicit_set"))
        .await
        .unwrap();

    let mobile = body_json(&result.request_body)["dataLayer"]["__mobileData"].clone();
    for key in ["app", "device", "library", "consent"] {
        assert!(mobile.get(key).is_some(), "missing {key}");
    }
    assert_eq!(mobile["consent"], "granted");
    assert_eq!(mobile["library"]["models"]["consent"], "2.1.0");
}

#[tokio::test]
async fn test_failing_model_is_omitted_but_the_event_still_sends() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let models = sstkit::required().add(Arc::new(BrokenModel));
    sstkit::configure(common::test_config("di_demo", &collect).with_models(models));

    let result = sstkit::track_event_with_result(Event::new("partial"))
        .await
        .expect("event should send without the broken model");

    let mobile = body_json(&result.request_body)["dataLayer"]["__mobileData"].clone();
    assert!(mobile.get("broken").is_none());
    assert!(mobile.get("app").is_some());
    assert!(mobile.get("device").is_some());
    assert!(mobile.get("library").is_some());
}

#[tokio::test]
async fn test_opt_out_parameter_suppresses_the_identity_cookie() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(common::test_config("di_demo", &collect));

    // An opted-out event on a fresh install never mints an identity
    let anonymous = sstkit::track_event_with_result(
        Event::new("anonymous").with_parameter("ensDisableTracking", "user"),
    )
    .await
    .unwrap();
    assert!(body_json(&anonymous.request_body).get("cookies").is_none());
    assert!(anonymous.url.contains("ensDisableTracking=user"));
    assert!(sstkit::uuid().is_none());

    // A normal event mints one and sends it as a cookie record
    let tracked = sstkit::track_event_with_result(Event::new("tracked"))
        .await
        .unwrap();
    let stored = sstkit::uuid().expect("identity minted");
    let cookies = body_json(&tracked.request_body)["cookies"].clone();
    assert_eq!(cookies[0]["name"], "uuid");
    assert_eq!(cookies[0]["value"], stored.as_str());

    // Opting out afterwards leaves the stored identity alone
    let later = sstkit::track_event_with_result(
        Event::new("anonymous_again").with_parameter("ensDisableTracking", "1"),
    )
    .await
    .unwrap();
    assert!(body_json(&later.request_body).get("cookies").is_none());
    assert_eq!(sstkit::uuid(), Some(stored));
}

#[tokio::test]
async fn test_empty_user_agent_is_not_sent_as_a_header() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    let config = common::test_config("di_demo", &collect);
    let browser = sstkit::VirtualBrowser {
        user_agent: String::new(),
        ..config.virtual_browser.clone()
    };
    sstkit::configure(config.with_virtual_browser(browser));

    let result = sstkit::track_event_with_result(Event::new("no_ua"))
        .await
        .unwrap();

    assert_eq!(result.user_agent, "");
    let received = collect.received_requests().await.unwrap();
    assert!(received[0].headers.get("user-agent").is_none());
}

#[tokio::test]
async fn test_invalid_domain_leaves_tracking_inert() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    sstkit::configure(Config::new("acct").with_domain("not a domain"));

    assert!(sstkit::track_event_with_result(Event::new("dropped"))
        .await
        .is_none());

    // Storage keeps working while tracking is inert
    sstkit::cookies().add("k", "v");
    assert_eq!(sstkit::cookies().get("k"), Some("v".to_string()));
    assert!(sstkit::uuid().is_none());
}
