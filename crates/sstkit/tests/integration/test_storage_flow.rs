//! Stores and identity through the public surface.

use serde_json::{json, Value};
use sstkit::Event;

use crate::common;

fn body_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

#[tokio::test]
async fn test_storage_and_data_layer_export_into_the_payload() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(common::test_config("di_demo", &collect).with_data_layer_name("DATA"));

    sstkit::cookies().add("CONSENT", "1");
    sstkit::local_storage().add("hello", "world");
    sstkit::session_storage().add("foo", "bar");
    sstkit::data_layer().add("optedIn", false);
    sstkit::data_layer().add("cart", json!({"items": 3}));

    let result = sstkit::track_event_with_result(Event::new("with_storage"))
        .await
        .unwrap();
    let body = body_json(&result.request_body);

    assert_eq!(body["dataLayer"]["DATA"]["optedIn"], false);
    assert_eq!(body["dataLayer"]["DATA"]["cart"]["items"], 3);

    let cookies = body["cookies"].as_array().unwrap();
    assert!(cookies
        .iter()
        .any(|c| c["name"] == "CONSENT" && c["value"] == "1"));
    // The identity rides along as the last cookie record
    assert_eq!(cookies.last().unwrap()["name"], "uuid");

    assert_eq!(
        body["localStorage"],
        json!([{"key": "hello", "value": "world"}])
    );
    assert_eq!(
        body["sessionStorage"],
        json!([{"key": "foo", "value": "bar"}])
    );
}

#[tokio::test]
async fn test_identity_is_stable_until_cleared() {
    let _guard = common::acquire_sdk();
    common::reset_stores();
    let collect = common::collect_server().await;
    sstkit::configure(common::test_config("di_demo", &collect));

    assert!(sstkit::uuid().is_none());
    sstkit::track_event_with_result(Event::new("first"))
        .await
        .unwrap();
    let minted = sstkit::uuid().expect("identity minted");

    sstkit::track_event_with_result(Event::new("second"))
        .await
        .unwrap();
    assert_eq!(sstkit::uuid(), Some(minted.clone()));

    sstkit::clear_uuid();
    sstkit::clear_uuid();
    assert!(sstkit::uuid().is_none());

    sstkit::track_event_with_result(Event::new("third"))
        .await
        .unwrap();
    let reborn = sstkit::uuid().expect("identity minted again");
    assert_ne!(minted, reborn);
}

#[tokio::test]
async fn test_store_accessors_round_trip_without_configuration() {
    let _guard = common::acquire_sdk();
    common::reset_stores();

    sstkit::cookies().add("a", "1");
    assert!(sstkit::cookies().contains("a"));
    assert_eq!(sstkit::cookies().get("a"), Some("1".to_string()));
    assert!(sstkit::cookies().remove("a"));
    assert!(!sstkit::cookies().remove("a"));

    sstkit::local_storage().add("hello", "world");
    assert!(sstkit::local_storage().contains("hello"));
    // Stores are isolated from one another
    assert!(!sstkit::session_storage().contains("hello"));
    sstkit::local_storage().clear();
    assert!(!sstkit::local_storage().contains("hello"));

    sstkit::data_layer().add("k", 5);
    assert_eq!(sstkit::data_layer().get("k"), Some(json!(5)));
    assert!(sstkit::data_layer().contains("k"));
    assert_eq!(sstkit::data_layer().all().len(), 1);
    assert!(sstkit::data_layer().remove("k"));
    assert!(sstkit::data_layer().all().is_empty());
}
