//! Verify building and classification against JSON vectors in `test-vectors/`.
//!
//! Payloads are compared as parsed JSON, not raw strings, to avoid false
//! negatives from whitespace differences.

use fdb_core::{
    classify, ClientConfig, Credentials, HttpResponse, Outcome, QueryParams, RequestBuilder,
    ResourcePath,
};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let raw = include_str!("../../test-vectors/build.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let builder = RequestBuilder::new(ClientConfig::new(vectors["base_url"].as_str().unwrap()));
    let creds = Credentials::new(
        vectors["credentials"]["client_id"].as_str().unwrap(),
        vectors["credentials"]["client_secret"].as_str().unwrap(),
    )
    .unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let path = ResourcePath::parse(case["path"].as_str().unwrap());
        let params: QueryParams = case["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let pair = pair.as_array().unwrap();
                (pair[0].as_str().unwrap(), pair[1].as_str().unwrap())
            })
            .collect();

        let req = builder.build(&path, &params, &creds);
        assert_eq!(req.url, case["expected_url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.url.matches("callSystemName=").count(), 1, "{name}: callSystemName count");
        assert_eq!(req.header("Authorization"), Some("SHAREDKEY 1234:abcd"), "{name}: auth");
        assert_eq!(req.header("Accept"), Some("application/json"), "{name}: accept");
    }
}

// ---------------------------------------------------------------------------
// Classify
// ---------------------------------------------------------------------------

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap();
        let result = Ok(HttpResponse::new(status, body));

        let outcome = classify(&result);
        assert_eq!(outcome.tag(), case["expected_tag"].as_str().unwrap(), "{name}: tag");
        assert_eq!(outcome, classify(&result), "{name}: idempotent");

        match &outcome {
            Outcome::Success {
                status_code,
                payload,
            } => {
                assert_eq!(*status_code, status, "{name}: status preserved");
                let expected = &case["expected_payload"];
                match payload {
                    Some(value) => assert_eq!(value, expected, "{name}: payload"),
                    None => assert!(expected.is_null(), "{name}: expected a payload"),
                }
            }
            Outcome::Error {
                status_code, body, ..
            } => {
                assert_eq!(*status_code, Some(status), "{name}: status");
                assert_eq!(
                    body.as_deref(),
                    case["expected_body"].as_str(),
                    "{name}: raw body"
                );
            }
            Outcome::NoResults { .. } | Outcome::AuthFailure { .. } => {
                assert!(outcome.payload().is_none(), "{name}: no payload");
            }
        }
    }
}
