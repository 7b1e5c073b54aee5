//! Verify request construction and document decoding against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the request they should produce or the
//! wire bodies they should decode to, and the expected outcome. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field-ordering
//! differences.

use std::time::Duration;

use pdfgate::{Error, GeneratePdfParams, HttpMethod, Payload, RequestBuilder};

const BASE_URL: &str = "http://localhost:4000";

fn builder() -> RequestBuilder {
    RequestBuilder::with_base_url("test_vectors", BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[test]
fn generate_test_vectors() {
    let raw = include_str!("../../test-vectors/generate.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let b = builder();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: GeneratePdfParams = serde_json::from_value(case["input"].clone()).unwrap();

        let result = b.build_generate_pdf(&input);
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "params" => {
                    assert!(matches!(err, Error::Params(_)), "{name}: expected Params, got {err:?}")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let req = result.unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(
            req.timeout,
            Duration::from_secs(expected_req["timeout_seconds"].as_u64().unwrap()),
            "{name}: timeout"
        );
        assert_eq!(
            req.headers,
            vec![("Authorization".to_string(), "Bearer test_vectors".to_string())],
            "{name}: headers"
        );

        let body = match &req.payload {
            Payload::Json(body) => body,
            other => panic!("{name}: expected a JSON payload, got {other:?}"),
        };
        assert_eq!(body, &expected_req["body"], "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn document_test_vectors() {
    let raw = include_str!("../../test-vectors/documents.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = serde_json::to_vec(&case["response_body"]).unwrap();

        let result = pdfgate::response::decode_document(&body);
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            let field = expected_error["field"].as_str().unwrap();
            match expected_error["kind"].as_str().unwrap() {
                "missing_field" => match err {
                    Error::MissingField(f) => assert_eq!(f, field, "{name}: field"),
                    other => panic!("{name}: expected MissingField, got {other:?}"),
                },
                "type_mismatch" => match err {
                    Error::TypeMismatch { field: f, .. } => assert_eq!(f, field, "{name}: field"),
                    other => panic!("{name}: expected TypeMismatch, got {other:?}"),
                },
                other => panic!("{name}: unknown expected_error kind: {other}"),
            }
            continue;
        }

        let doc = result.unwrap();
        let expected = &case["expected"];
        assert_eq!(doc.id, expected["id"].as_str().unwrap(), "{name}: id");
        assert_eq!(doc.status.as_str(), expected["status"].as_str().unwrap(), "{name}: status");
        assert_eq!(doc.document_type.map(|t| t.as_str()), expected["type"].as_str(), "{name}: type");
        assert_eq!(doc.file_url.as_deref(), expected["file_url"].as_str(), "{name}: file_url");
        assert_eq!(doc.size, expected["size"].as_u64(), "{name}: size");
        assert_eq!(doc.derived_from.as_deref(), expected["derived_from"].as_str(), "{name}: derived_from");
    }
}
