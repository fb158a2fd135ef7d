//! End-to-end tests for the reconciliation pipeline

use async_trait::async_trait;
use serde_json::{Value, json};
use vegashape_core::{
    ExactDiff, JsonRoundTrip, MessageCodec, Result, ShapeError, reconcile, to_json_string,
};

/// Codec whose decode side returns a canned tree, standing in for a schema
/// codec that wraps envelopes and fills in defaulted fields.
struct CannedCodec {
    decoded: Value,
}

#[async_trait]
impl MessageCodec for CannedCodec {
    async fn encode(&self, tree: &Value) -> Result<Vec<u8>> {
        serde_json::to_vec(tree).map_err(|e| ShapeError::codec_error(e.to_string()))
    }

    async fn decode(&self, _bytes: &[u8]) -> Result<Value> {
        Ok(self.decoded.clone())
    }
}

/// Codec that always fails to encode
struct BrokenCodec;

#[async_trait]
impl MessageCodec for BrokenCodec {
    async fn encode(&self, _tree: &Value) -> Result<Vec<u8>> {
        Err(ShapeError::codec_error("field of unknown type"))
    }

    async fn decode(&self, _bytes: &[u8]) -> Result<Value> {
        Err(ShapeError::codec_error("unreachable"))
    }
}

#[tokio::test]
async fn transfer_envelope_is_unwrapped() {
    let document = json!({"transfer": {"kind": {"oneOff": {"amount": "100"}}}});
    let check = reconcile(&document, &JsonRoundTrip, &ExactDiff).await;

    assert_eq!(check.error, None);
    assert_eq!(check.left, Some(document));
    assert_eq!(
        check.right,
        Some(json!({"transfer": {"oneOff": {"amount": "100"}}}))
    );
    // envelope stripping changed the shape, so a delta is reported
    assert!(check.delta.is_some());
}

#[tokio::test]
async fn schema_normalization_round_trips_clean() {
    // What the user typed (Go wire shape)
    let document = json!({
        "transfer": {"oneOff": {"deliverOn": "0"}}
    });
    // What the schema codec hands back: envelope wrapping plus a defaulted
    // field that prunes away
    let decoded = json!({
        "transfer": {"kind": {"oneOff": {"deliverOn": "0"}}},
        "blockHeight": null
    });
    let codec = CannedCodec { decoded };
    let check = reconcile(&document, &codec, &ExactDiff).await;

    assert_eq!(check.error, None);
    assert_eq!(check.right, check.left);
    assert_eq!(check.delta, None);
}

#[tokio::test]
async fn codec_failure_keeps_left() {
    let document = json!({"transfer": {"amount": "100"}});
    let check = reconcile(&document, &BrokenCodec, &ExactDiff).await;

    let error = check.error.expect("codec error should be captured");
    assert!(error.contains("field of unknown type"));
    assert_eq!(check.left, Some(document));
    assert_eq!(check.right, None);
    assert_eq!(check.delta, None);
}

#[tokio::test]
async fn override_fixture_forces_right() {
    let document = json!("edd smells bad");
    let check = reconcile(&document, &JsonRoundTrip, &ExactDiff).await;

    assert_eq!(check.error, None);
    assert_eq!(check.right, Some(json!("edd smells")));
    assert!(check.delta.is_some());
}

#[tokio::test]
async fn wide_integers_survive_the_left_side() {
    let document: Value =
        serde_json::from_str(r#"{"amount": 123456789012345678901234567890, "max": 9223372036854775807}"#)
            .unwrap();
    let check = reconcile(&document, &JsonRoundTrip, &ExactDiff).await;

    let left = check.left.expect("left should be computed");
    let text = to_json_string(&left, 0).unwrap();
    assert!(text.contains("123456789012345678901234567890"));
    assert!(text.contains("9223372036854775807"));
}

#[tokio::test]
async fn defaulted_nulls_are_pruned_from_right() {
    let document = json!({"withdrawSubmission": {"amount": "5"}});
    let decoded = json!({
        "withdrawSubmission": {"amount": "5", "ext": null}
    });
    let codec = CannedCodec { decoded };
    let check = reconcile(&document, &codec, &ExactDiff).await;

    assert_eq!(check.error, None);
    assert_eq!(check.right, check.left);
    assert_eq!(check.delta, None);
}
