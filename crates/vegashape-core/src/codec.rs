//! Boundary capabilities: the schema codec and the structural differ
//!
//! The engine treats both as opaque, possibly-async collaborators. The real
//! deployment plugs in a protobuf codec driven by remote descriptors and a
//! full edit-script differ; the built-ins here are the minimal versions that
//! keep the pipeline runnable end-to-end.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::ShapeError;
use crate::result::Result;

/// Opaque structural-diff result
pub type Delta = Value;

/// Binary encode/decode against an external schema.
///
/// Encoding then decoding a document reveals how the schema-driven system
/// normalizes it: unknown keys vanish and defaulted fields appear.
#[async_trait]
pub trait MessageCodec: Send + Sync {
    async fn encode(&self, tree: &Value) -> Result<Vec<u8>>;
    async fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

/// Structural comparison of two trees.
///
/// `None` means "no differences"; the shape of a `Some` delta is owned by
/// the implementation.
#[async_trait]
pub trait TreeDiff: Send + Sync {
    async fn diff(&self, left: &Value, right: &Value) -> Result<Option<Delta>>;
}

/// Codec that round-trips through JSON text.
///
/// Performs no schema normalization; useful for exercising the pipeline and
/// as a stand-in where only the rewrite/prune stages matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRoundTrip;

#[async_trait]
impl MessageCodec for JsonRoundTrip {
    async fn encode(&self, tree: &Value) -> Result<Vec<u8>> {
        serde_json::to_vec(tree).map_err(|e| ShapeError::codec_error(e.to_string()))
    }

    async fn decode(&self, bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes).map_err(|e| ShapeError::codec_error(e.to_string()))
    }
}

/// Differ that reports whole-tree equality only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactDiff;

#[async_trait]
impl TreeDiff for ExactDiff {
    async fn diff(&self, left: &Value, right: &Value) -> Result<Option<Delta>> {
        if left == right {
            Ok(None)
        } else {
            Ok(Some(json!({"left": left, "right": right})))
        }
    }
}
