pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RequestFailure;

/// Sends a JSON body somewhere and hands back whatever JSON came back.
///
/// Implementations must not inspect the response beyond decoding it: any
/// reply whose body is valid JSON counts as success, whatever its status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, RequestFailure>;
}
