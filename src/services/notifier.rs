use async_trait::async_trait;

use crate::error::AppResult;

/// Delivery of the finished report as one opaque text payload. A failure
/// here surfaces to the caller: a computed-but-undelivered report has no
/// other recovery path.
#[async_trait]
pub trait NotifierService: Send + Sync {
    async fn deliver(&self, report: &str) -> AppResult<()>;
}
