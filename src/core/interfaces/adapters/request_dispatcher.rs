use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::models::{RequestDescriptor, RequestError, ResponsePayload};

#[async_trait]
pub trait RequestDispatcher: Send + Sync {
    async fn dispatch(&self, descriptor: RequestDescriptor)
        -> Result<ResponsePayload, RequestError>;

    /// Dropping the in-flight dispatch future aborts the underlying request.
    async fn dispatch_cancellable(
        &self,
        descriptor: RequestDescriptor,
        cancellation: CancellationToken,
    ) -> Result<ResponsePayload, RequestError> {
        let url = descriptor.url().to_string();

        if cancellation.is_cancelled() {
            log::debug!("[DISPATCH] Token already cancelled, skipping {}", url);
            return Err(RequestError::cancelled(url));
        }

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                log::info!("[DISPATCH] Request to {} cancelled", url);
                Err(RequestError::cancelled(url))
            }
            result = self.dispatch(descriptor) => result,
        }
    }
}
