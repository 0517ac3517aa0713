use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::interfaces::adapters::RequestDispatcher;
use crate::core::models::{
    InpaintRequest, InpaintResponse, RequestDescriptor, RequestError, ResponsePayload,
};
use crate::global_constants;

/// Named operations of the inpainting backend.
#[derive(Clone)]
pub struct ImageApi {
    dispatcher: Arc<dyn RequestDispatcher>,
}

impl ImageApi {
    pub fn new(dispatcher: Arc<dyn RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Submits `payload` to `POST /api/inpaint` and decodes the reply as `R`.
    pub async fn update_image<P, R>(&self, payload: &P) -> Result<R, RequestError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let descriptor = Self::build_inpaint_descriptor(payload)?;
        let response = self.dispatcher.dispatch(descriptor).await?;
        decode_response(response)
    }

    pub async fn update_image_cancellable<P, R>(
        &self,
        payload: &P,
        cancellation: CancellationToken,
    ) -> Result<R, RequestError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let descriptor = Self::build_inpaint_descriptor(payload)?;
        let response = self
            .dispatcher
            .dispatch_cancellable(descriptor, cancellation)
            .await?;
        decode_response(response)
    }

    /// Validates the request locally; nothing is sent when it is malformed.
    pub async fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse, RequestError> {
        if let Err(reason) = request.validate() {
            log::warn!("[IMAGE_API] Rejecting inpaint request: {}", reason);
            return Err(RequestError::invalid_request(
                global_constants::INPAINT_ENDPOINT_PATH,
                reason,
            ));
        }

        log::info!(
            "[IMAGE_API] Submitting inpaint request (prompt: {})",
            request.prompt.is_some()
        );

        self.update_image(request).await
    }

    fn build_inpaint_descriptor<P: Serialize + ?Sized>(
        payload: &P,
    ) -> Result<RequestDescriptor, RequestError> {
        RequestDescriptor::post(global_constants::INPAINT_ENDPOINT_PATH).with_json(payload)
    }
}

fn decode_response<R: DeserializeOwned>(response: ResponsePayload) -> Result<R, RequestError> {
    serde_json::from_value(response).map_err(|e| {
        RequestError::serialization(
            global_constants::INPAINT_ENDPOINT_PATH,
            format!("unexpected response shape: {}", e),
        )
    })
}
