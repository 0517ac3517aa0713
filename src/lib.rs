pub mod adapters;
pub mod app;
pub mod core;
pub mod global_constants;

#[cfg(test)]
mod test_server;

pub use crate::adapters::ReqwestRequestDispatcher;
pub use crate::app::{InpaintApp, InpaintJob, InpaintOutcome};
pub use crate::core::endpoints::ImageApi;
pub use crate::core::interfaces::adapters::RequestDispatcher;
pub use crate::core::models::{
    HttpMethod, InpaintRequest, InpaintResponse, RequestDescriptor, RequestError,
    RequestErrorKind, ResponsePayload, TransportSettings,
};
