mod http_method;
mod inpaint;
mod request_descriptor;
mod request_error;
mod transport_settings;

pub use http_method::HttpMethod;
pub use inpaint::{InpaintRequest, InpaintResponse};
pub use request_descriptor::RequestDescriptor;
pub use request_error::{RequestError, RequestErrorKind};
pub use transport_settings::TransportSettings;

pub type ResponsePayload = serde_json::Value;
