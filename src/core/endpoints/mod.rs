mod image_api;

pub use image_api::ImageApi;
