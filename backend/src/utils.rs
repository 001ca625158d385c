pub mod og_image;
pub mod request;
pub mod stripe;
