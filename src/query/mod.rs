pub mod endpoint;
pub mod position;
