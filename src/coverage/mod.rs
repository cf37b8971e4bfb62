pub mod coverage_json;
pub mod decoder;
pub mod error;
pub mod normalize;
