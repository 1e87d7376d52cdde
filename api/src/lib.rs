pub mod extractor;
pub mod handler;
pub mod model;
pub mod route;
pub mod validation;
