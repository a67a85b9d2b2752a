//! Format adapter variants.

pub mod environment;
pub mod native;
pub mod openapi;
pub mod postman;
pub mod tree;
