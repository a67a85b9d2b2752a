//! Authorization domain types

mod types;

pub use types::{Authorization, AuthorizationType, BasicCredentials, TokenCredentials};
