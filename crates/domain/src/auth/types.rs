//! Authorization value types

use serde::{Deserialize, Serialize};

/// Authorization attached to a collection, folder or request.
///
/// The `type` field is the discriminator in JSON. `basic` and `token` always
/// carry their payload object, `none` and `inherit` never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Authorization {
    /// No authorization.
    #[default]
    None,
    /// Use the nearest ancestor's non-inherit authorization.
    Inherit,
    /// HTTP Basic authorization.
    Basic {
        /// Credentials payload.
        basic: BasicCredentials,
    },
    /// Bearer token authorization.
    Token {
        /// Token payload.
        token: TokenCredentials,
    },
}

/// Username and password for HTTP Basic authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BasicCredentials {
    /// Username (may contain `{{variables}}`).
    pub username: String,
    /// Password (may contain `{{variables}}`).
    pub password: String,
    /// Whether the editor shows the password in clear text.
    #[serde(default)]
    pub show_password: bool,
}

/// Bearer token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenCredentials {
    /// The token value (may contain `{{variables}}`).
    pub token: String,
}

/// Discriminator of an [`Authorization`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationType {
    /// See [`Authorization::None`].
    None,
    /// See [`Authorization::Inherit`].
    Inherit,
    /// See [`Authorization::Basic`].
    Basic,
    /// See [`Authorization::Token`].
    Token,
}

impl Authorization {
    /// Creates a basic authorization.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            basic: BasicCredentials {
                username: username.into(),
                password: password.into(),
                show_password: false,
            },
        }
    }

    /// Creates a bearer token authorization.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: TokenCredentials {
                token: token.into(),
            },
        }
    }

    /// Returns the discriminator.
    #[must_use]
    pub const fn auth_type(&self) -> AuthorizationType {
        match self {
            Self::None => AuthorizationType::None,
            Self::Inherit => AuthorizationType::Inherit,
            Self::Basic { .. } => AuthorizationType::Basic,
            Self::Token { .. } => AuthorizationType::Token,
        }
    }

    /// Returns true for [`Authorization::Inherit`].
    #[must_use]
    pub const fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    /// The value a root node stores: roots have nothing to inherit from.
    #[must_use]
    pub fn for_root(self) -> Self {
        match self {
            Self::Inherit => Self::None,
            other => other,
        }
    }
}

impl std::fmt::Display for AuthorizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Inherit => write!(f, "inherit"),
            Self::Basic => write!(f, "basic"),
            Self::Token => write!(f, "token"),
        }
    }
}
