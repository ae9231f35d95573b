//! Admin authentication for the connector admin API.

use reqwest::RequestBuilder;

/// Header the server trusts in development mode to identify the admin principal.
pub const DEVELOPMENT_USER_HEADER: &str = "development-user-id";

/// Credentials attached to every admin request.
///
/// The [`Debug`] impl redacts the bearer token so it never lands in test
/// output or logs.
#[derive(Clone, PartialEq, Eq)]
pub enum AdminAuth {
    /// Development mode: the server trusts a header naming the admin user.
    DevelopmentUser { user_id: String },

    /// Production mode: a bearer token for an admin session.
    Bearer { token: String },
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DevelopmentUser { user_id } => f
                .debug_struct("DevelopmentUser")
                .field("user_id", user_id)
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}

impl AdminAuth {
    /// Apply authentication to a request builder.
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::DevelopmentUser { user_id } => builder.header(DEVELOPMENT_USER_HEADER, user_id),
            Self::Bearer { token } => builder.bearer_auth(token),
        }
    }

    /// Short label for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::DevelopmentUser { .. } => "development",
            Self::Bearer { .. } => "bearer",
        }
    }
}
