// Error handling module
// Defines the error taxonomy for credential selection, the identity
// exchange, and service catalog resolution

use thiserror::Error;

/// Errors that can occur while authenticating or resolving endpoints
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required companion field is absent for the chosen credential type
    #[error("{field} must be supplied for {context}")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    /// No recognized credential was supplied
    #[error("missing username/password/apiKey or tokenId for auth")]
    MissingCredentials,

    /// The identity service rejected the token request
    #[error("identity service error: {status} - {message}")]
    IdentityApi { status: u16, message: String },

    /// The identity service returned a body we could not use
    #[error("invalid identity response: {0}")]
    InvalidResponse(String),

    /// No catalog endpoint matched the filter
    #[error("no endpoint for service {service_type:?} found in the service catalog")]
    EndpointNotFound { service_type: String },

    /// More than one catalog endpoint matched the filter
    #[error("{count} endpoints match service {service_type:?}, refine the endpoint filter")]
    AmbiguousEndpoint { service_type: String, count: usize },

    /// HTTP transport failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
