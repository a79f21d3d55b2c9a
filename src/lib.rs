// Rackspace Identity v2 authentication
//
// Authenticates with an API key, password or token against an Identity v2
// endpoint and returns an immutable session with the parsed service catalog,
// plus an optional single-level reauthentication capability.

pub mod auth;
pub mod catalog;
pub mod error;

pub use auth::{authenticate, AuthOptions, Authenticated, Reauthenticator, Session};
pub use catalog::{CatalogEntry, Endpoint, EndpointFilter, Interface, ServiceCatalog};
pub use error::{AuthError, Result};
