// Authenticated session and reauthentication
// Authentication returns an immutable session value plus an optional
// reauthentication capability bound to the original credentials

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

use crate::catalog::{EndpointFilter, ServiceCatalog};
use crate::error::Result;

use super::identity;
use super::options::AuthOptions;
use super::types::{AuthResponse, Tenant, Token};

/// An authenticated Identity v2 session: a token plus the parsed service
/// catalog. Owned by the caller and never mutated; reauthentication produces
/// a fresh session instead of patching this one.
#[derive(Clone)]
pub struct Session {
    token: Token,
    catalog: ServiceCatalog,
}

impl Session {
    pub(crate) fn from_response(response: AuthResponse) -> Self {
        let access = response.access;
        Self {
            token: access.token,
            catalog: ServiceCatalog::new(access.service_catalog),
        }
    }

    /// The token value to send as `X-Auth-Token`
    pub fn token(&self) -> &str {
        &self.token.id
    }

    /// When the token expires, if the identity service reported it
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.expires
    }

    /// The tenant the token is scoped to, if any
    pub fn tenant(&self) -> Option<&Tenant> {
        self.token.tenant.as_ref()
    }

    /// Whether the token expires within the given threshold.
    ///
    /// A token without a reported expiry is treated as expiring, so callers
    /// that poll this will reauthenticate rather than run blind.
    pub fn expires_within(&self, threshold: Duration) -> bool {
        match self.token.expires {
            None => true,
            Some(expires) => expires <= Utc::now() + threshold,
        }
    }

    /// The service catalog returned alongside the token
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Resolve a service URL from the session's catalog
    pub fn endpoint_url(&self, filter: &EndpointFilter) -> Result<String> {
        self.catalog.endpoint_url(filter)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("expires", &self.token.expires)
            .field("catalog_services", &self.catalog.entries().len())
            .finish()
    }
}

/// The outcome of a successful authentication
#[derive(Debug)]
pub struct Authenticated {
    /// The new session
    pub session: Session,
    /// Present iff the options had `allow_reauth` set
    pub reauth: Option<Reauthenticator>,
}

/// Re-runs authentication with the originally supplied credentials.
///
/// Holds its own clone of the HTTP client and of the options with
/// `allow_reauth` forced off, so the nested authentication is bounded to
/// depth one: [`reauthenticate`](Self::reauthenticate) returns a bare
/// [`Session`] and can never hand out another `Reauthenticator`.
#[derive(Debug, Clone)]
pub struct Reauthenticator {
    client: Client,
    options: AuthOptions,
}

impl Reauthenticator {
    /// Authenticate again with the stored credentials and return the fresh
    /// session. Failures of the nested exchange propagate unchanged; there
    /// is no retry at this level.
    pub async fn reauthenticate(&self) -> Result<Session> {
        tracing::debug!("reauthenticating with stored credentials");
        let authenticated = authenticate(&self.client, &self.options).await?;
        debug_assert!(authenticated.reauth.is_none());
        Ok(authenticated.session)
    }
}

/// Clone options for the nested reauthentication run, with the reauth flag
/// cleared
fn disarmed(options: &AuthOptions) -> AuthOptions {
    let mut options = options.clone();
    options.allow_reauth = false;
    options
}

/// Authenticate against the Identity v2 service named by the options.
///
/// Selects exactly one credential variant, exchanges it for a token, and
/// returns the session together with a [`Reauthenticator`] when the options
/// allow reauthentication.
pub async fn authenticate(client: &Client, options: &AuthOptions) -> Result<Authenticated> {
    let request = options.to_request_body()?;
    let response = identity::create_token(client, &options.identity_endpoint, &request).await?;
    let session = Session::from_response(response);

    let reauth = options.allow_reauth.then(|| Reauthenticator {
        client: client.clone(),
        options: disarmed(options),
    });

    Ok(Authenticated { session, reauth })
}
