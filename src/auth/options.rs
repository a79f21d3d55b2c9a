// Credential bag and credential selection
// Picks exactly one authentication mode out of the possibly-set credential
// fields and shapes the matching wire payload

use crate::error::{AuthError, Result};

use super::types::{
    ApiKeyCredentials, AuthRequest, AuthRequestBody, PasswordCredentials, TokenCredentials,
};

/// Environment variable names for Rackspace credentials
const RAX_IDENTITY_ENDPOINT: &str = "RAX_IDENTITY_ENDPOINT";
const RAX_USERNAME: &str = "RAX_USERNAME";
const RAX_PASSWORD: &str = "RAX_PASSWORD";
const RAX_API_KEY: &str = "RAX_API_KEY";
const RAX_TENANT_ID: &str = "RAX_TENANT_ID";
const RAX_TENANT_NAME: &str = "RAX_TENANT_NAME";
const RAX_TOKEN_ID: &str = "RAX_TOKEN_ID";
const RAX_ALLOW_REAUTH: &str = "RAX_ALLOW_REAUTH";

/// The valid options for Identity v2 authentication.
///
/// At most one credential variant is used per request, in priority order:
/// API key, then password, then token ID.
#[derive(Debug, Clone, Default)]
pub struct AuthOptions {
    /// Base URL of the Identity v2 service (e.g. `https://identity.api.rackspacecloud.com/v2.0`)
    pub identity_endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub tenant_id: Option<String>,
    pub tenant_name: Option<String>,
    pub token_id: Option<String>,
    /// When set, a successful authentication also yields a reauthentication
    /// capability bound to these credentials
    pub allow_reauth: bool,
}

impl AuthOptions {
    /// Create options against an identity endpoint
    pub fn new(identity_endpoint: impl Into<String>) -> Self {
        Self {
            identity_endpoint: identity_endpoint.into(),
            ..Self::default()
        }
    }

    /// Set the username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the Rackspace API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the tenant ID
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the tenant name
    pub fn with_tenant_name(mut self, tenant_name: impl Into<String>) -> Self {
        self.tenant_name = Some(tenant_name.into());
        self
    }

    /// Set an existing token ID to authenticate with
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Enable silent reauthentication with these credentials
    pub fn with_allow_reauth(mut self, allow_reauth: bool) -> Self {
        self.allow_reauth = allow_reauth;
        self
    }

    /// Load options from `RAX_*` environment variables.
    ///
    /// `RAX_IDENTITY_ENDPOINT` is required; credential variables are picked
    /// up when set and non-empty. `RAX_ALLOW_REAUTH` accepts `1` or `true`.
    pub fn from_env() -> Result<Self> {
        let identity_endpoint =
            env_var(RAX_IDENTITY_ENDPOINT).ok_or(AuthError::MissingField {
                field: RAX_IDENTITY_ENDPOINT,
                context: "environment configuration",
            })?;

        let allow_reauth = env_var(RAX_ALLOW_REAUTH)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            identity_endpoint,
            username: env_var(RAX_USERNAME),
            password: env_var(RAX_PASSWORD),
            api_key: env_var(RAX_API_KEY),
            tenant_id: env_var(RAX_TENANT_ID),
            tenant_name: env_var(RAX_TENANT_NAME),
            token_id: env_var(RAX_TOKEN_ID),
            allow_reauth,
        })
    }

    /// Build the token-create request body for these options.
    ///
    /// Selection is a fixed, total function over the credential fields, in
    /// priority order API key > password > token ID. Tenant fields are
    /// carried on the options but never serialized into the payload.
    pub fn to_request_body(&self) -> Result<AuthRequest> {
        let mut auth = AuthRequestBody::default();

        if let Some(api_key) = non_empty(&self.api_key) {
            let username = non_empty(&self.username).ok_or(AuthError::MissingField {
                field: "username",
                context: "API key auth",
            })?;
            auth.api_key_credentials = Some(ApiKeyCredentials {
                username: username.to_string(),
                api_key: api_key.to_string(),
            });
        } else if let Some(password) = non_empty(&self.password) {
            let username = non_empty(&self.username).ok_or(AuthError::MissingField {
                field: "username",
                context: "password auth",
            })?;
            auth.password_credentials = Some(PasswordCredentials {
                username: username.to_string(),
                password: password.to_string(),
            });
        } else if let Some(token_id) = non_empty(&self.token_id) {
            auth.token_credentials = Some(TokenCredentials {
                id: token_id.to_string(),
            });
        } else {
            return Err(AuthError::MissingCredentials);
        }

        Ok(AuthRequest { auth })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
