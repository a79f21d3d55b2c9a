// Identity v2 token exchange
// POSTs the selected credential payload to the tokens endpoint and decodes
// the `access` envelope

use reqwest::Client;

use crate::error::{AuthError, Result};

use super::types::{AuthRequest, AuthResponse};

/// Build the tokens URL for an identity endpoint
fn tokens_url(identity_endpoint: &str) -> String {
    format!("{}/tokens", identity_endpoint.trim_end_matches('/'))
}

/// Exchange credentials for a token at `{identity_endpoint}/tokens`.
///
/// Non-success responses surface as [`AuthError::IdentityApi`] with the
/// response body as the message; transport failures propagate unchanged.
pub(crate) async fn create_token(
    client: &Client,
    identity_endpoint: &str,
    request: &AuthRequest,
) -> Result<AuthResponse> {
    let url = tokens_url(identity_endpoint);

    tracing::debug!(url = %url, "requesting token from identity service");

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::error!(
            status = status.as_u16(),
            url = %url,
            response_body = %message,
            "identity token request failed"
        );
        return Err(AuthError::IdentityApi {
            status: status.as_u16(),
            message,
        });
    }

    let data: AuthResponse = response.json().await.map_err(|e| {
        AuthError::InvalidResponse(format!("failed to decode identity response: {e}"))
    })?;

    if data.access.token.id.is_empty() {
        return Err(AuthError::InvalidResponse(
            "identity response does not contain a token id".to_string(),
        ));
    }

    tracing::info!(
        expires = ?data.access.token.expires,
        catalog_services = data.access.service_catalog.len(),
        "token issued by identity service"
    );

    Ok(data)
}
