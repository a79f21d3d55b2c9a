// Identity v2 wire types
// Request payloads for the three credential variants and the `access`
// response envelope returned by the tokens endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// Rackspace API key credentials block
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCredentials {
    pub username: String,
    pub api_key: String,
}

/// Standard Identity v2 password credentials block
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

/// Token credentials block, for authenticating with an existing token ID
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenCredentials {
    pub id: String,
}

/// The `auth` block of a token-create request.
///
/// Exactly one of the three credential blocks is populated; the others are
/// omitted from the serialized payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthRequestBody {
    #[serde(rename = "passwordCredentials", skip_serializing_if = "Option::is_none")]
    pub password_credentials: Option<PasswordCredentials>,

    #[serde(rename = "token", skip_serializing_if = "Option::is_none")]
    pub token_credentials: Option<TokenCredentials>,

    #[serde(
        rename = "RAX-KSKEY:apiKeyCredentials",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key_credentials: Option<ApiKeyCredentials>,
}

/// Top-level token-create request body
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub auth: AuthRequestBody,
}

/// Top-level response from the tokens endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access: Access,
}

/// The `access` envelope: token plus service catalog
#[derive(Debug, Clone, Deserialize)]
pub struct Access {
    pub token: Token,
    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Vec<CatalogEntry>,
}

/// An issued authentication token
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tenant: Option<Tenant>,
}

/// The tenant a token is scoped to
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_api_key_payload() {
        let request = AuthRequest {
            auth: AuthRequestBody {
                api_key_credentials: Some(ApiKeyCredentials {
                    username: "u".to_string(),
                    api_key: "k".to_string(),
                }),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "auth": {
                    "RAX-KSKEY:apiKeyCredentials": {
                        "username": "u",
                        "apiKey": "k"
                    }
                }
            })
        );
    }

    #[test]
    fn test_serialize_password_payload() {
        let request = AuthRequest {
            auth: AuthRequestBody {
                password_credentials: Some(PasswordCredentials {
                    username: "u".to_string(),
                    password: "p".to_string(),
                }),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "auth": {
                    "passwordCredentials": {
                        "username": "u",
                        "password": "p"
                    }
                }
            })
        );
    }

    #[test]
    fn test_serialize_token_payload() {
        let request = AuthRequest {
            auth: AuthRequestBody {
                token_credentials: Some(TokenCredentials {
                    id: "t".to_string(),
                }),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"auth": {"token": {"id": "t"}}}));
    }

    #[test]
    fn test_deserialize_access_response() {
        let json = r#"{
            "access": {
                "token": {
                    "id": "tok-abc123",
                    "expires": "2030-06-14T13:30:00.000Z",
                    "tenant": {"id": "123", "name": "demo"}
                },
                "serviceCatalog": [
                    {
                        "name": "cloudServersOpenStack",
                        "type": "compute",
                        "endpoints": [
                            {
                                "region": "DFW",
                                "publicURL": "https://dfw.servers.example.com/v2/123",
                                "tenantId": "123"
                            }
                        ]
                    }
                ]
            }
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access.token.id, "tok-abc123");
        assert!(response.access.token.expires.is_some());
        assert_eq!(
            response.access.token.tenant,
            Some(Tenant {
                id: "123".to_string(),
                name: "demo".to_string()
            })
        );
        assert_eq!(response.access.service_catalog.len(), 1);
        assert_eq!(response.access.service_catalog[0].service_type, "compute");
    }

    #[test]
    fn test_deserialize_access_without_catalog() {
        // Token-credential authentication may return a bare token
        let json = r#"{"access": {"token": {"id": "tok-abc123"}}}"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access.token.id, "tok-abc123");
        assert!(response.access.token.expires.is_none());
        assert!(response.access.service_catalog.is_empty());
    }
}
