// Service catalog model and endpoint resolution
// The catalog is returned alongside the token by the identity service and
// directs subsequent API calls to per-service, per-region URLs

use serde::Deserialize;

use crate::error::{AuthError, Result};

/// A service entry from the Identity v2 service catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    /// The service name (e.g. "cloudServersOpenStack")
    #[serde(default)]
    pub name: String,
    /// The service type (e.g. "compute", "object-store", "identity")
    #[serde(rename = "type")]
    pub service_type: String,
    /// The list of endpoints for this service
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A single endpoint within a catalog entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Endpoint {
    /// The region identifier (e.g. "DFW", "ORD")
    #[serde(default)]
    pub region: Option<String>,
    /// Publicly routable URL
    #[serde(rename = "publicURL", default)]
    pub public_url: Option<String>,
    /// Internal (service-net) URL
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,
    /// Administrative URL
    #[serde(rename = "adminURL", default)]
    pub admin_url: Option<String>,
    /// Tenant the endpoint is scoped to
    #[serde(rename = "tenantId", default)]
    pub tenant_id: Option<String>,
}

/// Which of an endpoint's URLs to resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

/// Filter for resolving a single endpoint URL out of the catalog
#[derive(Debug, Clone, Default)]
pub struct EndpointFilter {
    /// Required service type to match
    pub service_type: String,
    /// Optional service name to match
    pub name: Option<String>,
    /// Optional region to match
    pub region: Option<String>,
    /// Which URL of the matched endpoint to return
    pub interface: Interface,
}

impl EndpointFilter {
    /// Create a filter matching a service type on the public interface
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Self::default()
        }
    }

    /// Restrict the match to a service name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict the match to a region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Select which endpoint URL to resolve
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }
}

/// The parsed service catalog of an authenticated session
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
    /// Wrap the catalog entries returned by the identity service
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// All catalog entries
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve exactly one endpoint URL matching the filter.
    ///
    /// Entries are matched by service type (and name, when set), endpoints by
    /// region (when set). Zero matches or a match lacking the requested
    /// interface URL yield [`AuthError::EndpointNotFound`]; more than one
    /// match yields [`AuthError::AmbiguousEndpoint`].
    pub fn endpoint_url(&self, filter: &EndpointFilter) -> Result<String> {
        let mut matches: Vec<&Endpoint> = Vec::new();

        for entry in &self.entries {
            if entry.service_type != filter.service_type {
                continue;
            }
            if let Some(ref name) = filter.name {
                if &entry.name != name {
                    continue;
                }
            }
            for endpoint in &entry.endpoints {
                if let Some(ref region) = filter.region {
                    if endpoint.region.as_deref() != Some(region.as_str()) {
                        continue;
                    }
                }
                matches.push(endpoint);
            }
        }

        let endpoint = match matches.len() {
            0 => {
                return Err(AuthError::EndpointNotFound {
                    service_type: filter.service_type.clone(),
                })
            }
            1 => matches[0],
            count => {
                return Err(AuthError::AmbiguousEndpoint {
                    service_type: filter.service_type.clone(),
                    count,
                })
            }
        };

        let url = match filter.interface {
            Interface::Public => endpoint.public_url.as_deref(),
            Interface::Internal => endpoint.internal_url.as_deref(),
            Interface::Admin => endpoint.admin_url.as_deref(),
        };

        url.filter(|u| !u.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AuthError::EndpointNotFound {
                service_type: filter.service_type.clone(),
            })
    }
}
