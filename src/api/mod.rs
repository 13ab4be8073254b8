pub mod client;
pub mod http_client;
pub mod legal;
pub mod search;
pub mod vault;

pub use client::{HttpRequest, HttpResponse, LexvaultClient, Transport};
pub use http_client::ReqwestTransport;

/// API services exposed under the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Legal research (authorities, citation checks)
    Legal,
    /// Web and content search
    Search,
    /// Document vaults
    Vault,
}

impl Service {
    pub const ALL: [Service; 3] = [Self::Legal, Self::Search, Self::Vault];

    /// First path segment of every endpoint in this service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Search => "search",
            Self::Vault => "vault",
        }
    }

    /// Version segment following the service name
    pub fn version(&self) -> &'static str {
        match self {
            Self::Legal | Self::Search | Self::Vault => "v1",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Legal => "Legal Research",
            Self::Search => "Search",
            Self::Vault => "Document Vault",
        }
    }
}
