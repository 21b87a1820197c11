//! ZIP code (CEP) lookup port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ZipLookupError;

/// Address registered for a CEP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipAddress {
    #[serde(rename = "cep")]
    pub zip_code: String,
    #[serde(rename = "logradouro", default)]
    pub street: String,
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    #[serde(rename = "localidade", default)]
    pub city: String,
    #[serde(rename = "uf", default)]
    pub state: String,
}

/// Resolves a CEP to an address
#[async_trait]
pub trait ZipCodeLookup: Send + Sync {
    /// `Ok(None)` when the service does not know the code
    async fn lookup(&self, zip_code: &str) -> Result<Option<ZipAddress>, ZipLookupError>;
}
