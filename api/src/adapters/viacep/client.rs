//! ViaCEP API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use urlencoding::encode;

use crate::domain::ports::{ZipAddress, ZipCodeLookup};
use crate::error::ZipLookupError;

/// Client for `GET {base_url}/{cep}/json/`
pub struct ViaCepClient {
    http: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ZipLookupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, zip_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, encode(zip_code))
    }
}

#[async_trait]
impl ZipCodeLookup for ViaCepClient {
    async fn lookup(&self, zip_code: &str) -> Result<Option<ZipAddress>, ZipLookupError> {
        let response = self.http.get(self.lookup_url(zip_code)).send().await?;

        let status = response.status();
        // Malformed codes are answered with 400
        if status.as_u16() == 400 || status.as_u16() == 404 {
            tracing::warn!(zip_code, status = status.as_u16(), "ZIP code rejected by lookup");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ZipLookupError::Api {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ZipLookupError::Deserialization(e.to_string()))?;

        parse_body(body)
    }
}

/// Unknown codes come back as `{"erro": true}` with status 200
fn parse_body(body: serde_json::Value) -> Result<Option<ZipAddress>, ZipLookupError> {
    if body.get("erro").is_some() {
        return Ok(None);
    }

    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| ZipLookupError::Deserialization(e.to_string()))
}
