use crate::utils::error::SupplierError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin JSON-over-HTTP wrapper shared by the supplier adapters.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// `timeout` bounds a single HTTP exchange, independently of the search deadline.
    pub fn new(timeout: Duration) -> Result<Self, SupplierError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SupplierError::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// 使用呼叫端預先設定好的 client (例如自訂 headers 或 proxy)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, SupplierError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("Making supplier request to: {}", url);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        tracing::debug!("Supplier response status: {}", status);

        if !status.is_success() {
            return Err(SupplierError::status(
                status.as_u16(),
                format!("{} responded with {}", url, status),
            ));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SupplierError::format(e.to_string()))
    }
}
