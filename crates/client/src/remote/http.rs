//! HTTP implementation of the remote cart and order services.
//!
//! Talks JSON to the ToyCart backend with a bearer credential attached to
//! every request. Endpoints:
//!
//! - `GET    /api/cart`              - list the user's cart lines
//! - `POST   /api/cart/items`        - add a line
//! - `PUT    /api/cart/items/{id}`   - replace a line's quantity
//! - `DELETE /api/cart/items/{id}`   - remove a line
//! - `POST   /api/orders`            - create an order from the cart

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use toycart_core::ProductId;

use crate::config::ClientConfig;

use super::types::{OrderConfirmation, OrderRequest, RemoteCartLine};
use super::{OrderGateway, RemoteCart, RemoteError};

/// Client for the ToyCart backend API.
pub struct HttpCartService {
    client: reqwest::Client,
    base_url: String,
    api_token: SecretString,
}

#[derive(Debug, Deserialize)]
struct ListCartResponse {
    items: Vec<RemoteCartLine>,
}

impl HttpCartService {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_owned(),
            api_token: config.api_token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a response body, mapping malformed JSON to [`RemoteError::Parse`].
    fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, RemoteError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Map a response's status to an error, or pass it through.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(RemoteError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "ToyCart API returned non-success status"
            );
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response)
    }
}

impl RemoteCart for HttpCartService {
    async fn list(&self) -> Result<Vec<RemoteCartLine>, RemoteError> {
        let response = self
            .client
            .get(self.endpoint("/api/cart"))
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: ListCartResponse = Self::decode(&response.bytes().await?)?;
        Ok(body.items)
    }

    async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.endpoint("/api/cart/items"))
            .bearer_auth(self.api_token.expose_secret())
            .json(&json!({ "product_id": product_id, "quantity": quantity }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.endpoint(&format!("/api/cart/items/{product_id}")))
            .bearer_auth(self.api_token.expose_secret())
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn remove(&self, product_id: ProductId) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/cart/items/{product_id}")))
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl OrderGateway for HttpCartService {
    async fn create(&self, order: &OrderRequest) -> Result<OrderConfirmation, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("/api/orders"))
            .bearer_auth(self.api_token.expose_secret())
            .json(order)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(&response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_body_maps_to_parse_error() {
        let result = HttpCartService::decode::<ListCartResponse>(b"<html>bad gateway</html>");
        assert!(matches!(result, Err(RemoteError::Parse(_))));
    }

    #[test]
    fn test_well_formed_body_decodes() {
        let body: ListCartResponse =
            HttpCartService::decode(br#"{"items":[]}"#).expect("valid body");
        assert!(body.items.is_empty());
    }
}
