use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record: {0}")]
    Conflict(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode store response: {0}")]
    Decode(String),
}

/// Client for the document store's REST API (PostgREST dialect).
///
/// The backend authenticates with a service key; callers never forward
/// end-user tokens because the auth middleware has already established
/// identity at the HTTP boundary.
pub struct StoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            service_key: config.store_service_key.clone(),
        }
    }

    fn headers(&self, representation: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.service_key).unwrap());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if representation {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        representation: bool,
    ) -> Result<reqwest::Response, StoreError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(representation));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                409 => StoreError::Conflict(error_text),
                404 => StoreError::NotFound(error_text),
                _ => StoreError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        Ok(response)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        representation: bool,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body, representation).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Fetch all rows matching a filter, e.g. `appointments?user_id=eq.<id>`.
    pub async fn select<T>(&self, query: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, &format!("/rest/v1/{}", query), None, false)
            .await
    }

    /// Fetch the first row matching a filter, if any.
    pub async fn select_one<T>(&self, query: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self.select(query).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.remove(0)))
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T>(&self, table: &str, row: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self
            .request(
                Method::POST,
                &format!("/rest/v1/{}", table),
                Some(row),
                true,
            )
            .await?;

        if rows.is_empty() {
            return Err(StoreError::Api {
                status: 500,
                message: format!("insert into {} returned no representation", table),
            });
        }
        Ok(rows.remove(0))
    }

    /// Patch rows matching a filter, e.g. `users?id=eq.<id>`. The store
    /// may answer PATCH with an empty body, so the response is not decoded.
    pub async fn update(&self, query: &str, patch: Value) -> Result<(), StoreError> {
        self.send(
            Method::PATCH,
            &format!("/rest/v1/{}", query),
            Some(patch),
            false,
        )
        .await?;
        Ok(())
    }

    /// Patch rows matching a filter and return the updated representations.
    pub async fn update_returning<T>(&self, query: &str, patch: Value) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(
            Method::PATCH,
            &format!("/rest/v1/{}", query),
            Some(patch),
            true,
        )
        .await
    }

    /// Call a store-side function. This is the only primitive with
    /// cross-request atomicity guarantees beyond single-document writes.
    pub async fn rpc<T>(&self, function: &str, args: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(
            Method::POST,
            &format!("/rest/v1/rpc/{}", function),
            Some(args),
            false,
        )
        .await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
