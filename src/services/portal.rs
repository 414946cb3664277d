// src/services/portal.rs

//! Portal REST API client.
//!
//! Endpoints return either a bare JSON array of records or an envelope
//! like `{"success": true, "data": [...]}` depending on backend version.
//! Anything else, including HTML error pages, is a fetch failure for the
//! current cycle, never a crash.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::utils::http;
use crate::watch::{FetchCollection, Tracked};

/// HTTP client bound to the portal API base URL.
#[derive(Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    base: Url,
}

impl PortalClient {
    /// Create a client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            base: Url::parse(&config.base_url)?,
        })
    }

    /// Fetch one collection endpoint and decode its records.
    pub(crate) async fn fetch_list<R: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
    ) -> Result<Vec<R>> {
        let url = self.base.join(path)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        decode_collection(resource, &body)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<R> {
    Bare(Vec<R>),
    Wrapped(Wrapped<R>),
}

#[derive(Deserialize)]
struct Wrapped<R> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(alias = "records")]
    data: Vec<R>,
}

fn decode_collection<R: DeserializeOwned>(resource: &'static str, body: &str) -> Result<Vec<R>> {
    match serde_json::from_str::<Envelope<R>>(body)? {
        Envelope::Bare(records) => Ok(records),
        Envelope::Wrapped(wrapped) => {
            if wrapped.success == Some(false) {
                return Err(AppError::api(resource, "endpoint reported failure"));
            }
            Ok(wrapped.data)
        }
    }
}

/// [`FetchCollection`] implementation bound to one endpoint path.
pub struct EndpointFeed<R> {
    client: PortalClient,
    path: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> EndpointFeed<R> {
    /// Create a feed for the given endpoint path, joined onto the
    /// client's base URL at fetch time.
    pub fn new(client: PortalClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R> FetchCollection<R> for EndpointFeed<R>
where
    R: Tracked + DeserializeOwned,
{
    async fn fetch(&self) -> Result<Vec<R>> {
        self.client.fetch_list::<R>(R::RESOURCE, &self.path).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Announcement;

    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let body = r#"[{"ann_id": 1, "title": "A", "created_at": "2026-01-01 08:00:00"}]"#;
        let records: Vec<Announcement> = decode_collection("announcements", body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ann_id, "1");
    }

    #[test]
    fn test_decode_wrapped_envelope() {
        let body = r#"{"success": true, "data": [{"ann_id": "2", "title": "B"}]}"#;
        let records: Vec<Announcement> = decode_collection("announcements", body).unwrap();
        assert_eq!(records[0].ann_id, "2");
    }

    #[test]
    fn test_decode_records_alias() {
        let body = r#"{"records": [{"ann_id": "3", "title": "C"}]}"#;
        let records: Vec<Announcement> = decode_collection("announcements", body).unwrap();
        assert_eq!(records[0].ann_id, "3");
    }

    #[test]
    fn test_refused_envelope_is_an_error() {
        let body = r#"{"success": false, "data": []}"#;
        let result: Result<Vec<Announcement>> = decode_collection("announcements", body);
        assert!(matches!(result, Err(AppError::Api { .. })));
    }

    #[test]
    fn test_html_body_is_a_format_error() {
        let body = "<html><body>500 Internal Server Error</body></html>";
        let result: Result<Vec<Announcement>> = decode_collection("announcements", body);
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn test_wrong_envelope_shape_is_a_format_error() {
        let body = r#"{"count": 3}"#;
        let result: Result<Vec<Announcement>> = decode_collection("announcements", body);
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
