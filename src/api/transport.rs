// src/api/transport.rs
//! Production transport backed by reqwest.
//!
//! A thin wrapper: it executes exactly one HTTP call per invocation and
//! reports the outcome. Authentication, parameter merging, retries, and
//! error classification all live above this seam.

use super::{Transport, TransportRequest, TransportResponse};
use crate::error::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// A [`Transport`] backed by a pooled reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse> {
        log::debug!(
            "{} {} ({} query params)",
            request.method,
            request.url,
            request.query.len()
        );

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        log::debug!("Response status: {}", status);

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
