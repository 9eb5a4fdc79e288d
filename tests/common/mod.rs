// tests/common/mod.rs
//! Shared test plumbing: a scriptable transport and response builders.

#![allow(dead_code)]

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tidalrs::{Credentials, Result, Transport, TransportRequest, TransportResponse};

type Handler = Box<dyn Fn(&TransportRequest) -> Result<TransportResponse> + Send + Sync>;

/// A transport that answers from a closure and records every request.
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&TransportRequest) -> Result<TransportResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request seen so far, in arrival order.
    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url_fragment: &str) -> Vec<TransportRequest> {
        self.calls()
            .into_iter()
            .filter(|r| r.url.contains(url_fragment))
            .collect()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(request.clone());
        (self.handler)(&request)
    }
}

pub fn response(status: u16, body: Value) -> TransportResponse {
    TransportResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers: HashMap::new(),
        body: body.to_string(),
    }
}

pub fn ok_json(body: Value) -> Result<TransportResponse> {
    Ok(response(200, body))
}

/// The service's token-expiry error body.
pub fn expired_token_body() -> Value {
    json!({
        "status": 401,
        "subStatus": 11003,
        "userMessage": "The token has expired. (Expired on time)"
    })
}

pub fn credentials() -> Credentials {
    Credentials {
        token_type: "Bearer".to_string(),
        access_token: "token-0".to_string(),
        refresh_token: Some("refresh-0".to_string()),
        session_id: Some("session-0".to_string()),
        country_code: Some("NO".to_string()),
    }
}

/// First value of a query parameter.
pub fn query<'a>(request: &'a TransportRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn header<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// One enveloped page of a tracks collection of `total` items, sliced by
/// the request's limit/offset.
pub fn tracks_page(request: &TransportRequest, total: u32) -> Value {
    let limit: u32 = query(request, "limit").unwrap().parse().unwrap();
    let offset: u32 = query(request, "offset")
        .map(|v| v.parse().unwrap())
        .unwrap_or(0);
    let items: Vec<Value> = (offset..total.min(offset + limit))
        .map(|i| {
            json!({
                "item": { "id": i, "title": format!("Track {}", i) },
                "created": "2024-05-01T10:00:00.000Z",
                "type": "track"
            })
        })
        .collect();
    json!({
        "limit": limit,
        "offset": offset,
        "totalNumberOfItems": total,
        "items": items
    })
}
