// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum MockResponse {
    Fixed(u16, String),
    /// Reply 201 with the request body, as the API server does for a create
    Echo,
}

/// A mock HTTP service that returns predefined responses and records every request.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.insert("GET", path, MockResponse::Fixed(status, body.to_string()))
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.insert("POST", path, MockResponse::Fixed(status, body.to_string()))
    }

    /// Accept POST requests on the path and echo the submitted object back
    pub fn echo_post(self, path: &str) -> Self {
        self.insert("POST", path, MockResponse::Echo)
    }

    /// Method and path of every request received so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn insert(self, method: &str, path: &str, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), response);
        self
    }

    fn find_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = match response {
                Some(MockResponse::Fixed(status, body)) => (status, body.into_bytes()),
                Some(MockResponse::Echo) => {
                    let body = req.into_body().collect().await?.to_bytes();
                    (201, body.to_vec())
                }
                None => (404, not_found_json("path", &path).into_bytes()),
            };

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap())
        })
    }
}

/// A service that accepts every request and never answers, like a stalled API server
#[derive(Clone, Default)]
pub struct StalledService;

impl StalledService {
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Service<Request<Body>> for StalledService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: Request<Body>) -> Self::Future {
        Box::pin(futures::future::pending())
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 conflict response for an existing object
pub fn already_exists_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!("{} \"{}\" already exists", resource, name),
    )
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
