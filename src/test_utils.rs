// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for faking the Kubernetes API server.

use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// An in-memory API server for core/v1 objects.
///
/// Objects are stored under their request path. Collections are the paths with
/// an odd number of segments (`/api/v1/namespaces`, `/api/v1/namespaces/x/secrets`).
/// GET, POST and PUT are supported; PUT stores the request body verbatim so that
/// replacement semantics can be observed. Anything else is rejected with 405.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    objects: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object at the given collection path
    pub fn with_object(self, collection: &str, object: Value) -> Self {
        let name = object["metadata"]["name"]
            .as_str()
            .expect("seeded object must have a name")
            .to_string();
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", collection, name), object);
        self
    }

    /// Build a kube Client backed by this server
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Read back a stored object
    pub fn object(&self, path: &str) -> Option<Value> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    fn handle(&self, method: &str, path: &str, body: &[u8]) -> (StatusCode, Value) {
        let path = path.trim_end_matches('/');
        let is_collection = path.split('/').filter(|s| !s.is_empty()).count() % 2 == 1;
        let mut objects = self.objects.lock().unwrap();

        match (method, is_collection) {
            ("GET", true) => {
                let prefix = format!("{}/", path);
                let items: Vec<Value> = objects
                    .iter()
                    .filter(|(key, _)| {
                        key.strip_prefix(&prefix)
                            .is_some_and(|rest| !rest.contains('/'))
                    })
                    .map(|(_, obj)| obj.clone())
                    .collect();
                let list = json!({
                    "apiVersion": "v1",
                    "kind": "List",
                    "metadata": { "resourceVersion": "1" },
                    "items": items,
                });
                (StatusCode::OK, list)
            }
            ("GET", false) => match objects.get(path) {
                Some(obj) => (StatusCode::OK, obj.clone()),
                None => not_found(path),
            },
            ("POST", true) => {
                let Ok(obj) = serde_json::from_slice::<Value>(body) else {
                    return bad_request("invalid body");
                };
                let Some(name) = obj["metadata"]["name"].as_str() else {
                    return bad_request("name is required");
                };
                let key = format!("{}/{}", path, name);
                if objects.contains_key(&key) {
                    return status(StatusCode::CONFLICT, "AlreadyExists", &format!("{} already exists", key));
                }
                objects.insert(key, obj.clone());
                (StatusCode::CREATED, obj)
            }
            ("PUT", false) => {
                let Ok(obj) = serde_json::from_slice::<Value>(body) else {
                    return bad_request("invalid body");
                };
                match objects.get_mut(path) {
                    Some(existing) => {
                        *existing = obj.clone();
                        (StatusCode::OK, obj)
                    }
                    None => not_found(path),
                }
            }
            _ => status(StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowed", "unsupported"),
        }
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();

        Box::pin(async move {
            let method = req.method().as_str().to_string();
            let path = req.uri().path().to_string();
            let body = req.into_body().collect().await?.to_bytes();

            let (code, value) = server.handle(&method, &path, &body);
            Ok(Response::builder()
                .status(code)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&value)?))?)
        })
    }
}

fn status(code: StatusCode, reason: &str, message: &str) -> (StatusCode, Value) {
    let body = json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code.as_u16(),
    });
    (code, body)
}

fn not_found(path: &str) -> (StatusCode, Value) {
    status(StatusCode::NOT_FOUND, "NotFound", &format!("{} not found", path))
}

fn bad_request(message: &str) -> (StatusCode, Value) {
    status(StatusCode::BAD_REQUEST, "BadRequest", message)
}

type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

/// Scripted responses for list-watch tests, one request at a time.
pub struct ApiServerVerifier(ApiServerHandle);

impl ApiServerVerifier {
    pub fn new() -> (Client, Self) {
        let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
        (Client::new(mock_service, "default"), Self(handle))
    }

    /// Run a scenario in the background. The verifier is kept alive afterwards
    /// so that the client sees pending requests instead of a closed service.
    pub fn run<F, Fut>(self, scenario: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Self) -> Fut + Send + 'static,
        Fut: Future<Output = Self> + Send + 'static,
    {
        tokio::spawn(async move {
            let _verifier = scenario(self).await;
            std::future::pending::<()>().await;
        })
    }

    /// Answer the initial list request
    pub async fn respond_list(mut self, list: Value) -> Self {
        let (request, send) = self.0.next_request().await.expect("list not called");
        assert_eq!(request.method(), Method::GET);
        assert!(!request.uri().to_string().contains("watch=true"));
        send.send_response(
            Response::builder()
                .body(Body::from(serde_json::to_vec(&list).unwrap()))
                .unwrap(),
        );
        self
    }

    /// Answer the watch request with newline separated events, then close it
    pub async fn respond_watch(mut self, events: Vec<Value>) -> Self {
        let (request, send) = self.0.next_request().await.expect("watch not called");
        assert_eq!(request.method(), Method::GET);
        assert!(request.uri().to_string().contains("watch=true"));
        let body = events
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .map(|line| line + "\n")
            .collect::<String>();
        send.send_response(Response::builder().body(Body::from(body.into_bytes())).unwrap());
        self
    }

    /// Accept the watch request and never answer it
    pub async fn hold_watch(mut self) -> Self {
        let (request, send) = self.0.next_request().await.expect("watch not called");
        assert!(request.uri().to_string().contains("watch=true"));
        let () = std::future::pending().await;
        drop(send);
        self
    }

    /// Accept the list request and never answer it
    pub async fn hold_list(mut self) -> Self {
        let (_request, send) = self.0.next_request().await.expect("list not called");
        let () = std::future::pending().await;
        drop(send);
        self
    }
}

/// Create a namespace JSON object
pub fn namespace_json(name: &str, resource_version: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name),
            "resourceVersion": resource_version,
        }
    })
}

/// Create a namespace list response
pub fn namespace_list_json(names: &[&str], resource_version: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "NamespaceList",
        "metadata": { "resourceVersion": resource_version },
        "items": names
            .iter()
            .map(|name| namespace_json(name, resource_version))
            .collect::<Vec<_>>(),
    })
}

/// Create a watch ERROR event carrying a Status
pub fn watch_error_json(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "type": "ERROR",
        "object": {
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": message,
            "reason": reason,
            "code": code,
        },
    })
}

/// Create a watch event line for a namespace
pub fn watch_event_json(event_type: &str, name: &str, resource_version: &str) -> Value {
    json!({
        "type": event_type,
        "object": namespace_json(name, resource_version),
    })
}
