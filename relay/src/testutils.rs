//! Throwaway HTTP server for client and orchestrator tests, bound to an
//! ephemeral port on the loopback interface.

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Canned behavior for one route.
#[derive(Clone)]
pub enum RouteReply {
    /// Respond with a fixed status and body.
    Fixed(u16, &'static str),
    /// Respond 200 with the request body echoed back.
    Echo,
}

/// One request as observed by the server.
#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: Method,
    pub content_type: Option<String>,
    pub body: Bytes,
}

struct State {
    routes: HashMap<&'static str, RouteReply>,
    requests: Mutex<HashMap<String, Vec<ReceivedRequest>>>,
}

pub struct TestServer {
    port: u16,
    state: Arc<State>,
}

impl TestServer {
    pub async fn start(routes: HashMap<&'static str, RouteReply>) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let port = listener.local_addr().unwrap().port();

        let state = Arc::new(State {
            routes,
            requests: Mutex::new(HashMap::new()),
        });

        let accept_state = state.clone();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => break,
                };
                let io = TokioIo::new(stream);
                let state = accept_state.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req| handle(state.clone(), req));
                    let _ = Builder::new(TokioExecutor::new())
                        .serve_connection(io, service)
                        .await;
                });
            }
        });

        TestServer { port, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    /// Number of requests the server has seen on `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests(path).len()
    }

    pub fn requests(&self, path: &str) -> Vec<ReceivedRequest> {
        self.state
            .requests
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }
}

async fn handle(
    state: Arc<State>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let content_type = req
        .headers()
        .get(hyper::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = req
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_else(|_| Bytes::new());

    state
        .requests
        .lock()
        .unwrap()
        .entry(path.clone())
        .or_default()
        .push(ReceivedRequest {
            method,
            content_type,
            body: body.clone(),
        });

    let reply = match state.routes.get(path.as_str()) {
        Some(reply) => reply.clone(),
        None => {
            return Ok(respond(
                404,
                Bytes::from_static(br#"{"error":"missing route"}"#),
            ));
        }
    };

    match reply {
        RouteReply::Fixed(status, text) => Ok(respond(status, Bytes::from_static(text.as_bytes()))),
        RouteReply::Echo => Ok(respond(200, body)),
    }
}

fn respond(status: u16, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Full::new(body))
        .unwrap()
}
