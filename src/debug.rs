// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Best-effort diagnostic HTTP listener.
//!
//! Serves `/healthz` and `/debug/vars` next to the benchmark. It only reads
//! an immutable snapshot of the run settings and never affects the run:
//! bind and connection errors are logged and otherwise ignored.

use crate::bench::Operation;
use crate::config::Config;
use bytes::Bytes;
use http::{header, HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Static description of the running benchmark
#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub operation: Operation,
    pub count: usize,
    pub qps: i32,
    pub burst: i32,
    pub kubeconfig: Option<String>,
    started: Instant,
}

impl From<&Config> for DebugInfo {
    fn from(config: &Config) -> Self {
        Self {
            operation: config.operation,
            count: config.count,
            qps: config.qps,
            burst: config.burst,
            kubeconfig: config.kubeconfig_path().map(|p| p.display().to_string()),
            started: Instant::now(),
        }
    }
}

#[derive(Serialize)]
struct DebugVars<'a> {
    operation: Operation,
    count: usize,
    qps: i32,
    burst: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    kubeconfig: Option<&'a str>,
    pid: u32,
    uptime_seconds: f64,
}

impl DebugInfo {
    fn vars(&self) -> DebugVars<'_> {
        DebugVars {
            operation: self.operation,
            count: self.count,
            qps: self.qps,
            burst: self.burst,
            kubeconfig: self.kubeconfig.as_deref(),
            pid: std::process::id(),
            uptime_seconds: self.started.elapsed().as_secs_f64(),
        }
    }
}

/// Bind `addr` and serve diagnostics in the background
pub fn spawn_debug_listener(addr: &'static str, info: DebugInfo) -> JoinHandle<()> {
    tokio::spawn(async move {
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Debug listener on http://{}", addr);
                serve(listener, Arc::new(info)).await;
            }
            Err(e) => warn!("Debug listener could not bind {}: {}", addr, e),
        }
    })
}

/// Accept connections until the listener fails
pub async fn serve(listener: TcpListener, info: Arc<DebugInfo>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Debug listener stopped accepting: {}", e);
                return;
            }
        };

        let info = info.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let info = info.clone();
                async move { Ok::<_, Infallible>(respond(&req, &info)) }
            });

            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!("Debug connection from {} failed: {}", peer, e);
            }
        });
    }
}

/// Route a diagnostic request
pub fn respond<B>(req: &Request<B>, info: &DebugInfo) -> Response<Full<Bytes>> {
    if req.method() != Method::GET {
        return text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed\n");
    }

    match req.uri().path() {
        "/healthz" => text(StatusCode::OK, "ok\n"),
        "/debug/vars" => match serde_json::to_vec_pretty(&info.vars()) {
            Ok(body) => {
                let mut response = Response::new(Full::new(Bytes::from(body)));
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response
            }
            Err(e) => text(StatusCode::INTERNAL_SERVER_ERROR, &format!("{}\n", e)),
        },
        _ => text(StatusCode::NOT_FOUND, "not found\n"),
    }
}

fn text(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
