// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The namespace API calls repeated by the benchmark

use crate::error::Result;
use http::Response;
use http_body_util::BodyExt;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, ListParams, ObjectList, ObjectMeta, PostParams, WatchParams},
    client::Body,
    core::Request,
    error::ErrorResponse,
    Api, Client, Resource,
};
use tracing::{debug, instrument, trace};

/// List all namespaces without any selectors
#[instrument(skip(client))]
pub async fn list_namespaces(client: &Client) -> Result<ObjectList<Namespace>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let list = namespaces.list(&ListParams::default()).await?;
    debug!("Listed {} namespaces", list.items.len());
    Ok(list)
}

/// Create an empty namespace with the given name
#[instrument(skip(client))]
pub async fn create_namespace(client: &Client, name: &str) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let created = namespaces.create(&PostParams::default(), &ns).await?;
    debug!("Namespace {} created", name);
    Ok(created)
}

/// Delete the namespace with the given name
#[instrument(skip(client))]
pub async fn delete_namespace(client: &Client, name: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    namespaces.delete(name, &DeleteParams::default()).await?;
    debug!("Namespace {} deletion requested", name);
    Ok(())
}

/// An open watch over all namespaces.
///
/// Holds the streaming response without reading it. The underlying
/// connection is released when the guard is closed or dropped.
pub struct NamespaceWatch {
    response: Response<Body>,
}

impl NamespaceWatch {
    pub fn status(&self) -> http::StatusCode {
        self.response.status()
    }

    /// Close the stream without consuming any events
    pub fn close(self) {
        trace!("Closing namespace watch ({})", self.status());
        drop(self.response);
    }
}

/// Open a watch over all namespaces with bookmark events enabled.
///
/// Resolves once the server has answered the request; a non-success status
/// is turned into the same API error the other calls return.
#[instrument(skip(client))]
pub async fn open_namespace_watch(client: &Client) -> Result<NamespaceWatch> {
    let params = WatchParams {
        bookmarks: true,
        ..WatchParams::default()
    };
    // empty resource version: start from the most recent state
    let request = Request::new(Namespace::url_path(&(), None))
        .watch(&params, "")
        .map_err(kube::Error::BuildRequest)?;

    let response = client.send(request.map(Body::from)).await?;
    let status = response.status();
    if !status.is_success() {
        let body = response
            .into_body()
            .collect()
            .await
            .map(|b| b.to_bytes())
            .unwrap_or_default();
        return Err(kube::Error::Api(api_error(status, &body)).into());
    }

    debug!("Namespace watch opened ({})", status);
    Ok(NamespaceWatch { response })
}

/// Decode a Kubernetes `Status` body, falling back to the raw text
fn api_error(status: http::StatusCode, body: &[u8]) -> ErrorResponse {
    serde_json::from_slice(body).unwrap_or_else(|_| ErrorResponse {
        status: "Failure".to_string(),
        message: String::from_utf8_lossy(body).into_owned(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        code: status.as_u16(),
    })
}
