//! Transport to the reasoning service.
//!
//! `ProcessService` is the seam between command dispatch and the network.
//! Methods return boxed futures so the trait stays dyn-compatible.

use std::future::Future;
use std::pin::Pin;

use protocol::{ProcessRequest, ProcessResponse};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait ProcessService: Send + Sync {
    /// Sends one command input and decodes the response body.
    ///
    /// Non-2xx statuses are errors; the body is kept for the log.
    fn process(&self, input: String) -> BoxFuture<'_, Result<ProcessResponse, ClientError>>;
}

/// `POST {service_url}/process` with `{"input": ...}`.
#[derive(Clone, Debug)]
pub struct HttpProcessService {
    http: Client,
    endpoint: Url,
}

impl HttpProcessService {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.process_url()?,
        })
    }

    async fn send(&self, input: String) -> Result<ProcessResponse, ClientError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&ProcessRequest::new(input))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        debug!(bytes = bytes.len(), "process response received");
        Ok(ProcessResponse::from_slice(&bytes)?)
    }
}

impl ProcessService for HttpProcessService {
    fn process(&self, input: String) -> BoxFuture<'_, Result<ProcessResponse, ClientError>> {
        Box::pin(self.send(input))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use protocol::{GeoJson, ProcessResponse};
    use reqwest::Url;
    use scene::SelectionMode;
    use serde_json::{Value, json};

    use super::{HttpProcessService, ProcessService};
    use crate::config::{ClientConfig, ResponseOrdering};
    use crate::error::ClientError;

    async fn serve(app: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn service(url: Url) -> HttpProcessService {
        HttpProcessService::new(&ClientConfig {
            service_url: url,
            mode: SelectionMode::Multi,
            ordering: ResponseOrdering::Arrival,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_input_and_decodes_feature() {
        let app = Router::new().route(
            "/process",
            post(|Json(body): Json<Value>| async move {
                let input = body["input"].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
                    "properties": { "echo": input }
                }))
            }),
        );
        let svc = service(serve(app).await);

        let resp = svc.process("hello".to_string()).await.unwrap();
        let ProcessResponse::GeoJson(GeoJson::Feature(feature)) = resp else {
            panic!("expected a single feature");
        };
        assert_eq!(feature.properties, Some(json!({ "echo": "hello" })));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let app = Router::new().route(
            "/process",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let svc = service(serve(app).await);

        match svc.process("x".to_string()).await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let app = Router::new().route("/process", post(|| async { "<html>" }));
        let svc = service(serve(app).await);
        assert!(matches!(
            svc.process("x".to_string()).await,
            Err(ClientError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let svc = service(Url::parse(&format!("http://{addr}")).unwrap());
        assert!(matches!(
            svc.process("x".to_string()).await,
            Err(ClientError::Transport(_))
        ));
    }
}
