// HTTP feed source for the stream console endpoints
use crate::application::feed_source::{FeedError, FeedSource};
use crate::domain::stream::{MetricsPayload, Stream, StreamMetrics, StreamsPayload};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    streams_url: String,
    metrics_url: String,
}

impl HttpFeedSource {
    pub fn new(
        base_url: &str,
        streams_path: &str,
        metrics_path: &str,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/');

        Ok(Self {
            client,
            streams_url: format!("{}{}", base_url, streams_path),
            metrics_url: format!("{}{}", base_url, metrics_path),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let transport = |source| FeedError::Transport {
            endpoint: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Protocol {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|source| FeedError::Decode {
            endpoint: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_streams(&self) -> Result<Vec<Stream>, FeedError> {
        let payload: StreamsPayload = self.get_json(&self.streams_url).await?;
        tracing::debug!(count = payload.streams.len(), "fetched streams");
        Ok(payload.streams)
    }

    async fn fetch_metrics(&self) -> Result<Vec<StreamMetrics>, FeedError> {
        let payload: MetricsPayload = self.get_json(&self.metrics_url).await?;
        tracing::debug!(count = payload.streams.len(), "fetched metrics");
        Ok(payload.streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: &str) -> HttpFeedSource {
        HttpFeedSource::new(base_url, "/streams", "/metrics", Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_both_feeds() {
        let router = Router::new()
            .route(
                "/streams",
                get(|| async {
                    r#"{"streams":[{"stream_id":"s1","name":"Orders","state":"running"}]}"#
                }),
            )
            .route(
                "/metrics",
                get(|| async {
                    r#"{"streams":[{"stream_id":"s1","events_sent":10,"events_deduped":2,"number_of_queries":5}]}"#
                }),
            );
        let source = source(&serve(router).await);

        assert_eq!(source.fetch_streams().await.unwrap(), vec![Stream::new("s1", "Orders")]);
        assert_eq!(
            source.fetch_metrics().await.unwrap(),
            vec![StreamMetrics::new("s1", 10, 2, 5)]
        );
    }

    #[tokio::test]
    async fn test_null_metrics_are_empty() {
        let router = Router::new().route("/metrics", get(|| async { r#"{"streams":null}"# }));
        let source = source(&serve(router).await);

        assert!(source.fetch_metrics().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_protocol_error() {
        let router = Router::new().route(
            "/streams",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list streams") }),
        );
        let source = source(&serve(router).await);

        match source.fetch_streams().await.unwrap_err() {
            FeedError::Protocol { status, body, endpoint } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Failed to list streams");
                assert!(endpoint.ends_with("/streams"));
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_route_is_protocol_error() {
        let source = source(&serve(Router::new()).await);

        assert!(matches!(
            source.fetch_metrics().await.unwrap_err(),
            FeedError::Protocol { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route("/streams", get(|| async { "<html>oops</html>" }));
        let source = source(&serve(router).await);

        assert!(matches!(
            source.fetch_streams().await.unwrap_err(),
            FeedError::Decode { .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source(&format!("http://{}", addr));

        assert!(matches!(
            source.fetch_streams().await.unwrap_err(),
            FeedError::Transport { .. }
        ));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_as_transport_error() {
        let router = Router::new().route(
            "/streams",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"streams":[]}"#
            }),
        );
        let base_url = serve(router).await;
        let source =
            HttpFeedSource::new(&base_url, "/streams", "/metrics", Duration::from_millis(100)).unwrap();

        match source.fetch_streams().await.unwrap_err() {
            FeedError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source = HttpFeedSource::new(
            "http://localhost:8080/",
            "/streams",
            "/metrics",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(source.streams_url, "http://localhost:8080/streams");
        assert_eq!(source.metrics_url, "http://localhost:8080/metrics");
    }
}
