// Feed source trait for the streams and metrics endpoints
use crate::domain::stream::{Stream, StreamMetrics};
use async_trait::async_trait;
use thiserror::Error;

/// Why a feed could not be read. Every variant aborts the current refresh
/// cycle and nothing more.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection, DNS or timeout failure
    #[error("failed to reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("{endpoint} returned status {status}: {body}")]
    Protocol {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The body was not the expected JSON shape
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    pub fn endpoint(&self) -> &str {
        match self {
            FeedError::Transport { endpoint, .. }
            | FeedError::Protocol { endpoint, .. }
            | FeedError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Stream definitions, in display order
    async fn fetch_streams(&self) -> Result<Vec<Stream>, FeedError>;

    /// Per-stream counters, in no particular order
    async fn fetch_metrics(&self) -> Result<Vec<StreamMetrics>, FeedError>;
}
