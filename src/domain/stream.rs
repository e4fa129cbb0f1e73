// Stream and metric feed models
use serde::{Deserialize, Deserializer};

/// A stream definition as listed by the `/streams` feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stream {
    pub stream_id: String,
    pub name: String,
}

impl Stream {
    pub fn new(stream_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            name: name.into(),
        }
    }
}

/// Counters for one stream as reported by the `/metrics` feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamMetrics {
    pub stream_id: String,
    #[serde(default)]
    pub events_sent: u64,
    #[serde(default)]
    pub events_deduped: u64,
    #[serde(default)]
    pub number_of_queries: u64,
}

impl StreamMetrics {
    pub fn new(
        stream_id: impl Into<String>,
        events_sent: u64,
        events_deduped: u64,
        number_of_queries: u64,
    ) -> Self {
        Self {
            stream_id: stream_id.into(),
            events_sent,
            events_deduped,
            number_of_queries,
        }
    }

    /// Default record for a stream the metrics feed has nothing for
    pub fn zeroed(stream_id: impl Into<String>) -> Self {
        Self::new(stream_id, 0, 0, 0)
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub streams: Vec<Stream>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub streams: Vec<StreamMetrics>,
}

// The server encodes an empty collection as `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_payload_ignores_extra_fields() {
        let body = r#"{"streams":[{"stream_id":"s1","name":"Orders","query":"SELECT 1","state":"running","interval":5}]}"#;
        let payload: StreamsPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.streams, vec![Stream::new("s1", "Orders")]);
    }

    #[test]
    fn test_null_streams_decode_as_empty() {
        let payload: MetricsPayload = serde_json::from_str(r#"{"streams":null}"#).unwrap();
        assert!(payload.streams.is_empty());

        let payload: StreamsPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.streams.is_empty());
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let body = r#"{"streams":[{"stream_id":"s1","events_sent":3}]}"#;
        let payload: MetricsPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.streams, vec![StreamMetrics::new("s1", 3, 0, 0)]);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<StreamsPayload>(r#"{"streams":"nope"}"#).is_err());
        assert!(serde_json::from_str::<MetricsPayload>(r#"{"streams":[{"events_sent":1}]}"#).is_err());
    }
}
