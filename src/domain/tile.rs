// Tile view-model: one stream joined with its counters
use super::stream::{Stream, StreamMetrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub stream_id: String,
    pub events_sent: u64,
    pub events_deduped: u64,
    pub number_of_queries: u64,
}

impl Tile {
    pub fn new(stream: &Stream, metrics: &StreamMetrics) -> Self {
        Self {
            name: stream.name.clone(),
            stream_id: stream.stream_id.clone(),
            events_sent: metrics.events_sent,
            events_deduped: metrics.events_deduped,
            number_of_queries: metrics.number_of_queries,
        }
    }
}

/// Build one tile per stream, in stream order.
///
/// The first metric record with a matching `stream_id` wins; streams with no
/// record get all-zero counters.
pub fn correlate(streams: &[Stream], metrics: &[StreamMetrics]) -> Vec<Tile> {
    streams
        .iter()
        .map(|stream| match metrics.iter().find(|m| m.stream_id == stream.stream_id) {
            Some(record) => Tile::new(stream, record),
            None => Tile::new(stream, &StreamMetrics::zeroed(stream.stream_id.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_stream_takes_counters() {
        let streams = vec![Stream::new("s1", "Orders")];
        let metrics = vec![StreamMetrics::new("s1", 10, 2, 5)];

        let tiles = correlate(&streams, &metrics);

        assert_eq!(
            tiles,
            vec![Tile {
                name: "Orders".to_string(),
                stream_id: "s1".to_string(),
                events_sent: 10,
                events_deduped: 2,
                number_of_queries: 5,
            }]
        );
    }

    #[test]
    fn test_unmatched_stream_defaults_to_zero() {
        let tiles = correlate(&[Stream::new("s2", "Clicks")], &[]);

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].name, "Clicks");
        assert_eq!(
            (tiles[0].events_sent, tiles[0].events_deduped, tiles[0].number_of_queries),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_order_follows_streams_not_metrics() {
        let streams = vec![
            Stream::new("a", "Alpha"),
            Stream::new("b", "Beta"),
            Stream::new("c", "Gamma"),
        ];
        let metrics = vec![
            StreamMetrics::new("c", 3, 0, 0),
            StreamMetrics::new("a", 1, 0, 0),
            StreamMetrics::new("b", 2, 0, 0),
        ];

        let tiles = correlate(&streams, &metrics);

        let ids: Vec<&str> = tiles.iter().map(|t| t.stream_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let sent: Vec<u64> = tiles.iter().map(|t| t.events_sent).collect();
        assert_eq!(sent, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_metric_records_first_wins() {
        let metrics = vec![
            StreamMetrics::new("s1", 7, 1, 1),
            StreamMetrics::new("s1", 99, 99, 99),
        ];

        let tiles = correlate(&[Stream::new("s1", "Orders")], &metrics);

        assert_eq!(tiles[0].events_sent, 7);
    }

    #[test]
    fn test_metrics_for_unknown_streams_are_ignored() {
        let metrics = vec![StreamMetrics::new("ghost", 5, 5, 5)];
        assert!(correlate(&[], &metrics).is_empty());
    }
}
