// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod container;
pub mod http_feed_source;
