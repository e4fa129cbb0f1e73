// Application layer - Use cases and the seams they depend on
pub mod dashboard_refresher;
pub mod feed_source;
pub mod tile_container;
pub mod view_switcher;
