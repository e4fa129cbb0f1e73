// Domain layer - Feed models, tiles and views
pub mod stream;
pub mod tile;
pub mod view;
