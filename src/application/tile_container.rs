// Render target for dashboard tiles
use crate::domain::tile::Tile;

/// One rendered tile, ready to be placed in a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileElement {
    pub stream_id: String,
    pub html: String,
}

/// Turns a tile view-model into the element the container displays
pub trait TileRenderer: Send + Sync {
    fn render(&self, tile: &Tile) -> TileElement;
}

pub trait TileContainer: Send + Sync {
    fn container_id(&self) -> &str;

    /// Swap out every child for `children` in one step. Readers see either
    /// the old set or the new set, never a mix.
    fn replace_children(&self, children: Vec<TileElement>);

    fn children(&self) -> Vec<TileElement>;
}
