// In-memory tile container backing the console page
use crate::application::tile_container::{TileContainer, TileElement};
use std::sync::{PoisonError, RwLock};

#[derive(Debug)]
pub struct SharedContainer {
    id: String,
    children: RwLock<Vec<TileElement>>,
}

impl SharedContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: RwLock::new(Vec::new()),
        }
    }
}

impl TileContainer for SharedContainer {
    fn container_id(&self) -> &str {
        &self.id
    }

    fn replace_children(&self, children: Vec<TileElement>) {
        let mut guard = self.children.write().unwrap_or_else(PoisonError::into_inner);
        *guard = children;
    }

    fn children(&self) -> Vec<TileElement> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str) -> TileElement {
        TileElement {
            stream_id: id.to_string(),
            html: format!("<div>{}</div>", id),
        }
    }

    #[test]
    fn test_replace_discards_previous_children() {
        let container = SharedContainer::new("stream-tiles");
        container.replace_children(vec![element("a"), element("b")]);
        container.replace_children(vec![element("c")]);

        assert_eq!(container.container_id(), "stream-tiles");
        assert_eq!(container.children(), vec![element("c")]);
    }

    #[test]
    fn test_starts_empty() {
        assert!(SharedContainer::new("stream-tiles").children().is_empty());
    }
}
