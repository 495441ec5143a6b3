//! The liked-items store.

use std::sync::Arc;

use maison_core::LikedProduct;
use tokio::sync::watch;
use tracing::debug;

/// Favorited products in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedState {
    items: Vec<LikedProduct>,
}

impl LikedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the entry with `product.id` if present, otherwise appends
    /// `product`. Returns whether the product is liked afterwards.
    pub fn toggle_like(&mut self, product: LikedProduct) -> bool {
        if let Some(index) = self.items.iter().position(|p| p.id == product.id) {
            self.items.remove(index);
            false
        } else {
            self.items.push(product);
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_liked(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[LikedProduct] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared handle to a [`LikedState`].
#[derive(Debug, Clone)]
pub struct LikedStore {
    state: Arc<watch::Sender<LikedState>>,
}

impl Default for LikedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LikedStore {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(LikedState::new());
        Self {
            state: Arc::new(state),
        }
    }

    pub fn toggle_like(&self, product: LikedProduct) -> bool {
        let product_id = product.id.clone();
        let mut liked = false;
        self.state.send_modify(|s| liked = s.toggle_like(product));
        debug!(%product_id, liked, "toggled like");
        liked
    }

    pub fn clear(&self) {
        self.state.send_if_modified(|s| {
            let had_items = !s.is_empty();
            s.clear();
            had_items
        });
    }

    #[must_use]
    pub fn is_liked(&self, product_id: &str) -> bool {
        self.state.borrow().is_liked(product_id)
    }

    #[must_use]
    pub fn snapshot(&self) -> LikedState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LikedState> {
        self.state.subscribe()
    }
}
