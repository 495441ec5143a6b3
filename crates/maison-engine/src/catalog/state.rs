//! Catalog state and the reducer steps that mutate it.
//!
//! Every fetch is split into a `begin_*` step, which issues a [`Ticket`] and
//! moves the channel to `Loading`, and a `finish_*` step, which applies the
//! outcome. Whether a finish step is applied depends on the configured
//! [`FetchOrdering`].

use maison_core::{
    apply_filters, related_products, FetchOrdering, FetchStatus, FilterPatch, FilterSpec, Product,
};
use serde::Serialize;

/// Identifies one fetch on one channel. Tickets increase monotonically per
/// channel, starting at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What the list channel was last asked to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "category", rename_all = "snake_case")]
pub enum CatalogScope {
    All,
    Category(String),
}

/// Result of applying a fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was written into the store.
    Applied,
    /// A newer fetch was issued on the same channel; the outcome was dropped.
    Discarded,
}

impl Completion {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Completion::Applied)
    }
}

/// One fetch-status slot with its ticket counter.
#[derive(Debug, Clone)]
pub struct Channel<T> {
    status: FetchStatus<T>,
    latest: Ticket,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            latest: Ticket::default(),
        }
    }
}

impl<T> Channel<T> {
    #[must_use]
    pub fn status(&self) -> &FetchStatus<T> {
        &self.status
    }

    fn begin(&mut self) -> Ticket {
        self.latest = Ticket(self.latest.0 + 1);
        self.status = FetchStatus::Loading;
        self.latest
    }

    fn accepts(&self, ticket: Ticket, ordering: FetchOrdering) -> bool {
        match ordering {
            FetchOrdering::LatestRequest => ticket == self.latest,
            FetchOrdering::LastCompletion => true,
        }
    }
}

/// The catalog slice: raw products, the derived view, the active filter, the
/// selected product, and one status per fetch channel.
#[derive(Debug, Clone)]
pub struct CatalogState {
    items: Vec<Product>,
    filtered_items: Vec<Product>,
    filters: FilterSpec,
    selected_product: Option<Product>,
    list: Channel<CatalogScope>,
    detail: Channel<String>,
    categories: Channel<Vec<String>>,
    ordering: FetchOrdering,
}

impl CatalogState {
    #[must_use]
    pub fn new(ordering: FetchOrdering) -> Self {
        Self {
            items: Vec::new(),
            filtered_items: Vec::new(),
            filters: FilterSpec::default(),
            selected_product: None,
            list: Channel::default(),
            detail: Channel::default(),
            categories: Channel::default(),
            ordering,
        }
    }

    // ---------------------------------------------------------------------
    // list channel
    // ---------------------------------------------------------------------

    pub fn begin_list(&mut self) -> Ticket {
        self.list.begin()
    }

    /// Applies a list fetch outcome.
    ///
    /// On success the raw list is replaced and the current filter is
    /// re-applied to it. On failure the raw list and derived view are left
    /// untouched.
    pub fn finish_list(
        &mut self,
        ticket: Ticket,
        scope: CatalogScope,
        outcome: Result<Vec<Product>, String>,
    ) -> Completion {
        if !self.list.accepts(ticket, self.ordering) {
            return Completion::Discarded;
        }
        match outcome {
            Ok(products) => {
                self.items = products;
                self.recompute_view();
                self.list.status = FetchStatus::Succeeded(scope);
            }
            Err(message) => self.list.status = FetchStatus::Failed(message),
        }
        Completion::Applied
    }

    // ---------------------------------------------------------------------
    // detail channel
    // ---------------------------------------------------------------------

    pub fn begin_detail(&mut self) -> Ticket {
        self.detail.begin()
    }

    /// Applies a single-product fetch outcome. The selected product is only
    /// replaced on success.
    pub fn finish_detail(&mut self, ticket: Ticket, outcome: Result<Product, String>) -> Completion {
        if !self.detail.accepts(ticket, self.ordering) {
            return Completion::Discarded;
        }
        match outcome {
            Ok(product) => {
                self.detail.status = FetchStatus::Succeeded(product.id.clone());
                self.selected_product = Some(product);
            }
            Err(message) => self.detail.status = FetchStatus::Failed(message),
        }
        Completion::Applied
    }

    // ---------------------------------------------------------------------
    // categories channel
    // ---------------------------------------------------------------------

    pub fn begin_categories(&mut self) -> Ticket {
        self.categories.begin()
    }

    pub fn finish_categories(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<String>, String>,
    ) -> Completion {
        if !self.categories.accepts(ticket, self.ordering) {
            return Completion::Discarded;
        }
        self.categories.status = match outcome {
            Ok(names) => FetchStatus::Succeeded(names),
            Err(message) => FetchStatus::Failed(message),
        };
        Completion::Applied
    }

    // ---------------------------------------------------------------------
    // synchronous intents
    // ---------------------------------------------------------------------

    /// Merges `patch` into the active filter and recomputes the view from the
    /// current raw list.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
        self.recompute_view();
    }

    /// Resets the filter and restores the raw list, in fetch order, as the
    /// view.
    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.filtered_items.clone_from(&self.items);
    }

    /// Places an already-known product in the selected slot without touching
    /// the detail channel.
    pub fn select_product(&mut self, product: Product) {
        self.selected_product = Some(product);
    }

    fn recompute_view(&mut self) {
        self.filtered_items = apply_filters(&self.items, &self.filters);
    }

    // ---------------------------------------------------------------------
    // reads
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn filtered_items(&self) -> &[Product] {
        &self.filtered_items
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    #[must_use]
    pub fn list_status(&self) -> &FetchStatus<CatalogScope> {
        self.list.status()
    }

    #[must_use]
    pub fn detail_status(&self) -> &FetchStatus<String> {
        self.detail.status()
    }

    #[must_use]
    pub fn categories_status(&self) -> &FetchStatus<Vec<String>> {
        self.categories.status()
    }

    /// Category names from the last successful categories fetch.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.categories.status().value().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn ordering(&self) -> FetchOrdering {
        self.ordering
    }

    /// Raw-list products related to the selected product, capped at `limit`.
    /// Empty when nothing is selected.
    #[must_use]
    pub fn related_products(&self, limit: usize) -> Vec<Product> {
        self.selected_product
            .as_ref()
            .map(|selected| related_products(&self.items, selected, limit))
            .unwrap_or_default()
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(FetchOrdering::default())
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
