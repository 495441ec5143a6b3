use std::sync::Arc;

use maison_core::{FetchOrdering, FilterPatch, Product};
use maison_gateway::{CatalogGateway, GatewayError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::state::{CatalogScope, CatalogState, Completion, Ticket};

/// A fetch intent accepted by [`CatalogStore::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    All,
    Category(String),
    Product(String),
    Categories,
}

/// Owns [`CatalogState`] and drives its fetch channels through a
/// [`CatalogGateway`].
///
/// Cloning is cheap; clones share the same state and gateway. Every mutation
/// runs to completion inside one `watch` update, and subscribers are woken
/// after each one.
#[derive(Debug)]
pub struct CatalogStore<G> {
    state: Arc<watch::Sender<CatalogState>>,
    gateway: Arc<G>,
}

impl<G> Clone for CatalogStore<G> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: CatalogGateway> CatalogStore<G> {
    #[must_use]
    pub fn new(gateway: G, ordering: FetchOrdering) -> Self {
        let (state, _) = watch::channel(CatalogState::new(ordering));
        Self {
            state: Arc::new(state),
            gateway: Arc::new(gateway),
        }
    }

    /// Fetches the whole catalog into the list channel.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Completion {
        self.load_list(CatalogScope::All).await
    }

    /// Fetches one category into the list channel.
    #[instrument(skip(self))]
    pub async fn load_by_category(&self, category: &str) -> Completion {
        self.load_list(CatalogScope::Category(category.to_string()))
            .await
    }

    /// Fetches one product into the selected-product slot.
    #[instrument(skip(self))]
    pub async fn load_by_id(&self, id: &str) -> Completion {
        let ticket = self.begin(CatalogState::begin_detail);
        debug!(channel = "detail", ?ticket, product_id = id, "fetch started");

        let outcome = self.gateway.fetch_by_id(id).await;
        if let Err(ref e) = outcome {
            warn!(channel = "detail", product_id = id, error = %e, "product fetch failed");
        }

        let completion = self.finish(|s| s.finish_detail(ticket, outcome.map_err(message)));
        log_completion("detail", ticket, completion);
        completion
    }

    /// Fetches the category names into the categories channel.
    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Completion {
        let ticket = self.begin(CatalogState::begin_categories);
        debug!(channel = "categories", ?ticket, "fetch started");

        let outcome = self.gateway.fetch_categories().await;
        match &outcome {
            Ok(names) => info!(channel = "categories", count = names.len(), "categories loaded"),
            Err(e) => warn!(channel = "categories", error = %e, "categories fetch failed"),
        }

        let completion = self.finish(|s| s.finish_categories(ticket, outcome.map_err(message)));
        log_completion("categories", ticket, completion);
        completion
    }

    pub async fn load(&self, request: LoadRequest) -> Completion {
        match request {
            LoadRequest::All => self.load_all().await,
            LoadRequest::Category(category) => self.load_by_category(&category).await,
            LoadRequest::Product(id) => self.load_by_id(&id).await,
            LoadRequest::Categories => self.load_categories().await,
        }
    }

    async fn load_list(&self, scope: CatalogScope) -> Completion {
        let ticket = self.begin(CatalogState::begin_list);
        debug!(channel = "list", ?ticket, ?scope, "fetch started");

        let outcome = match &scope {
            CatalogScope::All => self.gateway.fetch_all().await,
            CatalogScope::Category(category) => self.gateway.fetch_by_category(category).await,
        };
        match &outcome {
            Ok(products) => info!(channel = "list", ?scope, count = products.len(), "catalog loaded"),
            Err(e) => warn!(channel = "list", ?scope, error = %e, "catalog fetch failed"),
        }

        let completion = self.finish(|s| s.finish_list(ticket, scope, outcome.map_err(message)));
        log_completion("list", ticket, completion);
        completion
    }

    // ---------------------------------------------------------------------
    // synchronous intents
    // ---------------------------------------------------------------------

    pub fn set_filters(&self, patch: FilterPatch) {
        debug!(?patch, "set filters");
        self.state.send_modify(|s| s.set_filters(patch));
    }

    pub fn clear_filters(&self) {
        debug!("clear filters");
        self.state.send_modify(CatalogState::clear_filters);
    }

    pub fn select_product(&self, product: Product) {
        debug!(product_id = %product.id, "select product");
        self.state.send_modify(|s| s.select_product(product));
    }

    // ---------------------------------------------------------------------
    // reads
    // ---------------------------------------------------------------------

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.state.borrow())
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn related_products(&self, limit: usize) -> Vec<Product> {
        self.read(|s| s.related_products(limit))
    }

    /// A receiver that is notified after every completed mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    fn begin(&self, step: fn(&mut CatalogState) -> Ticket) -> Ticket {
        let mut ticket = Ticket::default();
        self.state.send_modify(|s| ticket = step(s));
        ticket
    }

    fn finish(&self, step: impl FnOnce(&mut CatalogState) -> Completion) -> Completion {
        let mut completion = Completion::Discarded;
        self.state.send_if_modified(|s| {
            completion = step(s);
            completion.is_applied()
        });
        completion
    }
}

impl<G: CatalogGateway + 'static> CatalogStore<G> {
    /// Runs `request` on the tokio runtime without waiting for it.
    ///
    /// The fetch completes into the store even if the handle is dropped.
    pub fn spawn_load(&self, request: LoadRequest) -> JoinHandle<Completion> {
        let store = self.clone();
        tokio::spawn(async move { store.load(request).await })
    }
}

fn message(error: GatewayError) -> String {
    error.to_string()
}

fn log_completion(channel: &'static str, ticket: Ticket, completion: Completion) {
    if completion == Completion::Discarded {
        warn!(channel, ?ticket, "discarded stale fetch completion");
    }
}
