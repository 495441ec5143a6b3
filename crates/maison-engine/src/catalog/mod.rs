//! The catalog store: fetched products, the filtered view over them, and the
//! fetch channels that feed them.

mod state;
mod store;

pub use state::{CatalogScope, CatalogState, Channel, Completion, Ticket};
pub use store::{CatalogStore, LoadRequest};
