//! The cart store: one line per product, quantities, and a derived total.

use std::sync::Arc;

use maison_core::{CartLine, Product};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use crate::error::Rejection;

/// An add-to-cart intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl NewCartItem {
    /// A request for one unit of a product.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    fn validate(&self) -> Result<(), Rejection> {
        if self.product_id.trim().is_empty() {
            return Err(Rejection::MissingProductId);
        }
        if self.quantity == 0 {
            return Err(Rejection::NonPositiveQuantity);
        }
        if self.price < Decimal::ZERO {
            return Err(Rejection::NegativePrice {
                product_id: self.product_id.clone(),
            });
        }
        Ok(())
    }
}

impl From<&Product> for NewCartItem {
    fn from(product: &Product) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.primary_image().unwrap_or_default(),
        )
    }
}

/// Cart lines in insertion order. Product ids are unique across lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` to the cart.
    ///
    /// A product already in the cart has its quantity increased by the
    /// requested amount; its stored price, name, and image stay as they were
    /// when the line was created.
    ///
    /// # Errors
    ///
    /// Rejects an empty product id, a zero quantity, a negative price, a
    /// merge that would overflow the line's quantity, and any change that
    /// would push the total past what a `Decimal` can hold. A rejected intent
    /// leaves the cart unchanged.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<(), Rejection> {
        item.validate()?;

        if let Some(line) = self.line(&item.product_id) {
            let quantity = line.quantity.checked_add(item.quantity).ok_or_else(|| {
                Rejection::QuantityOverflow {
                    product_id: item.product_id.clone(),
                }
            })?;
            let price = line.price;
            self.ensure_total_fits(&item.product_id, price, quantity)?;
            if let Some(line) = self.line_mut(&item.product_id) {
                line.quantity = quantity;
            }
            return Ok(());
        }

        self.ensure_total_fits(&item.product_id, item.price, item.quantity)?;
        self.lines.push(CartLine {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity: item.quantity,
        });
        Ok(())
    }

    /// Sets a line's quantity to exactly `quantity`.
    ///
    /// # Errors
    ///
    /// Rejects a zero quantity (removal goes through
    /// [`CartState::remove_item`]), an id with no line, and a quantity whose
    /// total would overflow.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), Rejection> {
        if quantity == 0 {
            return Err(Rejection::NonPositiveQuantity);
        }
        let price = self
            .line(product_id)
            .map(|line| line.price)
            .ok_or_else(|| Rejection::NotInCart {
                product_id: product_id.to_string(),
            })?;
        self.ensure_total_fits(product_id, price, quantity)?;
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ(price × quantity), computed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checks that the total still fits in a `Decimal` once the line for
    /// `product_id` holds `quantity` units at `price`. Keeps [`CartState::total`]
    /// free of overflow.
    fn ensure_total_fits(
        &self,
        product_id: &str,
        price: Decimal,
        quantity: u32,
    ) -> Result<(), Rejection> {
        self.lines
            .iter()
            .filter(|line| line.product_id != product_id)
            .map(|line| (line.price, line.quantity))
            .chain(std::iter::once((price, quantity)))
            .try_fold(Decimal::ZERO, |acc, (price, quantity)| {
                price
                    .checked_mul(Decimal::from(quantity))
                    .and_then(|subtotal| acc.checked_add(subtotal))
            })
            .map(|_| ())
            .ok_or_else(|| Rejection::TotalOverflow {
                product_id: product_id.to_string(),
            })
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

/// Shared handle to a [`CartState`]. Clones share the same cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::new());
        Self {
            state: Arc::new(state),
        }
    }

    /// # Errors
    ///
    /// See [`CartState::add_item`].
    pub fn add_item(&self, item: NewCartItem) -> Result<(), Rejection> {
        let product_id = item.product_id.clone();
        let quantity = item.quantity;
        self.apply(|s| s.add_item(item))
            .inspect(|()| debug!(%product_id, quantity, "added to cart"))
    }

    /// # Errors
    ///
    /// See [`CartState::update_quantity`].
    pub fn update_quantity(&self, product_id: &str, quantity: u32) -> Result<(), Rejection> {
        self.apply(|s| s.update_quantity(product_id, quantity))
            .inspect(|()| debug!(product_id, quantity, "cart quantity updated"))
    }

    pub fn remove_item(&self, product_id: &str) -> bool {
        let removed = self.state.send_if_modified(|s| s.remove_item(product_id));
        debug!(product_id, removed, "remove from cart");
        removed
    }

    pub fn clear(&self) {
        self.state.send_if_modified(|s| {
            let had_lines = !s.is_empty();
            s.clear();
            had_lines
        });
        debug!("cart cleared");
    }

    pub fn read<R>(&self, f: impl FnOnce(&CartState) -> R) -> R {
        f(&self.state.borrow())
    }

    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.read(CartState::total)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    fn apply(
        &self,
        step: impl FnOnce(&mut CartState) -> Result<(), Rejection>,
    ) -> Result<(), Rejection> {
        let mut result = Ok(());
        self.state.send_if_modified(|s| {
            result = step(s);
            result.is_ok()
        });
        if let Err(ref rejection) = result {
            debug!(%rejection, "cart intent rejected");
        }
        result
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
