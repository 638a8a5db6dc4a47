//! The client-held shopping cart.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s identified by
//! `(product id, color)`. Only list manipulation lives here; persistence
//! belongs to the storefront's cart store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One (product, color, quantity) entry in the cart.
///
/// Serialized with the keys `id`, `color` and `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product identifier.
    pub id: ProductId,
    /// Selected color, one of the product's colors.
    pub color: String,
    /// Number of units.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub fn new(id: ProductId, color: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            color: color.into(),
            quantity,
        }
    }

    /// Whether this line is keyed by `(id, color)`.
    #[must_use]
    pub fn matches(&self, id: &ProductId, color: &str) -> bool {
        self.id == *id && self.color == color
    }
}

/// Ordered sequence of cart lines, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the first line keyed by `(id, color)`.
    #[must_use]
    pub fn find(&self, id: &ProductId, color: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(id, color))
    }

    /// Mutable variant of [`Cart::find`].
    pub fn find_mut(&mut self, id: &ProductId, color: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.matches(id, color))
    }

    /// Add `quantity` units of `(id, color)`.
    ///
    /// Accumulates onto an existing line, otherwise appends a new one. The
    /// quantity is not range-checked here; callers validate user input.
    pub fn upsert(&mut self, id: ProductId, color: &str, quantity: u32) {
        if let Some(line) = self.find_mut(&id, color) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(id, color, quantity));
        }
    }

    /// Overwrite the quantity of the line keyed by `(id, color)`.
    ///
    /// Returns `false` and leaves the cart untouched if no line matches.
    pub fn set_quantity(&mut self, id: &ProductId, color: &str, quantity: u32) -> bool {
        match self.find_mut(id, color) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every line keyed by `(id, color)`, returning how many went.
    pub fn remove(&mut self, id: &ProductId, color: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(id, color));
        before - self.lines.len()
    }

    /// Distinct product ids in first-seen order.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter(|line| seen.insert(&line.id))
            .map(|line| line.id.clone())
            .collect()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}
