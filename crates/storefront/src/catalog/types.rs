//! Catalog API records.

use kanap_core::{OrderId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record as served by the catalog.
///
/// The API names the identifier `_id`; inside the cart the same value is
/// stored as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Unit price in euros.
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    #[serde(rename = "altTxt")]
    pub alt_text: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    /// Unit price with currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::eur(self.price)
    }

    /// Whether `color` is one of the product's selectable colors.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// Response to a successful order submission.
///
/// The API echoes the contact and products back as well; only the id is
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
}
