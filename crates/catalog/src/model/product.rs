//! Products: entity, id, create/update payloads and response view.
//!
//! # Store Actor
//! [`Product`] implements the [`StoreEntity`](store_actor::StoreEntity) trait, allowing it
//! to be kept by a [`StoreActor`](store_actor::StoreActor). See
//! [`product_store`](crate::product_store) for the criteria and sort keys.

use crate::model::{Changes, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub(crate) id: ProductId,
    pub(crate) name: String,
    pub(crate) price: f64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    pub(crate) changes: Changes,
}

impl Product {
    /// Creates a new Product stamped with the current time.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the store actor)
    /// * `name` - Product name
    /// * `price` - Product price
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            created_at: Utc::now(),
            updated_at: None,
            changes: Changes::default(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.changes.mark("name");
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
        self.changes.mark("price");
    }

    /// Stamps `updated_at`. Bookkeeping only, not a tracked change.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.changes.fields()
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
}

/// Fields of a product that an update request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Price,
}

/// Partial update of a product. Fields never supplied stay [`Patch::Unset`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[serde(default)]
    name: Patch<String>,
    #[serde(default)]
    price: Patch<f64>,
}

impl UpdateProductRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a supplied name; `None` is an explicit null.
    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Records a supplied price; `None` is an explicit null.
    pub fn set_price(&mut self, price: Option<f64>) -> &mut Self {
        self.price = price.into();
        self
    }

    pub fn was_set(&self, field: ProductField) -> bool {
        match field {
            ProductField::Name => self.name.is_set(),
            ProductField::Price => self.price.is_set(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.value().map(String::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.price.value().copied()
    }
}

/// Response projection of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_is_clean() {
        let product = Product::new(ProductId(1), "Mug", 4.5);
        assert!(!product.is_changed());
        assert!(product.updated_at().is_none());
    }

    #[test]
    fn test_mutators_mark_fields_even_with_same_value() {
        let mut product = Product::new(ProductId(1), "Mug", 4.5);
        product.set_price(4.5);
        assert!(product.is_changed());
        assert_eq!(product.changed_fields(), vec!["price"]);

        product.set_name("Cup");
        assert_eq!(product.changed_fields(), vec!["name", "price"]);
    }

    #[test]
    fn test_touch_is_not_a_change() {
        let mut product = Product::new(ProductId(1), "Mug", 4.5);
        product.touch();
        assert!(product.updated_at().is_some());
        assert!(!product.is_changed());
    }

    #[test]
    fn test_update_request_tracks_supplied_fields() {
        let mut request = UpdateProductRequest::new();
        assert!(!request.was_set(ProductField::Name));

        request.set_name(Some("Cup".into())).set_price(None);
        assert!(request.was_set(ProductField::Name));
        assert!(request.was_set(ProductField::Price));
        assert_eq!(request.name(), Some("Cup"));
        assert_eq!(request.price(), None);
    }

    #[test]
    fn test_update_request_from_json() {
        let request: UpdateProductRequest =
            serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert!(!request.was_set(ProductField::Name));
        assert!(request.was_set(ProductField::Price));
        assert_eq!(request.price(), None);

        let unknown = serde_json::from_str::<UpdateProductRequest>(r#"{"colour": "red"}"#);
        assert!(unknown.is_err());
    }
}
