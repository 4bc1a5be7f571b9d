//! StoreEntity implementation for the Product domain type.

use crate::model::{CreateProductRequest, Product, ProductId};
use std::cmp::Ordering;
use std::convert::Infallible;
use store_actor::StoreEntity;

/// Lookup criteria for products. Several criteria are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCriterion {
    Id(ProductId),
    Name(String),
    Price(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    Id,
    Name,
    Price,
    CreatedAt,
}

impl StoreEntity for Product {
    type Id = ProductId;
    type Create = CreateProductRequest;
    type Criterion = ProductCriterion;
    type SortKey = ProductSortKey;
    type Error = Infallible;

    fn from_create_params(id: ProductId, params: CreateProductRequest) -> Result<Self, Infallible> {
        Ok(Product::new(id, params.name, params.price))
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn matches(&self, criterion: &ProductCriterion) -> bool {
        match criterion {
            ProductCriterion::Id(id) => self.id == *id,
            ProductCriterion::Name(name) => &self.name == name,
            ProductCriterion::Price(price) => self.price == *price,
        }
    }

    fn compare_by(&self, other: &Self, key: &ProductSortKey) -> Ordering {
        match key {
            ProductSortKey::Id => self.id.cmp(&other.id),
            ProductSortKey::Name => self.name.cmp(&other.name),
            ProductSortKey::Price => self.price.total_cmp(&other.price),
            ProductSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn clear_changes(&mut self) {
        self.changes.clear();
    }
}
