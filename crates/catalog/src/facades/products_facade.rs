//! # Products Facade
//!
//! Resource-level operations on products: paged lookups projected into [`ProductView`]s,
//! creation, partial update and deletion. It wraps a `StoreClient<Product>` and gets
//! `load` / `remove` from [`ResourceClient`].
use crate::model::{CreateProductRequest, Product, ProductId, ProductView, UpdateProductRequest};
use crate::product_store::{ProductCriterion, ProductError, ProductSortKey};
use async_trait::async_trait;
use store_actor::{Direction, FindQuery, ResourceClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Facade over the Product store.
#[derive(Clone)]
pub struct ProductsFacade {
    store: StoreClient<Product>,
}

impl ProductsFacade {
    pub fn new(store: StoreClient<Product>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ResourceClient<Product> for ProductsFacade {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.store
    }

    fn not_found(id: &ProductId) -> ProductError {
        ProductError::NotFound(id.to_string())
    }

    fn map_error(e: StoreError) -> ProductError {
        ProductError::from(e)
    }
}

/// Applies the supplied, non-null fields of `request` that differ from the current values.
///
/// Fields left unset or sent as `null` are skipped. Equal values are skipped, so the
/// product's change set only names fields whose value really moved.
pub fn apply_update(product: &mut Product, request: &UpdateProductRequest) {
    if let Some(name) = request.name().filter(|name| *name != product.name()) {
        product.set_name(name);
    }
    if let Some(price) = request
        .price()
        .filter(|price| price.total_cmp(&product.price()).is_ne())
    {
        product.set_price(price);
    }
}

impl ProductsFacade {
    /// Products matching every criterion, ordered and paged as the query says.
    #[instrument(skip(self))]
    pub async fn find_by(
        &self,
        query: FindQuery<Product>,
    ) -> Result<Vec<ProductView>, ProductError> {
        debug!("Sending request");
        let products = self.store.find(query).await.map_err(Self::map_error)?;
        Ok(products.iter().map(ProductView::from).collect())
    }

    /// One page of all products, ordered by id.
    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ProductView>, ProductError> {
        self.find_by(
            FindQuery::new()
                .order_by(ProductSortKey::Id, Direction::Asc)
                .limit(limit)
                .offset(offset),
        )
        .await
    }

    /// The first product matching every criterion.
    ///
    /// # Errors
    /// `ProductError::NotFound` when nothing matches.
    #[instrument(skip(self))]
    pub async fn find_one_by(
        &self,
        criteria: Vec<ProductCriterion>,
        order_by: Vec<(ProductSortKey, Direction)>,
    ) -> Result<ProductView, ProductError> {
        let description = format!("{criteria:?}");
        let query = FindQuery {
            criteria,
            order_by,
            limit: 1,
            offset: 0,
        };
        self.find_by(query)
            .await?
            .into_iter()
            .next()
            .ok_or(ProductError::NotFound(description))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: ProductId) -> Result<ProductView, ProductError> {
        self.find_one_by(vec![ProductCriterion::Id(id)], Vec::new()).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.store.create(request).await.map_err(Self::map_error)?;
        info!(id = %product.id(), "Product created");
        Ok(product)
    }

    /// Loads the product, applies the request and persists only if something changed.
    ///
    /// Returns the product as it now stands. `updated_at` moves only when a write happened.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Product, ProductError> {
        let mut product = self.load(id).await?;
        apply_update(&mut product, request);

        if !product.is_changed() {
            info!("No changes, nothing persisted");
            return Ok(product);
        }

        product.touch();
        self.store
            .save(product.clone())
            .await
            .map_err(Self::map_error)?;
        info!(fields = ?product.changed_fields(), "Changes persisted");
        Ok(product)
    }

    /// Deletes an existing product.
    ///
    /// # Errors
    /// `ProductError::NotFound` when the product does not exist; nothing is removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<bool, ProductError> {
        self.load(id).await?;
        self.remove(id).await?;
        info!("Product deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_actor::mock::{create_mock_client, expect_find, expect_get, expect_save, MockClient};
    use store_actor::StoreEntity;

    fn mug() -> Product {
        Product::new(ProductId(1), "Mug", 4.5)
    }

    #[test]
    fn test_apply_update_skips_unset_null_and_equal_fields() {
        let mut product = mug();

        apply_update(&mut product, &UpdateProductRequest::new());
        assert!(!product.is_changed());

        let mut request = UpdateProductRequest::new();
        request.set_name(None).set_price(Some(4.5));
        apply_update(&mut product, &request);
        assert!(!product.is_changed());
        assert_eq!(product.name(), "Mug");

        let mut request = UpdateProductRequest::new();
        request.set_price(Some(5.0));
        apply_update(&mut product, &request);
        assert_eq!(product.changed_fields(), vec!["price"]);
        assert_eq!(product.price(), 5.0);
    }

    #[test]
    fn test_apply_update_twice_with_nan_price_changes_once() {
        let mut request = UpdateProductRequest::new();
        request.set_price(Some(f64::NAN));

        let mut product = mug();
        apply_update(&mut product, &request);
        assert_eq!(product.changed_fields(), vec!["price"]);

        product.clear_changes();
        apply_update(&mut product, &request);
        assert!(!product.is_changed());
    }

    #[tokio::test]
    async fn test_update_with_same_values_does_not_write() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(mug()));
        let facade = ProductsFacade::new(mock.client());

        let mut request = UpdateProductRequest::new();
        request.set_name(Some("Mug".into())).set_price(Some(4.5));
        let product = facade.update(ProductId(1), &request).await.unwrap();

        assert!(product.updated_at().is_none());
        mock.verify();
        assert_eq!(mock.calls(), vec!["get"]);
    }

    #[tokio::test]
    async fn test_update_persists_changed_fields_only() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(mug()));
        mock.expect_save().return_ok(());
        let facade = ProductsFacade::new(mock.client());

        let mut request = UpdateProductRequest::new();
        request.set_name(Some("Cup".into()));
        let product = facade.update(ProductId(1), &request).await.unwrap();

        assert_eq!(product.name(), "Cup");
        assert_eq!(product.price(), 4.5);
        assert!(product.updated_at().is_some());
        assert_eq!(mock.calls(), vec!["get", "save"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(9)).return_ok(None);
        let facade = ProductsFacade::new(mock.client());

        let mut request = UpdateProductRequest::new();
        request.set_name(Some("X".into()));
        let result = facade.update(ProductId(9), &request).await;

        assert_eq!(result, Err(ProductError::NotFound("product_9".into())));
        assert_eq!(mock.calls(), vec!["get"]);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_storage_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(mug()));
        mock.expect_save().return_err(StoreError::ActorDropped);
        let facade = ProductsFacade::new(mock.client());

        let mut request = UpdateProductRequest::new();
        request.set_price(Some(1.0));
        let result = facade.update(ProductId(1), &request).await;

        assert!(matches!(result, Err(ProductError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_removes_nothing() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(3)).return_ok(None);
        let facade = ProductsFacade::new(mock.client());

        let result = facade.delete(ProductId(3)).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
        assert_eq!(mock.calls(), vec!["get"]);
    }

    #[tokio::test]
    async fn test_delete_existing_product() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(mug()));
        mock.expect_delete(ProductId(1)).return_ok(());
        let facade = ProductsFacade::new(mock.client());

        assert_eq!(facade.delete(ProductId(1)).await, Ok(true));
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_all_sends_paged_query_ordered_by_id() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let facade = ProductsFacade::new(client);
        let stored = mug();

        let task = tokio::spawn(async move { facade.find_all(5, 10).await });

        let (query, responder) = expect_find(&mut receiver)
            .await
            .expect("Expected Find request");
        assert!(query.criteria.is_empty());
        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 10);
        assert!(matches!(
            query.order_by.as_slice(),
            [(ProductSortKey::Id, Direction::Asc)]
        ));
        responder.send(Ok(vec![stored.clone()])).unwrap();

        let views = task.await.unwrap().unwrap();
        assert_eq!(views, vec![ProductView::from(&stored)]);
    }

    #[tokio::test]
    async fn test_find_one_without_match_is_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_find().return_ok(Vec::new());
        let facade = ProductsFacade::new(mock.client());

        let result = facade.find_one(ProductId(4)).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_saves_patched_entity() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let facade = ProductsFacade::new(client);

        let task = tokio::spawn(async move {
            let mut request = UpdateProductRequest::new();
            request.set_name(None).set_price(Some(9.99));
            facade.update(ProductId(1), &request).await
        });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, ProductId(1));
        responder.send(Ok(Some(mug()))).unwrap();

        let (saved, responder) = expect_save(&mut receiver)
            .await
            .expect("Expected Save request");
        assert_eq!(saved.name(), "Mug");
        assert_eq!(saved.price(), 9.99);
        assert_eq!(saved.changed_fields(), vec!["price"]);
        responder.send(Ok(())).unwrap();

        assert!(task.await.unwrap().is_ok());
    }
}
