//! Demo binary: starts the catalog, walks a product and a user through create, partial
//! update and lookup, and prints the resulting views as JSON.

use anyhow::{anyhow, Context};
use catalog::api::{self, ApiError};
use catalog::config::CatalogConfig;
use catalog::lifecycle::CatalogSystem;
use catalog::model::{ProductView, UserView};
use store_actor::tracing::setup_tracing;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CatalogConfig::load().unwrap_or_else(|e| e.exit());
    setup_tracing(&config.log_level);

    info!(?config, "Starting catalog");
    let system = CatalogSystem::new(&config);

    // Products
    let product = async {
        let request = api::parse_create_product(r#"{"name": "Mug", "price": 4.5}"#)?;
        let product = system.products.create(request).await?;

        let patch = api::parse_update_product(r#"{"price": 5.25, "name": null}"#)?;
        let product = system.products.update(product.id(), &patch).await?;
        Ok::<_, ApiError>(product)
    }
    .instrument(tracing::info_span!("product_demo"))
    .await
    .context("product demo failed")?;

    let page = system
        .products
        .find_all(config.page_limit, 0)
        .await
        .context("Cannot list products")?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    println!(
        "{}",
        serde_json::to_string_pretty(&ProductView::from(&product))?
    );

    // Users
    let user = async {
        let request = api::parse_create_user(
            r#"{"name": "Alice", "surname": "Smith", "email": "alice@example.com",
                "username": "alice", "password": "correct horse"}"#,
        )?;
        let user = system.users.create(request).await?;

        // Same name and password again: nothing is written.
        let patch = api::parse_update_user(r#"{"name": "Alice", "password": "correct horse"}"#)?;
        let user = system.users.update(user.id(), &patch).await?;
        Ok::<_, ApiError>(user)
    }
    .instrument(tracing::info_span!("user_demo"))
    .await
    .context("user demo failed")?;
    println!("{}", serde_json::to_string_pretty(&UserView::from(&user))?);

    // A second registration with the same email is refused by the store.
    let duplicate = api::parse_create_user(
        r#"{"name": "Alice", "surname": "Jones", "email": "alice@example.com",
            "username": "ajones", "password": "hunter2"}"#,
    )?;
    if let Err(e) = system.users.create(duplicate).await {
        let response = ApiError::from(e).to_response("create user");
        warn!(status = response.status, message = %response.message, "Registration refused");
    }

    system.shutdown().await.map_err(|e| anyhow!(e))?;
    Ok(())
}
