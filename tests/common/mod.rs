use std::sync::Once;

use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use food_ordering_core::{
    config::AppConfig,
    db,
    dto::catalog::CreateRestaurantRequest,
    dto::foods::CreateFoodRequest,
    services::catalog_service,
};

/// Connect to `TEST_DATABASE_URL` / `DATABASE_URL` when one is configured,
/// otherwise to a private in-memory SQLite database. A single pooled
/// connection keeps the in-memory database alive for the whole test.
pub async fn setup() -> Result<DatabaseConnection> {
    init_tracing();

    let conn = match std::env::var("TEST_DATABASE_URL")
        .map_err(anyhow::Error::from)
        .or_else(|_| AppConfig::from_env().map(|cfg| cfg.database_url))
    {
        Ok(url) => db::create_orm_conn(&url).await?,
        Err(_) => {
            let mut opts = ConnectOptions::new("sqlite::memory:");
            opts.max_connections(1);
            Database::connect(opts).await?
        }
    };

    db::setup_schema(&conn).await?;
    Ok(conn)
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .try_init();
    });
}

pub async fn seed_restaurant(conn: &DatabaseConnection) -> Result<Uuid> {
    let restaurant = catalog_service::create_restaurant(
        conn,
        CreateRestaurantRequest {
            name: format!("Warung {}", Uuid::new_v4()),
            address: Some("Jl. Kebon Sirih 1".into()),
        },
    )
    .await?;
    Ok(restaurant.id)
}

/// A valid food request; individual tests override fields to break it.
pub fn food_request(name: &str, price: &str, restaurant_id: Uuid) -> CreateFoodRequest {
    CreateFoodRequest {
        name: name.to_string(),
        description: "Betawi street food".to_string(),
        price: price.to_string(),
        image_url: None,
        category_id: None,
        restaurant_id,
        review_id: None,
    }
}
