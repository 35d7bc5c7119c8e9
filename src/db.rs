use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entity;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Create every table the crate owns, derived from the entity definitions.
/// Statements are built for whichever backend the connection speaks, so the
/// same call works against Postgres and the in-memory SQLite the tests use.
pub async fn setup_schema(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(entity::Categories),
        schema.create_table_from_entity(entity::Restaurants),
        schema.create_table_from_entity(entity::Reviews),
        schema.create_table_from_entity(entity::Tags),
        schema.create_table_from_entity(entity::Foods),
        schema.create_table_from_entity(entity::FoodTags),
        schema.create_table_from_entity(entity::Vouchers),
        schema.create_table_from_entity(entity::Carts),
        schema.create_table_from_entity(entity::Orders),
        schema.create_table_from_entity(entity::LineItems),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        conn.execute(backend.build(&*statement)).await?;
    }

    Ok(())
}
