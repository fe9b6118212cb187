//! Integration tests for seed.rs
//!
//! Tests database seeding functionality with SQLite in-memory
#![allow(clippy::unwrap_used)]

use app::config::SeedConfig;
use app::db::init_database;
use app::entities::{drivers, prelude::*, users};
use app::password::compare_password;
use app::seed::seed_from_config;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

async fn setup_test_db() -> sea_orm::DatabaseConnection {
    let db = init_database("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn seed_config(password: &str) -> SeedConfig {
    SeedConfig {
        admin_email: "admin@fleet.local".to_string(),
        admin_password: password.to_string(),
        drivers: vec!["Anna".to_string(), "Bernd".to_string()],
    }
}

#[tokio::test]
async fn test_seed_creates_admin_with_hashed_password() {
    let db = setup_test_db().await;
    seed_from_config(&db, &seed_config("s3cret")).await.unwrap();

    let admin = Users::find()
        .filter(users::Column::Email.eq("admin@fleet.local"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    assert_ne!(admin.password_hash, "s3cret");
    assert!(compare_password("s3cret", &admin.password_hash).await.unwrap());
}

#[tokio::test]
async fn test_seed_creates_active_drivers() {
    let db = setup_test_db().await;
    seed_from_config(&db, &seed_config("pw")).await.unwrap();

    let active = Drivers::find()
        .filter(drivers::Column::IsActive.eq(true))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(active, 2);
}

#[tokio::test]
async fn test_seed_is_idempotent_and_rotates_password() {
    let db = setup_test_db().await;
    seed_from_config(&db, &seed_config("first")).await.unwrap();
    seed_from_config(&db, &seed_config("second")).await.unwrap();

    assert_eq!(Users::find().count(&db).await.unwrap(), 1);
    assert_eq!(Drivers::find().count(&db).await.unwrap(), 2);

    let admin = Users::find().one(&db).await.unwrap().unwrap();
    assert!(compare_password("second", &admin.password_hash).await.unwrap());
    assert!(!compare_password("first", &admin.password_hash).await.unwrap());
}
