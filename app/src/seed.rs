use crate::config::SeedConfig;
use crate::entities::{drivers, prelude::*, users};
use crate::error::Result;
use crate::password::hash_password;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

pub async fn seed_from_config(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    seed_admin(db, config).await?;
    seed_drivers(db, &config.drivers).await
}

async fn seed_admin(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    let password_hash = hash_password(&config.admin_password).await?;

    let existing = Users::find()
        .filter(users::Column::Email.eq(config.admin_email.as_str()))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        let mut user: users::ActiveModel = existing.into_active_model();
        user.password_hash = Set(password_hash);
        user.update(db).await?;
        info!("Updated admin user: {}", config.admin_email);
    } else {
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(config.admin_email.clone()),
            name: Set("Admin".to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
        };
        user.insert(db).await?;
        info!("Created admin user: {}", config.admin_email);
    }

    Ok(())
}

async fn seed_drivers(db: &DatabaseConnection, names: &[String]) -> Result<()> {
    for name in names {
        let existing = Drivers::find()
            .filter(drivers::Column::Name.eq(name.as_str()))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        drivers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.clone()),
            phone: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
        info!("Created driver: {}", name);
    }

    Ok(())
}
