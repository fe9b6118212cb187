use crate::entities::{drivers, prelude::*, sessions, users};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

pub type Driver = drivers::Model;
pub type User = users::Model;

/// Read access to the driver roster.
#[async_trait]
pub trait DriverStore: Send + Sync {
    /// Active drivers, ascending by name.
    async fn list_active(&self) -> Result<Vec<Driver>>;
}

/// Resolves a session token to the signed-in user.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self, token: Option<&str>) -> Result<Option<User>>;
}

#[derive(Clone)]
pub struct DbDriverStore {
    db: DatabaseConnection,
}

impl DbDriverStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DriverStore for DbDriverStore {
    async fn list_active(&self) -> Result<Vec<Driver>> {
        let list = Drivers::find()
            .filter(drivers::Column::IsActive.eq(true))
            .order_by_asc(drivers::Column::Name)
            .all(&self.db)
            .await?;

        debug!("Loaded {} active drivers", list.len());
        Ok(list)
    }
}

/// Sessions stored in the `sessions` table. Expired rows count as signed out.
#[derive(Clone)]
pub struct DbSessionProvider {
    db: DatabaseConnection,
}

impl DbSessionProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionProvider for DbSessionProvider {
    async fn current_user(&self, token: Option<&str>) -> Result<Option<User>> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let found = Sessions::find_by_id(token.to_string())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .find_also_related(Users)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(_, user)| user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use chrono::Duration;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Set};
    use uuid::Uuid;

    async fn setup_test_db() -> DatabaseConnection {
        let db = init_database("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn insert_driver(db: &DatabaseConnection, name: &str, is_active: bool) {
        drivers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            phone: Set(None),
            is_active: Set(is_active),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn insert_user(db: &DatabaseConnection, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        users::ActiveModel {
            id: Set(id),
            email: Set(email.to_string()),
            name: Set("Dispatcher".to_string()),
            password_hash: Set("x".to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
        id
    }

    async fn insert_session(db: &DatabaseConnection, token: &str, user_id: Uuid, ttl: Duration) {
        sessions::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            expires_at: Set(Utc::now() + ttl),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_active_empty() {
        let store = DbDriverStore::new(setup_test_db().await);
        assert!(store.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_active_filters_and_sorts() {
        let db = setup_test_db().await;
        insert_driver(&db, "Zoe", true).await;
        insert_driver(&db, "Mika", false).await;
        insert_driver(&db, "Anton", true).await;
        insert_driver(&db, "Lena", true).await;

        let store = DbDriverStore::new(db);
        let names: Vec<_> = store
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(names, vec!["Anton", "Lena", "Zoe"]);
    }

    #[tokio::test]
    async fn test_current_user_without_token() {
        let provider = DbSessionProvider::new(setup_test_db().await);
        assert!(provider.current_user(None).await.unwrap().is_none());
        assert!(provider.current_user(Some("")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_user_unknown_token() {
        let provider = DbSessionProvider::new(setup_test_db().await);
        assert!(provider.current_user(Some("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_user_valid_session() {
        let db = setup_test_db().await;
        let user_id = insert_user(&db, "ops@fleet.local").await;
        insert_session(&db, "tok-1", user_id, Duration::hours(1)).await;

        let provider = DbSessionProvider::new(db);
        let user = provider.current_user(Some("tok-1")).await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "ops@fleet.local");
    }

    #[tokio::test]
    async fn test_current_user_expired_session() {
        let db = setup_test_db().await;
        let user_id = insert_user(&db, "ops@fleet.local").await;
        insert_session(&db, "old", user_id, Duration::hours(-1)).await;

        let provider = DbSessionProvider::new(db);
        assert!(provider.current_user(Some("old")).await.unwrap().is_none());
    }

    #[test]
    fn test_user_json_hides_password_hash() {
        let user = User {
            id: Uuid::nil(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            password_hash: "secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "a@b.c");
    }
}
