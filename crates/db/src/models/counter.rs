use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Set};
use serde::Serialize;

use crate::entities::counter;

/// One row per recorded visit. The row's existence is the signal; the
/// exposed metric is the table's row count.
#[derive(Debug, Clone, Serialize)]
pub struct Counter {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Counter {
    fn from_model(model: counter::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    pub async fn create<C: ConnectionTrait>(db: &C) -> Result<Counter, DbErr> {
        let now = Utc::now();
        let model = counter::ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
        Ok(Self::from_model(model))
    }

    /// Removes every row in one statement. Identity values are not reset,
    /// so ids stay unique across clears.
    pub async fn clear<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        let result = counter::Entity::delete_many().exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        counter::Entity::find().count(db).await
    }
}
