use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image_url: String,
    pub public_id: String,
    pub caption: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    image_url: &str,
    public_id: &str,
    caption: &str,
    display_order: i32,
) -> Result<Model, ModelError> {
    if image_url.trim().is_empty() || public_id.trim().is_empty() {
        return Err(ModelError::Validation("image_url and public_id required".into()));
    }
    let am = ActiveModel {
        image_url: Set(image_url.to_string()),
        public_id: Set(public_id.to_string()),
        caption: Set(caption.to_string()),
        display_order: Set(display_order),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Active images ordered by explicit position, newest first within a
/// position.
pub async fn list_active(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::DisplayOrder)
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Soft delete: the row stays for auditability, the stored object is kept.
pub async fn soft_delete_by_public_id(db: &DatabaseConnection, public_id: &str) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::PublicId.eq(public_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    let Some(found) = found else { return Ok(false) };
    let mut am: ActiveModel = found.into();
    am.is_active = Set(false);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(true)
}

/// Apply a target permutation of ids as the new display order in one
/// transaction. Rows are updated in place, never dropped and reinserted; an
/// unknown or duplicated id fails the whole operation.
pub async fn reorder(db: &DatabaseConnection, ids: &[i32]) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(ModelError::Validation(format!("duplicate id {id} in reorder")));
        }
    }
    let txn = db.begin().await.map_err(|e| ModelError::Db(e.to_string()))?;
    for (position, id) in ids.iter().enumerate() {
        let res = Entity::update_many()
            .col_expr(Column::DisplayOrder, Expr::value(position as i32))
            .filter(Column::Id.eq(*id))
            .exec(&txn)
            .await
            .map_err(|e| ModelError::Db(e.to_string()))?;
        if res.rows_affected == 0 {
            txn.rollback().await.map_err(|e| ModelError::Db(e.to_string()))?;
            return Err(ModelError::NotFound(format!("gallery image {id} not found")));
        }
    }
    txn.commit().await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
