use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Singleton-per-type site asset (logo and friends). Writes are upserts
/// keyed by `asset_type`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_type: String,
    pub image_url: String,
    pub public_id: String,
    pub alt_text: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_desc(Column::UpdatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn upsert(
    db: &DatabaseConnection,
    asset_type: &str,
    image_url: &str,
    public_id: &str,
    alt_text: &str,
) -> Result<Model, ModelError> {
    if asset_type.trim().is_empty() {
        return Err(ModelError::Validation("asset type required".into()));
    }
    let now = Utc::now().into();
    let existing = Entity::find()
        .filter(Column::AssetType.eq(asset_type))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    match existing {
        Some(found) => {
            let mut am: ActiveModel = found.into();
            am.image_url = Set(image_url.to_string());
            am.public_id = Set(public_id.to_string());
            am.alt_text = Set(alt_text.to_string());
            am.updated_at = Set(now);
            am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                asset_type: Set(asset_type.to_string()),
                image_url: Set(image_url.to_string()),
                public_id: Set(public_id.to_string()),
                alt_text: Set(alt_text.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
        }
    }
}
