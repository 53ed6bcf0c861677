use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use sea_orm::{DatabaseConnection, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ModelError;

/// Booking lifecycle. Transitions are restricted to the table in
/// [`BookingStatus::can_transition_to`]; `cancelled` and `completed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Parse the wire value; `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// Transition table: pending may be confirmed or cancelled, confirmed
    /// may be completed or cancelled, terminal states allow nothing.
    /// Identity transitions are rejected like any other disallowed move.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub package: String,
    pub event_date: String,
    pub details: String,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().len() < 2 {
        return Err(ModelError::Validation("valid name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Insert a booking with status `pending`. The phone must already be
/// normalized by the caller; this only enforces the stored invariant.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    email: Option<&str>,
    package: &str,
    event_date: &str,
    details: &str,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("phone must be a normalized digit string".into()));
    }
    if let Some(e) = email {
        validate_email(e)?;
    }
    if package.trim().is_empty() {
        return Err(ModelError::Validation("package required".into()));
    }
    if event_date.trim().is_empty() {
        return Err(ModelError::Validation("date required".into()));
    }
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(phone.to_string()),
        email: Set(email.map(|e| e.to_string())),
        package: Set(package.to_string()),
        event_date: Set(event_date.to_string()),
        details: Set(details.to_string()),
        status: Set(BookingStatus::Pending),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Most recent bookings first, capped.
pub async fn list_recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Move a booking to `next` subject to the transition table.
pub async fn set_status(db: &DatabaseConnection, id: i32, next: BookingStatus) -> Result<(), ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::NotFound(format!("booking {id} not found")))?;
    if !found.status.can_transition_to(next) {
        return Err(ModelError::Transition { from: found.status, to: next });
    }
    let mut am: ActiveModel = found.into();
    am.status = Set(next);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

/// Administrative hard delete; reports whether a row existed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod status_tests {
    use super::BookingStatus::*;

    #[test]
    fn pending_can_confirm_or_cancel() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn confirmed_can_complete_or_cancel() {
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for next in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!Cancelled.can_transition_to(next));
            assert!(!Completed.can_transition_to(next));
        }
    }

    #[test]
    fn identity_transitions_rejected() {
        for s in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn parse_roundtrips_wire_values() {
        for s in [Pending, Confirmed, Cancelled, Completed] {
            assert_eq!(super::BookingStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(super::BookingStatus::parse("archived"), None);
    }
}
