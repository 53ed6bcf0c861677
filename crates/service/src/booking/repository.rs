use async_trait::async_trait;

use models::booking::BookingStatus;

use super::domain::NewBooking;
use crate::errors::ServiceError;

/// Repository abstraction for booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &NewBooking) -> Result<models::booking::Model, ServiceError>;
    async fn list_recent(&self, limit: u64) -> Result<Vec<models::booking::Model>, ServiceError>;
    async fn set_status(&self, id: i32, next: BookingStatus) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookingRepository {
        rows: Mutex<Vec<models::booking::Model>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn insert(&self, booking: &NewBooking) -> Result<models::booking::Model, ServiceError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let row = models::booking::Model {
                id: *next_id,
                name: booking.name.clone(),
                phone: booking.phone.clone(),
                email: booking.email.clone(),
                package: booking.package.clone(),
                event_date: booking.event_date.clone(),
                details: booking.details.clone(),
                status: BookingStatus::Pending,
                created_at: Utc::now().into(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn list_recent(&self, limit: u64) -> Result<Vec<models::booking::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            let mut out: Vec<_> = rows.clone();
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            out.truncate(limit as usize);
            Ok(out)
        }

        async fn set_status(&self, id: i32, next: BookingStatus) -> Result<(), ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ServiceError::NotFound(format!("booking {id} not found")))?;
            if !row.status.can_transition_to(next) {
                return Err(ServiceError::Conflict(format!(
                    "transition not allowed: {} -> {}",
                    row.status, next
                )));
            }
            row.status = next;
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() != before)
        }
    }
}
