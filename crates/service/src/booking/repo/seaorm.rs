use sea_orm::DatabaseConnection;

use models::booking::BookingStatus;

use crate::booking::domain::NewBooking;
use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository delegating to the `models` helpers.
pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> Result<models::booking::Model, ServiceError> {
        models::booking::create(
            &self.db,
            &booking.name,
            &booking.phone,
            booking.email.as_deref(),
            &booking.package,
            &booking.event_date,
            &booking.details,
        )
        .await
        .map_err(ServiceError::from)
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<models::booking::Model>, ServiceError> {
        models::booking::list_recent(&self.db, limit).await.map_err(ServiceError::from)
    }

    async fn set_status(&self, id: i32, next: BookingStatus) -> Result<(), ServiceError> {
        models::booking::set_status(&self.db, id, next).await.map_err(ServiceError::from)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        models::booking::delete(&self.db, id).await.map_err(ServiceError::from)
    }
}
