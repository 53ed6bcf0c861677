use std::sync::Arc;

use tracing::{info, instrument};

use models::booking::BookingStatus;

use super::domain::{build_whatsapp_link, normalize_phone, notification_message, BookingInput, BookingReceipt, NewBooking};
use super::repository::BookingRepository;
use crate::errors::ServiceError;

/// Intake/notification configuration.
#[derive(Clone)]
pub struct BookingConfig {
    /// Country code prepended to bare 10-digit numbers.
    pub country_code: String,
    /// Admin number the notification deep-link targets.
    pub whatsapp_number: String,
}

/// Booking business service independent of the web framework.
pub struct BookingService<R: BookingRepository> {
    repo: Arc<R>,
    cfg: BookingConfig,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: Arc<R>, cfg: BookingConfig) -> Self { Self { repo, cfg } }

    /// Validate and persist an inbound booking, returning the stored id and
    /// the admin notification deep-link.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::booking::{BookingService, service::BookingConfig};
    /// use service::booking::domain::BookingInput;
    /// use service::booking::repository::mock::MockBookingRepository;
    /// let repo = Arc::new(MockBookingRepository::default());
    /// let svc = BookingService::new(repo, BookingConfig { country_code: "91".into(), whatsapp_number: "918149003738".into() });
    /// let input = BookingInput { name: "Jo".into(), phone: "9876543210".into(), email: None, package: "Basic".into(), date: "2025-01-01".into(), details: None };
    /// let receipt = tokio_test::block_on(svc.intake(input)).unwrap();
    /// assert!(receipt.wa_link.starts_with("https://wa.me/918149003738?text="));
    /// ```
    #[instrument(skip(self, input), fields(package = %input.package))]
    pub async fn intake(&self, input: BookingInput) -> Result<BookingReceipt, ServiceError> {
        let name = input.name.trim();
        if name.len() < 2 {
            return Err(ServiceError::Validation("Valid name required".into()));
        }
        if input.phone.trim().len() < 8 {
            return Err(ServiceError::Validation("Valid phone required".into()));
        }
        if input.package.trim().is_empty() {
            return Err(ServiceError::Validation("Package required".into()));
        }
        if input.date.trim().is_empty() {
            return Err(ServiceError::Validation("Date required".into()));
        }
        let phone = normalize_phone(input.phone.trim(), &self.cfg.country_code)
            .ok_or_else(|| ServiceError::Validation("Invalid phone format".into()))?;
        // Optional contact email; reject only a malformed value, not its absence
        let email = match input.email.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(e) if !e.contains('@') => {
                return Err(ServiceError::Validation("Invalid email".into()));
            }
            Some(e) => Some(e.to_string()),
        };

        let new_booking = NewBooking {
            name: name.to_string(),
            phone,
            email,
            package: input.package.clone(),
            event_date: input.date.clone(),
            details: input.details.unwrap_or_default(),
        };
        let stored = self.repo.insert(&new_booking).await?;

        let message = notification_message(stored.id, &new_booking);
        let wa_link = build_whatsapp_link(&self.cfg.whatsapp_number, &message);
        info!(booking_id = stored.id, package = %stored.package, "booking_created");
        Ok(BookingReceipt { booking_id: stored.id, wa_link })
    }

    /// Newest bookings first, capped at the dashboard limit.
    pub async fn list_recent(&self, limit: u64) -> Result<Vec<models::booking::Model>, ServiceError> {
        self.repo.list_recent(limit).await
    }

    /// Move a booking through the status lifecycle. The target must be one
    /// of the enumerated statuses and the move must be allowed by the
    /// transition table.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: i32, target: &str) -> Result<(), ServiceError> {
        let next = BookingStatus::parse(target)
            .ok_or_else(|| ServiceError::Validation(format!("unknown status {target:?}")))?;
        self.repo.set_status(id, next).await?;
        info!(booking_id = id, status = %next, "booking_status_changed");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::repository::mock::MockBookingRepository;

    fn svc() -> BookingService<MockBookingRepository> {
        BookingService::new(
            Arc::new(MockBookingRepository::default()),
            BookingConfig { country_code: "91".into(), whatsapp_number: "918149003738".into() },
        )
    }

    fn valid_input() -> BookingInput {
        BookingInput {
            name: "Jo".into(),
            phone: "9876543210".into(),
            email: None,
            package: "Basic".into(),
            date: "2025-01-01".into(),
            details: None,
        }
    }

    #[tokio::test]
    async fn intake_normalizes_phone_and_starts_pending() {
        let svc = svc();
        let receipt = svc.intake(valid_input()).await.expect("intake ok");
        assert_eq!(receipt.booking_id, 1);

        let rows = svc.list_recent(100).await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].phone, "919876543210");
        assert_eq!(rows[0].status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn intake_rejects_short_phone_without_insert() {
        let svc = svc();
        let mut input = valid_input();
        input.phone = "123".into();
        let err = svc.intake(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.list_recent(100).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn intake_rejects_one_letter_name_and_missing_fields() {
        let svc = svc();
        for (field, mutate) in [
            ("name", Box::new(|i: &mut BookingInput| i.name = " J ".into()) as Box<dyn Fn(&mut BookingInput)>),
            ("package", Box::new(|i: &mut BookingInput| i.package = "".into())),
            ("date", Box::new(|i: &mut BookingInput| i.date = "  ".into())),
        ] {
            let mut input = valid_input();
            mutate(&mut input);
            let err = svc.intake(input).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "field {field} should fail");
        }
    }

    #[tokio::test]
    async fn intake_accepts_missing_email_but_rejects_malformed() {
        let svc = svc();
        let mut input = valid_input();
        input.email = Some("  ".into());
        svc.intake(input).await.expect("blank email treated as absent");

        let mut input = valid_input();
        input.email = Some("not-an-email".into());
        let err = svc.intake(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn wa_link_embeds_booking_fields() {
        let svc = svc();
        let receipt = svc.intake(valid_input()).await.expect("intake ok");
        assert!(receipt.wa_link.starts_with("https://wa.me/918149003738?text="));
        // encoded message carries the sequential id
        assert!(receipt.wa_link.contains("%231") || receipt.wa_link.contains("#1"));
    }

    #[tokio::test]
    async fn transition_follows_table_and_rejects_unknown_status() {
        let svc = svc();
        let receipt = svc.intake(valid_input()).await.expect("intake ok");

        svc.transition(receipt.booking_id, "confirmed").await.expect("pending -> confirmed");
        svc.transition(receipt.booking_id, "completed").await.expect("confirmed -> completed");

        let err = svc.transition(receipt.booking_id, "pending").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err = svc.transition(receipt.booking_id, "archived").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn transition_on_missing_booking_is_not_found() {
        let svc = svc();
        let err = svc.transition(999, "confirmed").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let svc = svc();
        let receipt = svc.intake(valid_input()).await.expect("intake ok");
        assert!(svc.delete(receipt.booking_id).await.expect("delete"));
        assert!(!svc.delete(receipt.booking_id).await.expect("second delete"));
    }
}
