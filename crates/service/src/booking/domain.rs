use serde::{Deserialize, Serialize};

/// Raw intake payload as submitted by the public booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingInput {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub package: String,
    pub date: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Validated booking ready for insertion; phone is normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub package: String,
    pub event_date: String,
    pub details: String,
}

/// Intake result returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking_id: i32,
    pub wa_link: String,
}

/// Normalize a phone number to a country-coded digit string.
///
/// Strips every non-digit character; a bare 10-digit national number gets
/// the country code prepended, a number already carrying the prefix is kept
/// as-is, everything else is rejected.
///
/// # Examples
/// ```
/// use service::booking::domain::normalize_phone;
/// assert_eq!(normalize_phone("98765 43210", "91"), Some("919876543210".into()));
/// assert_eq!(normalize_phone("+91 98765-43210", "91"), Some("919876543210".into()));
/// assert_eq!(normalize_phone("123", "91"), None);
/// ```
pub fn normalize_phone(raw: &str, country: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.len() == 10 {
        return Some(format!("{country}{digits}"));
    }
    if digits.starts_with(country) {
        return Some(digits);
    }
    None
}

/// Deep-link that opens the messaging app with the text pre-populated.
pub fn build_whatsapp_link(number: &str, message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{number}?text={encoded}")
}

/// Admin notification body embedding the stored record.
pub fn notification_message(booking_id: i32, b: &NewBooking) -> String {
    let details = if b.details.is_empty() { "No details" } else { &b.details };
    format!(
        "🌟 NEW BOOKING #{id} 🌟\n👤 {name}\n📱 {phone}\n📦 {package}\n📅 {date}\n📝 {details}",
        id = booking_id,
        name = b.name,
        phone = b.phone,
        package = b.package,
        date = b.event_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn ten_digit_number_gains_country_code() {
        let n = normalize_phone("9876543210", "91").expect("valid");
        assert_eq!(n, "919876543210");
        assert_eq!(n.len(), 10 + "91".len());
    }

    #[test]
    fn normalization_is_idempotent_on_prefixed_numbers() {
        let once = normalize_phone("9876543210", "91").expect("valid");
        let twice = normalize_phone(&once, "91").expect("still valid");
        assert_eq!(once, twice);
    }

    #[test]
    fn punctuation_and_spaces_are_stripped() {
        assert_eq!(normalize_phone("+91 (98765) 43-210", "91"), Some("919876543210".into()));
    }

    #[test]
    fn short_or_foreign_numbers_rejected() {
        assert_eq!(normalize_phone("123", "91"), None);
        assert_eq!(normalize_phone("4412345678901", "91"), None);
        assert_eq!(normalize_phone("", "91"), None);
        assert_eq!(normalize_phone("abc", "91"), None);
    }

    #[test]
    fn whatsapp_link_targets_number_and_encodes_text() {
        let link = build_whatsapp_link("918149003738", "NEW BOOKING #7");
        assert!(link.starts_with("https://wa.me/918149003738?text="));
        // the raw space never survives encoding
        assert!(!link.contains(' '));
        let parsed = Url::parse(&link).expect("link parses");
        let text: String = parsed
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .expect("text param present");
        assert_eq!(text, "NEW BOOKING #7");
    }

    #[test]
    fn notification_message_defaults_empty_details() {
        let nb = NewBooking {
            name: "Jo".into(),
            phone: "919876543210".into(),
            email: None,
            package: "Basic".into(),
            event_date: "2025-01-01".into(),
            details: String::new(),
        };
        let msg = notification_message(7, &nb);
        assert!(msg.contains("NEW BOOKING #7"));
        assert!(msg.contains("📝 No details"));
    }
}
