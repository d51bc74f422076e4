use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Availability lifecycle of a catalog product.
///
/// The status is advisory: it mirrors a negotiation happening over an
/// external messaging channel, so every directed transition between the
/// three states is permitted and the last write wins.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Product is offered for sale and gets a contact action in the catalog.
    Available,
    /// Product is set aside for a buyer but not yet sold.
    Reserved,
    /// Product has been sold.
    Sold,
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl ProductStatus {
    /// All states, in the order they are rendered as admin tabs.
    pub const ALL: [ProductStatus; 3] = [Self::Available, Self::Reserved, Self::Sold];

    /// Stable string form used in the database column and in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }
}

impl From<&str> for ProductStatus {
    /// Unknown values read back from storage fall back to `Available`.
    fn from(value: &str) -> Self {
        match value {
            "reserved" => Self::Reserved,
            "sold" => Self::Sold,
            _ => Self::Available,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain representation of a product listed in the storefront.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier assigned by the store on creation.
    pub id: i32,
    /// Human-readable name shown in the catalog.
    pub name: String,
    /// Longer description shown on the card and in the admin table.
    pub description: String,
    /// Price represented in cents.
    pub price_cents: i64,
    /// Category label, either one of [`crate::CATEGORY_LABELS`] or free text.
    pub category: String,
    /// Units currently in stock.
    pub stock: i32,
    /// Current availability status.
    pub status: ProductStatus,
    /// Public URL of the uploaded product image, if any.
    pub image_url: Option<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Price formatted with two decimal places for display.
    pub fn price_formatted(&self) -> String {
        format_cents(self.price_cents)
    }
}

/// Format an amount of cents as a decimal string with two fractional digits.
pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Payload required to insert a new product.
///
/// There is intentionally no status field: a newly created product is always
/// `available`, regardless of anything the submitting form carries.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name shown in the catalog.
    pub name: String,
    /// Longer description shown on the card and in the admin table.
    pub description: String,
    /// Price represented in cents.
    pub price_cents: i64,
    /// Category label.
    pub category: String,
    /// Units in stock.
    pub stock: i32,
    /// Public URL of an already uploaded product image, if any.
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Build a new product payload with the supplied details.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        category: impl Into<String>,
        stock: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
            category: category.into(),
            stock,
            image_url: None,
        }
    }

    /// Attach the public URL of an uploaded image to the payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Full-replacement data applied when editing an existing product.
///
/// The edit form always submits every field, so the update carries concrete
/// values rather than per-field patches; `image_url = None` clears a stored
/// image.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Updated name.
    pub name: String,
    /// Updated description.
    pub description: String,
    /// Updated price in cents.
    pub price_cents: i64,
    /// Updated category label.
    pub category: String,
    /// Updated stock count.
    pub stock: i32,
    /// Status explicitly chosen in the edit form.
    pub status: ProductStatus,
    /// Updated image URL; `None` removes the stored one.
    pub image_url: Option<String>,
    /// Timestamp captured when the update payload was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Build an update payload with the supplied details and current timestamp.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        category: impl Into<String>,
        stock: i32,
        status: ProductStatus,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
            category: category.into(),
            stock,
            status,
            image_url: None,
            updated_at: now,
        }
    }

    /// Attach the public URL of an uploaded image to the payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in ProductStatus::ALL {
            assert_eq!(ProductStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_string_falls_back_to_available() {
        assert_eq!(ProductStatus::from("archived"), ProductStatus::Available);
        assert_eq!(ProductStatus::from(""), ProductStatus::Available);
    }

    #[test]
    fn new_product_defaults_to_no_image() {
        let payload = NewProduct::new("Lamp", "Desk lamp", 1999, "Home", 3);
        assert!(payload.image_url.is_none());

        let payload = payload.with_image_url("/media/lamp.jpg");
        assert_eq!(payload.image_url.as_deref(), Some("/media/lamp.jpg"));
    }

    #[test]
    fn cents_format_with_two_decimals() {
        assert_eq!(format_cents(1999), "19.99");
        assert_eq!(format_cents(500), "5.00");
        assert_eq!(format_cents(0), "0.00");
    }
}
