use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, ProductStatus, UpdateProduct};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a category label.
const CATEGORY_MAX_LEN: usize = 64;
const CATEGORY_MAX_LEN_VALIDATOR: u64 = CATEGORY_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
///
/// Each variant names the field that failed so the message can be surfaced
/// next to it; no repository call is made once any of these fire.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// The provided category is empty after sanitization.
    #[error("product category cannot be empty")]
    EmptyCategory,
    /// The price does not parse as a non-negative decimal amount.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The stock does not parse as a non-negative integer.
    #[error("invalid stock quantity `{value}`")]
    InvalidStock { value: String },
}

/// Form payload emitted when submitting the "New product" form.
///
/// There is no status field: whatever the client posts, a created product
/// starts out `available`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Longer description entered by the user.
    pub description: String,
    /// Decimal price as typed, e.g. `19.99`.
    pub price: String,
    /// Category label chosen from the select box or typed freely.
    #[validate(length(max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: String,
    /// Stock count as typed.
    pub stock: String,
    /// Public URL staged by a prior image upload, if any.
    pub image_url: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let description = sanitize_multiline_text(&self.description);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let category = sanitize_inline_text(&self.category);
        if category.is_empty() {
            return Err(ProductFormError::EmptyCategory);
        }

        let price_cents = parse_price(&self.price)?;
        let stock = parse_stock(&self.stock)?;

        let mut new_product = NewProduct::new(name, description, price_cents, category, stock);

        if let Some(image_url) = sanitize_image_url(self.image_url) {
            new_product = new_product.with_image_url(image_url);
        }

        Ok(new_product)
    }
}

/// Form payload emitted when submitting the "Edit product" form.
///
/// Pre-populated from the stored product, including its current status; the
/// explicitly submitted status is preserved on update.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    /// Identifier of the product to update.
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Updated name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Updated description.
    pub description: String,
    /// Updated decimal price as typed.
    pub price: String,
    /// Updated category label.
    #[validate(length(max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: String,
    /// Updated stock count as typed.
    pub stock: String,
    /// Status chosen in the edit form.
    pub status: ProductStatus,
    /// Staged image URL; an empty value clears the stored image.
    pub image_url: Option<String>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let description = sanitize_multiline_text(&self.description);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let category = sanitize_inline_text(&self.category);
        if category.is_empty() {
            return Err(ProductFormError::EmptyCategory);
        }

        let price_cents = parse_price(&self.price)?;
        let stock = parse_stock(&self.stock)?;

        let mut updates = UpdateProduct::new(
            name,
            description,
            price_cents,
            category,
            stock,
            self.status,
        );

        if let Some(image_url) = sanitize_image_url(self.image_url) {
            updates = updates.with_image_url(image_url);
        }

        Ok(updates)
    }
}

/// Form payload for the per-row status transition buttons.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusForm {
    /// Target availability status.
    pub status: ProductStatus,
}

/// Form payload for the delete action.
///
/// Deletion is destructive and permanent, so it only proceeds when the
/// confirmation flag was explicitly set; otherwise it is a no-op.
#[derive(Debug, Deserialize)]
pub struct DeleteProductForm {
    #[serde(default)]
    pub confirm: bool,
}

/// Multipart payload carrying a product image to upload.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "5MB")]
    pub image: TempFile,
}

/// Parse a decimal amount like `19.99` into non-negative integer cents.
fn parse_price(input: &str) -> ProductFormResult<i64> {
    let trimmed = input.trim();
    let invalid = || ProductFormError::InvalidPrice {
        value: trimmed.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
        || fraction.len() > 2
    {
        return Err(invalid());
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    let fraction_value: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    whole_value
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction_value))
        .ok_or_else(invalid)
}

/// Parse a stock count into a non-negative integer.
fn parse_stock(input: &str) -> ProductFormResult<i32> {
    let trimmed = input.trim();
    let invalid = || ProductFormError::InvalidStock {
        value: trimmed.to_string(),
    };

    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }

    trimmed.parse().map_err(|_| invalid())
}

/// A staged image URL is kept only when it is non-empty after trimming.
fn sanitize_image_url(image_url: Option<String>) -> Option<String> {
    image_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_form(price: &str, stock: &str) -> AddProductForm {
        AddProductForm {
            name: "Desk Lamp".to_string(),
            description: "A small desk lamp.".to_string(),
            price: price.to_string(),
            category: "Home".to_string(),
            stock: stock.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn add_product_form_converts_successfully() {
        let form = AddProductForm {
            name: "  Desk  Lamp  ".to_string(),
            description: " First line.\n\n Second line.  ".to_string(),
            price: "19.99".to_string(),
            category: " Home ".to_string(),
            stock: " 3 ".to_string(),
            image_url: Some("  /media/lamp.jpg ".to_string()),
        };

        let new_product = form.into_new_product().expect("expected success");

        assert_eq!(new_product.name, "Desk Lamp");
        assert_eq!(new_product.description, "First line.\n\nSecond line.");
        assert_eq!(new_product.price_cents, 1999);
        assert_eq!(new_product.category, "Home");
        assert_eq!(new_product.stock, 3);
        assert_eq!(new_product.image_url.as_deref(), Some("/media/lamp.jpg"));
    }

    #[test]
    fn add_product_form_rejects_empty_fields() {
        let mut form = add_form("10", "1");
        form.name = "   ".to_string();
        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::EmptyName)
        ));

        let mut form = add_form("10", "1");
        form.description = " \n ".to_string();
        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::EmptyDescription)
        ));

        let mut form = add_form("10", "1");
        form.category = "".to_string();
        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::EmptyCategory)
        ));
    }

    #[test]
    fn add_product_form_rejects_non_numeric_price() {
        let result = add_form("abc", "1").into_new_product();

        assert!(matches!(
            result,
            Err(ProductFormError::InvalidPrice { value }) if value == "abc"
        ));
    }

    #[test]
    fn add_product_form_rejects_negative_price_and_stock() {
        assert!(matches!(
            add_form("-5", "1").into_new_product(),
            Err(ProductFormError::InvalidPrice { .. })
        ));
        assert!(matches!(
            add_form("10", "-1").into_new_product(),
            Err(ProductFormError::InvalidStock { .. })
        ));
    }

    #[test]
    fn add_product_form_rejects_too_precise_price() {
        assert!(matches!(
            add_form("10.999", "1").into_new_product(),
            Err(ProductFormError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn price_parsing_handles_partial_fractions() {
        assert_eq!(
            add_form("10", "1").into_new_product().expect("whole").price_cents,
            1000
        );
        assert_eq!(
            add_form("10.5", "1").into_new_product().expect("tenths").price_cents,
            1050
        );
        assert_eq!(
            add_form(".25", "1").into_new_product().expect("cents").price_cents,
            25
        );
        assert_eq!(
            add_form("0", "1").into_new_product().expect("free").price_cents,
            0
        );
    }

    #[test]
    fn add_product_form_drops_blank_image_url() {
        let mut form = add_form("10", "1");
        form.image_url = Some("   ".to_string());

        let new_product = form.into_new_product().expect("expected success");
        assert!(new_product.image_url.is_none());
    }

    #[test]
    fn edit_product_form_preserves_the_submitted_status() {
        let form = EditProductForm {
            product_id: 7,
            name: "Desk Lamp".to_string(),
            description: "A small desk lamp.".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            stock: "3".to_string(),
            status: ProductStatus::Reserved,
            image_url: None,
        };

        let updates = form.into_update_product().expect("expected success");

        assert_eq!(updates.status, ProductStatus::Reserved);
        assert_eq!(updates.price_cents, 1999);
        assert!(updates.image_url.is_none());
    }

    #[test]
    fn edit_product_form_clears_a_blank_image_url() {
        let form = EditProductForm {
            product_id: 7,
            name: "Desk Lamp".to_string(),
            description: "A small desk lamp.".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            stock: "3".to_string(),
            status: ProductStatus::Available,
            image_url: Some(String::new()),
        };

        let updates = form.into_update_product().expect("expected success");
        assert!(updates.image_url.is_none());
    }
}
