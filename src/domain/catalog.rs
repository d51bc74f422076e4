use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductStatus, format_cents};

/// Status tab selected in the admin panel, applied on top of the search
/// filter. `All` is the identity filter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusTab {
    All,
    Available,
    Reserved,
    Sold,
}

impl Default for StatusTab {
    fn default() -> Self {
        Self::Available
    }
}

impl StatusTab {
    /// Tabs in the order they are rendered in the admin panel.
    pub const ALL: [StatusTab; 4] = [Self::All, Self::Available, Self::Reserved, Self::Sold];

    /// Stable string form used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }

    /// Whether a product with `status` is visible under this tab.
    pub fn matches(&self, status: ProductStatus) -> bool {
        match self {
            Self::All => true,
            Self::Available => status == ProductStatus::Available,
            Self::Reserved => status == ProductStatus::Reserved,
            Self::Sold => status == ProductStatus::Sold,
        }
    }
}

/// Case-insensitive substring match of `term` against the product's name,
/// description and category. An empty or whitespace-only term matches
/// everything.
pub fn search_matches(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
        || product.category.to_lowercase().contains(&term)
}

/// Derive the visible subset of `products` from the search term and status
/// tab. Purely a function of its inputs: both filters compose by
/// intersection and the original list is left untouched.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: Option<&str>,
    tab: StatusTab,
) -> Vec<&'a Product> {
    let term = search.unwrap_or("");
    products
        .iter()
        .filter(|product| search_matches(product, term) && tab.matches(product.status))
        .collect()
}

/// Aggregate statistics shown on the admin dashboard.
///
/// Always computed over the full catalog, not the filtered view; the total
/// inventory value counts every product regardless of status.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct CatalogStats {
    /// Total number of products.
    pub total: usize,
    /// Number of `available` products.
    pub available: usize,
    /// Number of `reserved` products.
    pub reserved: usize,
    /// Number of `sold` products.
    pub sold: usize,
    /// Inventory value in cents: sum of price × stock over all products.
    pub total_value_cents: i64,
}

impl CatalogStats {
    /// Collect statistics over the full product list.
    pub fn collect(products: &[Product]) -> Self {
        let mut stats = Self::default();
        for product in products {
            stats.total += 1;
            match product.status {
                ProductStatus::Available => stats.available += 1,
                ProductStatus::Reserved => stats.reserved += 1,
                ProductStatus::Sold => stats.sold += 1,
            }
            stats.total_value_cents += product.price_cents * i64::from(product.stock);
        }
        stats
    }

    /// Inventory value formatted with two decimal places for display.
    pub fn total_value_formatted(&self) -> String {
        format_cents(self.total_value_cents)
    }
}
