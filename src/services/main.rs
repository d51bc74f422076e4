use serde::{Deserialize, Serialize};

use crate::domain::catalog::{StatusTab, filter_products};
use crate::domain::product::{Product, ProductStatus};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the public catalog page.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Optional search string entered by the visitor.
    pub search: Option<String>,
}

/// Data required to render the public catalog template.
pub struct CatalogPageData {
    /// Cards matching the search term, newest first.
    pub products: Vec<ProductCard>,
    /// Search query echoed back to the view when present.
    pub search: Option<String>,
}

/// View model for one card in the public product grid.
///
/// Reserved and sold products are still listed, but only available ones
/// carry a prefilled contact message for the messaging deep link.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_formatted: String,
    pub category: String,
    pub stock: i32,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    /// Message prefilled into the messaging deep link; present only for
    /// available products.
    pub contact_message: Option<String>,
}

impl ProductCard {
    fn from_product(product: &Product) -> Self {
        let contact_message = match product.status {
            ProductStatus::Available => Some(format!(
                "¡Hola! Vi en la tienda el producto \"{}\" por ${}. ¿Todavía está disponible?",
                product.name,
                product.price_formatted()
            )),
            ProductStatus::Reserved | ProductStatus::Sold => None,
        };

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_formatted: product.price_formatted(),
            category: product.category.clone(),
            stock: product.stock,
            status: product.status,
            image_url: product.image_url.clone(),
            contact_message,
        }
    }
}

/// Loads the public catalog page.
///
/// The full list is fetched once and the search filter is applied in
/// memory; a failed fetch surfaces the error without rendering anything.
pub fn load_catalog_page<R>(repo: &R, query: CatalogQuery) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;

    let cards = filter_products(&products, query.search.as_deref(), StatusTab::All)
        .into_iter()
        .map(ProductCard::from_product)
        .collect();

    Ok(CatalogPageData {
        products: cards,
        search: query.search,
    })
}
