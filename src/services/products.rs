use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::catalog::{CatalogStats, StatusTab, filter_products};
use crate::domain::product::{Product, ProductStatus};
use crate::forms::products::{
    AddProductForm, DeleteProductForm, EditProductForm, UploadImageForm,
};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::MediaStore;

/// Query parameters accepted by the admin products page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string entered by the administrator.
    pub search: Option<String>,
    /// Active status tab; defaults to `available`.
    pub tab: Option<StatusTab>,
}

/// Data required to render the admin products template.
pub struct ProductsPageData {
    /// Rows visible under the current search term and status tab.
    pub products: Vec<ProductRow>,
    /// Statistics computed over the full catalog, not the filtered view.
    pub stats: CatalogStats,
    /// Search query echoed back to the view when present.
    pub search: Option<String>,
    /// The active status tab.
    pub tab: StatusTab,
}

/// View model exposed to the admin products table.
#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_formatted: String,
    pub category: String,
    pub stock: i32,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl ProductRow {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_formatted: product.price_formatted(),
            category: product.category.clone(),
            stock: product.stock,
            status: product.status,
            image_url: product.image_url.clone(),
            created_at: product.created_at,
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The product was removed permanently.
    Deleted,
    /// The confirmation flag was missing; nothing was touched.
    NotConfirmed,
}

/// Loads the admin products overview.
///
/// Fetches the full catalog once, computes the statistics over it, and
/// derives the visible rows from (list, search term, status tab) in memory.
pub fn load_products_page<R>(repo: &R, query: ProductsQuery) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery { search, tab } = query;
    let tab = tab.unwrap_or_default();

    let products = repo.list_products().map_err(ServiceError::from)?;
    let stats = CatalogStats::collect(&products);

    let rows = filter_products(&products, search.as_deref(), tab)
        .into_iter()
        .map(ProductRow::from_product)
        .collect();

    Ok(ProductsPageData {
        products: rows,
        stats,
        search,
        tab,
    })
}

/// Creates a new product. The stored status is always `available`.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_product(&payload).map_err(ServiceError::from)?;

    log::info!(
        "{} created product {} ({})",
        user.email,
        created.id,
        created.name
    );

    Ok(created)
}

/// Applies an edit form to an existing product, preserving the explicitly
/// submitted status.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let product_id = form.product_id;
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_product(product_id, &updates)
        .map_err(ServiceError::from)?;

    log::info!("{} updated product {}", user.email, updated.id);

    Ok(updated)
}

/// Moves a product to `status`. Every transition between the three states
/// is legal; no other field is touched.
pub fn change_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    status: ProductStatus,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let updated = repo
        .set_product_status(product_id, status)
        .map_err(ServiceError::from)?;

    log::info!(
        "{} marked product {} as {}",
        user.email,
        updated.id,
        updated.status
    );

    Ok(updated)
}

/// Deletes a product permanently, but only when the confirmation flag was
/// set; an unconfirmed request is a no-op.
pub fn remove_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: DeleteProductForm,
) -> ServiceResult<DeleteOutcome>
where
    R: ProductWriter + ?Sized,
{
    if !form.confirm {
        return Ok(DeleteOutcome::NotConfirmed);
    }

    repo.delete_product(product_id).map_err(ServiceError::from)?;

    log::info!("{} deleted product {}", user.email, product_id);

    Ok(DeleteOutcome::Deleted)
}

/// Stores an uploaded image and returns the public URL the form should
/// stage in its `image_url` field.
pub fn store_product_image(
    media: &MediaStore,
    user: &AuthenticatedUser,
    form: UploadImageForm,
) -> ServiceResult<String> {
    let original_name = form.image.file_name.clone().unwrap_or_default();

    let url = media
        .store(form.image.file.path(), &original_name)
        .map_err(|err| ServiceError::Upload(err.to_string()))?;

    log::info!("{} uploaded product image {}", user.email, url);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i32, name: &str, status: ProductStatus) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            price_cents: 1999,
            category: "Home".to_string(),
            stock: 3,
            status,
            image_url: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
        }
    }

    #[test]
    fn load_products_page_computes_stats_over_the_full_list() {
        let mut repo = MockProductReader::new();

        repo.expect_list_products().times(1).returning(|| {
            Ok(vec![
                sample_product(1, "Desk Lamp", ProductStatus::Available),
                sample_product(2, "Floor Lamp", ProductStatus::Reserved),
                sample_product(3, "Wall Lamp", ProductStatus::Sold),
            ])
        });

        let query = ProductsQuery {
            search: None,
            tab: Some(StatusTab::Reserved),
        };
        let data = load_products_page(&repo, query).expect("expected success");

        // The tab narrows the rows but not the statistics.
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].id, 2);
        assert_eq!(data.stats.total, 3);
        assert_eq!(data.stats.available, 1);
        assert_eq!(data.stats.reserved, 1);
        assert_eq!(data.stats.sold, 1);
        assert_eq!(data.stats.total_value_cents, 3 * 1999 * 3);
        assert_eq!(data.tab, StatusTab::Reserved);
    }

    #[test]
    fn load_products_page_defaults_to_the_available_tab() {
        let mut repo = MockProductReader::new();

        repo.expect_list_products().times(1).returning(|| {
            Ok(vec![
                sample_product(1, "Desk Lamp", ProductStatus::Available),
                sample_product(2, "Floor Lamp", ProductStatus::Sold),
            ])
        });

        let data =
            load_products_page(&repo, ProductsQuery::default()).expect("expected success");

        assert_eq!(data.tab, StatusTab::Available);
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].id, 1);
    }

    #[test]
    fn load_products_page_intersects_search_and_tab() {
        let mut repo = MockProductReader::new();

        repo.expect_list_products().times(1).returning(|| {
            Ok(vec![
                sample_product(1, "Desk Lamp", ProductStatus::Reserved),
                sample_product(2, "Running Shoes", ProductStatus::Reserved),
            ])
        });

        let query = ProductsQuery {
            search: Some("lamp".to_string()),
            tab: Some(StatusTab::Reserved),
        };
        let data = load_products_page(&repo, query).expect("expected success");

        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].id, 1);
    }

    #[test]
    fn create_product_persists_the_validated_payload() {
        let mut repo = MockProductWriter::new();

        repo.expect_create_product()
            .times(1)
            .withf(|payload| {
                assert_eq!(payload.name, "Desk Lamp");
                assert_eq!(payload.price_cents, 1999);
                assert_eq!(payload.stock, 3);
                true
            })
            .returning(|payload| {
                let mut created =
                    sample_product(10, payload.name.as_str(), ProductStatus::Available);
                created.price_cents = payload.price_cents;
                Ok(created)
            });

        let form = AddProductForm {
            name: " Desk Lamp ".to_string(),
            description: "A small desk lamp.".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            stock: "3".to_string(),
            image_url: None,
        };

        let created = create_product(&repo, &admin(), form).expect("expected success");
        assert_eq!(created.id, 10);
        assert_eq!(created.status, ProductStatus::Available);
    }

    #[test]
    fn create_product_blocks_invalid_input_before_the_repository() {
        // No expectation is set, so any repository call would panic.
        let repo = MockProductWriter::new();

        let form = AddProductForm {
            name: "Desk Lamp".to_string(),
            description: "A small desk lamp.".to_string(),
            price: "abc".to_string(),
            category: "Home".to_string(),
            stock: "3".to_string(),
            image_url: None,
        };

        let result = create_product(&repo, &admin(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn modify_product_passes_the_submitted_status_through() {
        let mut repo = MockProductWriter::new();

        repo.expect_update_product()
            .times(1)
            .withf(|product_id, updates| {
                assert_eq!(*product_id, 7);
                assert_eq!(updates.status, ProductStatus::Sold);
                true
            })
            .returning(|product_id, updates| {
                let mut updated =
                    sample_product(product_id, updates.name.as_str(), updates.status);
                updated.price_cents = updates.price_cents;
                Ok(updated)
            });

        let form = EditProductForm {
            product_id: 7,
            name: "Desk Lamp".to_string(),
            description: "A small desk lamp.".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            stock: "3".to_string(),
            status: ProductStatus::Sold,
            image_url: None,
        };

        let updated = modify_product(&repo, &admin(), form).expect("expected success");
        assert_eq!(updated.status, ProductStatus::Sold);
    }

    #[test]
    fn change_status_issues_a_single_field_transition() {
        let mut repo = MockProductWriter::new();

        repo.expect_set_product_status()
            .times(1)
            .withf(|product_id, status| {
                assert_eq!(*product_id, 5);
                assert_eq!(*status, ProductStatus::Reserved);
                true
            })
            .returning(|product_id, status| {
                Ok(sample_product(product_id, "Desk Lamp", status))
            });

        let updated =
            change_status(&repo, &admin(), 5, ProductStatus::Reserved).expect("expected success");
        assert_eq!(updated.status, ProductStatus::Reserved);
    }

    #[test]
    fn change_status_surfaces_missing_products() {
        let mut repo = MockProductWriter::new();

        repo.expect_set_product_status()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = change_status(&repo, &admin(), 404, ProductStatus::Sold);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn remove_product_is_a_no_op_without_confirmation() {
        // No expectation is set, so a delete call would panic the test.
        let repo = MockProductWriter::new();

        let outcome = remove_product(&repo, &admin(), 5, DeleteProductForm { confirm: false })
            .expect("expected success");

        assert_eq!(outcome, DeleteOutcome::NotConfirmed);
    }

    #[test]
    fn remove_product_deletes_once_confirmed() {
        let mut repo = MockProductWriter::new();

        repo.expect_delete_product()
            .times(1)
            .withf(|product_id| {
                assert_eq!(*product_id, 5);
                true
            })
            .returning(|_| Ok(()));

        let outcome = remove_product(&repo, &admin(), 5, DeleteProductForm { confirm: true })
            .expect("expected success");

        assert_eq!(outcome, DeleteOutcome::Deleted);
    }

    #[test]
    fn remove_product_surfaces_a_missing_id() {
        let mut repo = MockProductWriter::new();

        repo.expect_delete_product()
            .returning(|_| Err(RepositoryError::NotFound));

        let result = remove_product(&repo, &admin(), 404, DeleteProductForm { confirm: true });

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
