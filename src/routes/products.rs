use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::CATEGORY_LABELS;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::catalog::StatusTab;
use crate::domain::product::ProductStatus;
use crate::forms::products::{
    AddProductForm, ChangeStatusForm, DeleteProductForm, EditProductForm, UploadImageForm,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::products::{DeleteOutcome, ProductsQuery};
use crate::services::{ServiceError, products as products_service};
use crate::storage::MediaStore;

#[get("/products")]
pub async fn show_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products_service::load_products_page(repo.get_ref(), params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "products");
            context.insert("products", &data.products);
            context.insert("stats", &data.stats);
            context.insert("total_value", &data.stats.total_value_formatted());
            context.insert("search", &data.search);
            context.insert("active_tab", data.tab.as_str());
            context.insert("tabs", &tab_names());
            context.insert("statuses", &status_names());
            context.insert("categories", CATEGORY_LABELS);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddProductForm>,
) -> impl Responder {
    match products_service::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» creado.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("No se pudo crear el producto.").send();
            redirect("/products")
        }
    }
}

#[post("/products/edit")]
pub async fn edit_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditProductForm>,
) -> impl Responder {
    match products_service::modify_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» actualizado.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe o ya fue eliminado.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            FlashMessage::error("No se pudo actualizar el producto.").send();
            redirect("/products")
        }
    }
}

#[post("/products/{product_id}/status")]
pub async fn change_product_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ChangeStatusForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products_service::change_status(repo.get_ref(), &user, product_id, form.status) {
        Ok(product) => {
            FlashMessage::success(format!(
                "Producto «{}» marcado como {}.",
                product.name, product.status
            ))
            .send();
            redirect("/products")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe o ya fue eliminado.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to change status of product {product_id}: {err}");
            FlashMessage::error("No se pudo actualizar el estado.").send();
            redirect("/products")
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<DeleteProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products_service::remove_product(repo.get_ref(), &user, product_id, form.into_inner()) {
        Ok(DeleteOutcome::Deleted) => {
            FlashMessage::success("Producto eliminado permanentemente.").send();
            redirect("/products")
        }
        Ok(DeleteOutcome::NotConfirmed) => {
            FlashMessage::warning("Eliminación no confirmada.").send();
            redirect("/products")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe o ya fue eliminado.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("No se pudo eliminar el producto.").send();
            redirect("/products")
        }
    }
}

#[post("/products/image")]
pub async fn upload_product_image(
    user: AuthenticatedUser,
    media: web::Data<MediaStore>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    match products_service::store_product_image(media.get_ref(), &user, form) {
        Ok(url) => HttpResponse::Ok().json(serde_json::json!({ "url": url })),
        Err(ServiceError::Upload(message)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        Err(err) => {
            log::error!("Failed to store product image: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn tab_names() -> Vec<&'static str> {
    StatusTab::ALL.iter().map(StatusTab::as_str).collect()
}

fn status_names() -> Vec<&'static str> {
    ProductStatus::ALL.iter().map(ProductStatus::as_str).collect()
}
