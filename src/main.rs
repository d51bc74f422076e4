use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use vitrina::db::establish_connection_pool;
use vitrina::middleware::redirect_unauthorized;
use vitrina::models::config::ServerConfig;
use vitrina::repository::DieselRepository;
use vitrina::routes::auth::{login, logout, show_login};
use vitrina::routes::main::show_catalog;
use vitrina::routes::products::{
    add_product, change_product_status, delete_product, edit_product, show_products,
    upload_product_image,
};
use vitrina::storage::MediaStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("vitrina.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let contact_phone = env::var("CONTACT_PHONE");
    let contact_phone = match contact_phone {
        Ok(contact_phone) => contact_phone,
        Err(_) => {
            log::error!("CONTACT_PHONE environment variable not set");
            std::process::exit(1);
        }
    };

    let media_root = env::var("MEDIA_ROOT").unwrap_or("media".to_string());
    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let media_store = MediaStore::new(&media_root);
    if let Err(e) = media_store.ensure_root() {
        log::error!("Failed to prepare the media directory: {e}");
        std::process::exit(1);
    }

    let server_config = ServerConfig {
        contact_phone,
        media_root: media_root.clone(),
    };

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new("/media", server_config.media_root.clone()))
            .service(show_catalog)
            .service(show_login)
            .service(login)
            .service(
                web::scope("")
                    .wrap(from_fn(redirect_unauthorized))
                    .service(show_products)
                    .service(add_product)
                    .service(edit_product)
                    .service(change_product_status)
                    .service(delete_product)
                    .service(upload_product_image)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(media_store.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
