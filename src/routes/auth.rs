use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::LoginForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

#[get("/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    // Already signed in administrators land on the dashboard directly.
    if user.is_some() {
        return redirect("/products");
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match auth_service::sign_in(repo.get_ref(), form.into_inner()) {
        Ok(user) => {
            let authenticated = AuthenticatedUser::from(&user);
            let payload = match serde_json::to_string(&authenticated) {
                Ok(payload) => payload,
                Err(err) => {
                    log::error!("Failed to serialize the session payload: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };

            if let Err(err) = Identity::login(&req.extensions(), payload) {
                log::error!("Failed to establish the session: {err}");
                return HttpResponse::InternalServerError().finish();
            }

            redirect("/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Correo o contraseña incorrectos.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/login")
}
