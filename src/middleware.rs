use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse};

/// Turns `401 Unauthorized` responses from the admin scope into a redirect
/// to the login page.
///
/// Registered with `actix_web::middleware::from_fn` around the admin scope
/// only; the public catalog never produces a 401.
pub async fn redirect_unauthorized(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let res = next.call(req).await?;

    if res.status() == StatusCode::UNAUTHORIZED {
        let (request, _) = res.into_parts();
        let response = HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish();
        return Ok(ServiceResponse::new(request, response));
    }

    Ok(res.map_into_boxed_body())
}
