use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::forms::FieldError;
use crate::repository::InventoryRepository;
use crate::services::ServiceError;

pub mod beers;
pub mod categories;
pub mod customers;
pub mod orders;

/// Prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Mount every endpoint backed by repository type `R`.
///
/// `R` must be registered as `web::Data<R>` on the application.
pub fn configure<R: InventoryRepository>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope(API_PREFIX)
            .service(
                web::resource("/beer")
                    .route(web::get().to(beers::list_beers::<R>))
                    .route(web::post().to(beers::create_beer::<R>)),
            )
            .service(
                web::resource("/beer/{beerId}")
                    .route(web::get().to(beers::get_beer::<R>))
                    .route(web::put().to(beers::update_beer::<R>))
                    .route(web::patch().to(beers::patch_beer::<R>))
                    .route(web::delete().to(beers::delete_beer::<R>)),
            )
            .service(
                web::resource("/beer/{beerId}/category/{categoryId}")
                    .route(web::put().to(categories::add_category_to_beer::<R>))
                    .route(web::delete().to(categories::remove_category_from_beer::<R>)),
            )
            .service(
                web::resource("/customer")
                    .route(web::get().to(customers::list_customers::<R>))
                    .route(web::post().to(customers::create_customer::<R>)),
            )
            .service(
                web::resource("/customer/{customerId}")
                    .route(web::get().to(customers::get_customer::<R>))
                    .route(web::put().to(customers::update_customer::<R>))
                    .route(web::patch().to(customers::patch_customer::<R>))
                    .route(web::delete().to(customers::delete_customer::<R>)),
            )
            .service(
                web::resource("/customer/{customerId}/orders")
                    .route(web::get().to(orders::list_customer_orders::<R>))
                    .route(web::post().to(orders::create_customer_order::<R>)),
            )
            .service(
                web::resource("/category")
                    .route(web::get().to(categories::list_categories::<R>))
                    .route(web::post().to(categories::create_category::<R>)),
            )
            .service(
                web::resource("/category/{categoryId}")
                    .route(web::get().to(categories::get_category::<R>)),
            ),
    );
}

/// Malformed JSON bodies are reported like any other validation failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = vec![FieldError::new("body", err.to_string())];
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = vec![FieldError::new("query", err.to_string())];
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Translate a service failure into its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Validation(errors) => HttpResponse::BadRequest().json(errors),
        ServiceError::Constraint(_) => HttpResponse::BadRequest().finish(),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}

/// `201 Created` pointing at the new resource.
pub fn created<T: serde::Serialize>(location: String, body: &T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body)
}
