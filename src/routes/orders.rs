use actix_web::{HttpResponse, Responder, web};

use crate::domain::types::CustomerId;
use crate::forms::orders::{BeerOrderForm, BeerOrderFormPayload};
use crate::repository::InventoryRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::orders::{
    create_customer_order as create_customer_order_service,
    list_customer_orders as list_customer_orders_service,
};

pub async fn list_customer_orders<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    match list_customer_orders_service(customer_id, repo.get_ref()) {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => error_response(err),
    }
}

pub async fn create_customer_order<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
    web::Json(form): web::Json<BeerOrderForm>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    let payload: BeerOrderFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_customer_order_service(customer_id, payload, repo.get_ref()) {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response(err),
    }
}
