use actix_web::{HttpResponse, Responder, web};

use crate::domain::customer::CustomerPatch;
use crate::domain::types::CustomerId;
use crate::forms::customers::{CustomerForm, CustomerFormPayload, CustomerPatchForm};
use crate::repository::InventoryRepository;
use crate::routes::{API_PREFIX, created, error_response};
use crate::services::ServiceError;
use crate::services::customers::{
    CustomerListParams, create_customer as create_customer_service,
    delete_customer as delete_customer_service, get_customer as get_customer_service,
    list_customers as list_customers_service, patch_customer as patch_customer_service,
    update_customer as update_customer_service,
};

pub async fn list_customers<R: InventoryRepository>(
    params: web::Query<CustomerListParams>,
    repo: web::Data<R>,
) -> impl Responder {
    match list_customers_service(params.into_inner(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

pub async fn get_customer<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    match get_customer_service(customer_id, repo.get_ref()) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(err) => error_response(err),
    }
}

pub async fn create_customer<R: InventoryRepository>(
    repo: web::Data<R>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    let payload: CustomerFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_customer_service(payload, repo.get_ref()) {
        Ok(customer) => created(format!("{API_PREFIX}/customer/{}", customer.id), &customer),
        Err(err) => error_response(err),
    }
}

pub async fn update_customer<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    let payload: CustomerFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_customer_service(customer_id, payload, repo.get_ref()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn patch_customer<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
    web::Json(form): web::Json<CustomerPatchForm>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    let patch: CustomerPatch = match form.try_into() {
        Ok(patch) => patch,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match patch_customer_service(customer_id, patch, repo.get_ref()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_customer<R: InventoryRepository>(
    customer_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    let Ok(customer_id) = CustomerId::parse(&customer_id) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_customer_service(customer_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
