use actix_web::{HttpResponse, Responder, web};

use crate::domain::beer::BeerPatch;
use crate::domain::types::BeerId;
use crate::forms::beers::{BeerForm, BeerFormPayload, BeerPatchForm};
use crate::repository::InventoryRepository;
use crate::routes::{API_PREFIX, created, error_response};
use crate::services::ServiceError;
use crate::services::beers::{
    BeerListParams, create_beer as create_beer_service, delete_beer as delete_beer_service,
    get_beer as get_beer_service, list_beers as list_beers_service,
    patch_beer as patch_beer_service, update_beer as update_beer_service,
};

pub async fn list_beers<R: InventoryRepository>(
    params: web::Query<BeerListParams>,
    repo: web::Data<R>,
) -> impl Responder {
    match list_beers_service(params.into_inner(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

pub async fn get_beer<R: InventoryRepository>(
    beer_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    // Malformed ids cannot name a stored beer.
    let Ok(beer_id) = BeerId::parse(&beer_id) else {
        return HttpResponse::NotFound().finish();
    };

    match get_beer_service(beer_id, repo.get_ref()) {
        Ok(beer) => HttpResponse::Ok().json(beer),
        Err(err) => error_response(err),
    }
}

pub async fn create_beer<R: InventoryRepository>(
    repo: web::Data<R>,
    web::Json(form): web::Json<BeerForm>,
) -> impl Responder {
    let payload: BeerFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_beer_service(payload, repo.get_ref()) {
        Ok(beer) => created(format!("{API_PREFIX}/beer/{}", beer.id), &beer),
        Err(err) => error_response(err),
    }
}

pub async fn update_beer<R: InventoryRepository>(
    beer_id: web::Path<String>,
    repo: web::Data<R>,
    web::Json(form): web::Json<BeerForm>,
) -> impl Responder {
    let Ok(beer_id) = BeerId::parse(&beer_id) else {
        return HttpResponse::NotFound().finish();
    };

    let payload: BeerFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_beer_service(beer_id, payload, repo.get_ref()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn patch_beer<R: InventoryRepository>(
    beer_id: web::Path<String>,
    repo: web::Data<R>,
    web::Json(form): web::Json<BeerPatchForm>,
) -> impl Responder {
    let Ok(beer_id) = BeerId::parse(&beer_id) else {
        return HttpResponse::NotFound().finish();
    };

    let patch: BeerPatch = match form.try_into() {
        Ok(patch) => patch,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match patch_beer_service(beer_id, patch, repo.get_ref()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_beer<R: InventoryRepository>(
    beer_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    let Ok(beer_id) = BeerId::parse(&beer_id) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_beer_service(beer_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
