use actix_web::{HttpResponse, Responder, web};

use crate::domain::types::{BeerId, CategoryId};
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::repository::InventoryRepository;
use crate::routes::{API_PREFIX, created, error_response};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category_to_beer as add_category_to_beer_service,
    create_category as create_category_service, get_category as get_category_service,
    list_categories as list_categories_service,
    remove_category_from_beer as remove_category_from_beer_service,
};

pub async fn list_categories<R: InventoryRepository>(repo: web::Data<R>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

pub async fn get_category<R: InventoryRepository>(
    category_id: web::Path<String>,
    repo: web::Data<R>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::parse(&category_id) else {
        return HttpResponse::NotFound().finish();
    };

    match get_category_service(category_id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

pub async fn create_category<R: InventoryRepository>(
    repo: web::Data<R>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => created(format!("{API_PREFIX}/category/{}", category.id), &category),
        Err(err) => error_response(err),
    }
}

fn parse_link(path: &(String, String)) -> Option<(BeerId, CategoryId)> {
    let beer_id = BeerId::parse(&path.0).ok()?;
    let category_id = CategoryId::parse(&path.1).ok()?;
    Some((beer_id, category_id))
}

pub async fn add_category_to_beer<R: InventoryRepository>(
    path: web::Path<(String, String)>,
    repo: web::Data<R>,
) -> impl Responder {
    let Some((beer_id, category_id)) = parse_link(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match add_category_to_beer_service(beer_id, category_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn remove_category_from_beer<R: InventoryRepository>(
    path: web::Path<(String, String)>,
    repo: web::Data<R>,
) -> impl Responder {
    let Some((beer_id, category_id)) = parse_link(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match remove_category_from_beer_service(beer_id, category_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
