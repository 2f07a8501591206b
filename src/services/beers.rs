use serde::Deserialize;

use crate::domain::beer::BeerPatch;
use crate::domain::types::{BeerId, BeerStyle};
use crate::dto::beers::BeerDto;
use crate::forms::beers::BeerFormPayload;
use crate::forms::{FieldError, non_blank, query_flag, query_number};
use crate::pagination::{Page, build_page_request};
use crate::repository::{BeerListQuery, BeerReader, BeerWriter};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /beer`.
///
/// Values are kept as text so a bad one is reported under its own name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerListParams {
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub show_inventory: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

/// List beers filtered by name and/or style, one page at a time.
///
/// Stock levels are hidden only when `showInventory` is explicitly `false`.
pub fn list_beers<R>(params: BeerListParams, repo: &R) -> ServiceResult<Page<BeerDto>>
where
    R: BeerReader,
{
    let (page_number, page_size, show_inventory) = match (
        query_number("pageNumber", params.page_number.as_deref()),
        query_number("pageSize", params.page_size.as_deref()),
        query_flag("showInventory", params.show_inventory.as_deref()),
    ) {
        (Ok(page_number), Ok(page_size), Ok(show_inventory)) => {
            (page_number, page_size, show_inventory)
        }
        (page_number, page_size, show_inventory) => {
            let errors: Vec<FieldError> = [
                page_number.err(),
                page_size.err(),
                show_inventory.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Err(ServiceError::Validation(errors));
        }
    };

    let pagination = build_page_request(page_number, page_size);
    let mut query = BeerListQuery::default().paginate(pagination);

    if let Some(name) = non_blank(params.beer_name) {
        query = query.name(name.trim());
    }
    if let Some(style) = non_blank(params.beer_style) {
        query = query.style(style.parse::<BeerStyle>()?);
    }

    let hide_inventory = show_inventory == Some(false);

    match repo.list_beers(query) {
        Ok((total, beers)) => {
            let content = beers
                .into_iter()
                .map(|beer| {
                    if hide_inventory {
                        beer.without_inventory()
                    } else {
                        beer
                    }
                })
                .map(BeerDto::from)
                .collect();
            Ok(Page::new(content, pagination, total))
        }
        Err(e) => {
            log::error!("Failed to list beers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_beer<R>(id: BeerId, repo: &R) -> ServiceResult<BeerDto>
where
    R: BeerReader,
{
    match repo.get_beer_by_id(id) {
        Ok(Some(beer)) => Ok(beer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get beer {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_beer<R>(payload: BeerFormPayload, repo: &R) -> ServiceResult<BeerDto>
where
    R: BeerWriter,
{
    let beer = repo
        .create_beer(&payload.into_new_beer())
        .map_err(|e| ServiceError::from_repository("Failed to create beer", e))?;

    log::info!("Created beer {} ({})", beer.id, beer.name);
    Ok(beer.into())
}

/// Overwrite every mutable field of a beer.
pub fn update_beer<R>(id: BeerId, payload: BeerFormPayload, repo: &R) -> ServiceResult<BeerDto>
where
    R: BeerWriter,
{
    match repo.update_beer(id, &payload.into_update_beer()) {
        Ok(Some(beer)) => Ok(beer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("Failed to update beer", e)),
    }
}

/// Overwrite only the fields present in the patch.
///
/// An empty patch leaves the record and its version untouched.
pub fn patch_beer<R>(id: BeerId, patch: BeerPatch, repo: &R) -> ServiceResult<BeerDto>
where
    R: BeerReader + BeerWriter,
{
    let beer = match repo.get_beer_by_id(id) {
        Ok(Some(beer)) => beer,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get beer {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if patch.is_empty() {
        return Ok(beer.into());
    }

    let update = beer.apply_patch(patch);
    match repo.update_beer(id, &update) {
        Ok(Some(beer)) => Ok(beer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("Failed to patch beer", e)),
    }
}

pub fn delete_beer<R>(id: BeerId, repo: &R) -> ServiceResult<()>
where
    R: BeerWriter,
{
    match repo.delete_beer(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Deleted beer {id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete beer {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
