use crate::domain::types::{BeerId, CategoryId};
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_category<R>(id: CategoryId, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    repo.create_category(&payload.into_new_category())
        .map(CategoryDto::from)
        .map_err(|e| ServiceError::from_repository("Failed to create category", e))
}

/// Tag a beer with a category. Linking twice is a no-op.
pub fn add_category_to_beer<R>(
    beer_id: BeerId,
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.add_beer_category(beer_id, category_id) {
        Ok(_) => Ok(()),
        Err(e) => Err(ServiceError::from_repository(
            "Failed to add category to beer",
            e,
        )),
    }
}

/// Remove a category tag from a beer. Removing a missing tag is a no-op.
pub fn remove_category_from_beer<R>(
    beer_id: BeerId,
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.remove_beer_category(beer_id, category_id) {
        Ok(_) => Ok(()),
        Err(e) => Err(ServiceError::from_repository(
            "Failed to remove category from beer",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::beer::NewBeer;
    use crate::domain::types::{
        BeerName, BeerPrice, BeerStyle, CategoryDescription, Upc,
    };
    use crate::repository::{BeerReader, BeerWriter, MemoryRepository};

    fn payload(description: &str) -> AddCategoryFormPayload {
        AddCategoryFormPayload {
            description: CategoryDescription::new(description).unwrap(),
        }
    }

    #[test]
    fn categories_are_sorted_by_description() {
        let repo = MemoryRepository::new();
        create_category(payload("Stouts"), &repo).unwrap();
        create_category(payload("Ales"), &repo).unwrap();

        let descriptions: Vec<String> = list_categories(&repo)
            .unwrap()
            .into_iter()
            .map(|c| c.description)
            .collect();
        assert_eq!(descriptions, vec!["Ales", "Stouts"]);
    }

    #[test]
    fn tagging_updates_beer_and_category() {
        let repo = MemoryRepository::new();
        let beer = repo
            .create_beer(&NewBeer {
                name: BeerName::new("Crank").unwrap(),
                style: BeerStyle::PaleAle,
                upc: Upc::new("12332435").unwrap(),
                quantity_on_hand: None,
                price: BeerPrice::parse("11.99").unwrap(),
            })
            .unwrap();
        let category = create_category(payload("Ales"), &repo).unwrap();

        add_category_to_beer(beer.id, category.id, &repo).unwrap();
        let listed = list_categories(&repo).unwrap();
        assert_eq!(listed[0].beers, vec![beer.id]);
        assert!(
            repo.get_beer_by_id(beer.id)
                .unwrap()
                .unwrap()
                .categories
                .contains(&category.id)
        );

        remove_category_from_beer(beer.id, category.id, &repo).unwrap();
        assert!(list_categories(&repo).unwrap()[0].beers.is_empty());
    }

    #[test]
    fn tagging_unknown_beer_is_not_found() {
        let repo = MemoryRepository::new();
        let category = create_category(payload("Ales"), &repo).unwrap();
        assert_eq!(
            add_category_to_beer(BeerId::generate(), category.id, &repo),
            Err(ServiceError::NotFound)
        );
    }
}
