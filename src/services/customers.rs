use serde::Deserialize;

use crate::domain::customer::CustomerPatch;
use crate::domain::types::CustomerId;
use crate::dto::customers::CustomerDto;
use crate::forms::customers::CustomerFormPayload;
use crate::forms::query_number;
use crate::pagination::{Page, build_page_request};
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /customer`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

pub fn list_customers<R>(params: CustomerListParams, repo: &R) -> ServiceResult<Page<CustomerDto>>
where
    R: CustomerReader,
{
    let (page_number, page_size) = match (
        query_number("pageNumber", params.page_number.as_deref()),
        query_number("pageSize", params.page_size.as_deref()),
    ) {
        (Ok(page_number), Ok(page_size)) => (page_number, page_size),
        (page_number, page_size) => {
            let errors = [page_number.err(), page_size.err()]
                .into_iter()
                .flatten()
                .collect();
            return Err(ServiceError::Validation(errors));
        }
    };
    let pagination = build_page_request(page_number, page_size);

    match repo.list_customers(CustomerListQuery::default().paginate(pagination)) {
        Ok((total, customers)) => Ok(Page::new(
            customers.into_iter().map(CustomerDto::from).collect(),
            pagination,
            total,
        )),
        Err(e) => {
            log::error!("Failed to list customers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_customer<R>(id: CustomerId, repo: &R) -> ServiceResult<CustomerDto>
where
    R: CustomerReader,
{
    match repo.get_customer_by_id(id) {
        Ok(Some(customer)) => Ok(customer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get customer {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_customer<R>(payload: CustomerFormPayload, repo: &R) -> ServiceResult<CustomerDto>
where
    R: CustomerWriter,
{
    repo.create_customer(&payload.into_new_customer())
        .map(CustomerDto::from)
        .map_err(|e| ServiceError::from_repository("Failed to create customer", e))
}

pub fn update_customer<R>(
    id: CustomerId,
    payload: CustomerFormPayload,
    repo: &R,
) -> ServiceResult<CustomerDto>
where
    R: CustomerWriter,
{
    match repo.update_customer(id, &payload.into_update_customer()) {
        Ok(Some(customer)) => Ok(customer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("Failed to update customer", e)),
    }
}

pub fn patch_customer<R>(id: CustomerId, patch: CustomerPatch, repo: &R) -> ServiceResult<CustomerDto>
where
    R: CustomerReader + CustomerWriter,
{
    let customer = match repo.get_customer_by_id(id) {
        Ok(Some(customer)) => customer,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get customer {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if patch == CustomerPatch::default() {
        return Ok(customer.into());
    }

    match repo.update_customer(id, &customer.apply_patch(patch)) {
        Ok(Some(customer)) => Ok(customer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("Failed to patch customer", e)),
    }
}

/// Delete a customer together with its orders.
pub fn delete_customer<R>(id: CustomerId, repo: &R) -> ServiceResult<()>
where
    R: CustomerWriter,
{
    match repo.delete_customer(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete customer {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CustomerEmail, CustomerName};
    use crate::repository::MemoryRepository;

    fn payload(name: &str) -> CustomerFormPayload {
        CustomerFormPayload {
            name: CustomerName::new(name).unwrap(),
            email: None,
        }
    }

    #[test]
    fn lists_customers_by_name() {
        let repo = MemoryRepository::new();
        for name in ["John Spring", "Eva Blue", "Joseph Carter"] {
            create_customer(payload(name), &repo).unwrap();
        }

        let page = list_customers(CustomerListParams::default(), &repo).unwrap();
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eva Blue", "John Spring", "Joseph Carter"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn patch_sets_email_and_keeps_name() {
        let repo = MemoryRepository::new();
        let created = create_customer(payload("Eva Blue"), &repo).unwrap();

        let patch = CustomerPatch {
            name: None,
            email: Some(CustomerEmail::new("eva@example.com").unwrap()),
        };
        let patched = patch_customer(created.id, patch, &repo).unwrap();
        assert_eq!(patched.name, "Eva Blue");
        assert_eq!(patched.email.as_deref(), Some("eva@example.com"));
        assert_eq!(patched.version, 2);
    }

    #[test]
    fn update_overwrites_email_with_none() {
        let repo = MemoryRepository::new();
        let created = create_customer(
            CustomerFormPayload {
                name: CustomerName::new("Eva Blue").unwrap(),
                email: Some(CustomerEmail::new("eva@example.com").unwrap()),
            },
            &repo,
        )
        .unwrap();

        let updated = update_customer(created.id, payload("Eva Green"), &repo).unwrap();
        assert_eq!(updated.name, "Eva Green");
        assert!(updated.email.is_none());
    }

    #[test]
    fn delete_missing_customer_is_not_found() {
        let repo = MemoryRepository::new();
        assert_eq!(
            delete_customer(CustomerId::generate(), &repo),
            Err(ServiceError::NotFound)
        );
    }
}
