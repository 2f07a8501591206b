use crate::domain::types::CustomerId;
use crate::dto::orders::BeerOrderDto;
use crate::forms::orders::BeerOrderFormPayload;
use crate::repository::{BeerOrderReader, BeerOrderWriter, CustomerReader};

use super::{ServiceError, ServiceResult};

fn ensure_customer<R>(customer_id: CustomerId, repo: &R) -> ServiceResult<()>
where
    R: CustomerReader,
{
    match repo.get_customer_by_id(customer_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get customer {customer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_customer_orders<R>(customer_id: CustomerId, repo: &R) -> ServiceResult<Vec<BeerOrderDto>>
where
    R: CustomerReader + BeerOrderReader,
{
    ensure_customer(customer_id, repo)?;

    match repo.list_orders_for_customer(customer_id) {
        Ok(orders) => Ok(orders.into_iter().map(BeerOrderDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list orders of customer {customer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_customer_order<R>(
    customer_id: CustomerId,
    payload: BeerOrderFormPayload,
    repo: &R,
) -> ServiceResult<BeerOrderDto>
where
    R: CustomerReader + BeerOrderWriter,
{
    ensure_customer(customer_id, repo)?;

    repo.create_beer_order(&payload.into_new_order(customer_id))
        .map(BeerOrderDto::from)
        .map_err(|e| ServiceError::from_repository("Failed to create beer order", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::NewCustomer;
    use crate::domain::types::{CustomerName, CustomerRef};
    use crate::repository::{CustomerWriter, MemoryRepository};

    #[test]
    fn orders_belong_to_their_customer() {
        let repo = MemoryRepository::new();
        let customer = repo
            .create_customer(&NewCustomer {
                name: CustomerName::new("John Spring").unwrap(),
                email: None,
            })
            .unwrap();

        let order = create_customer_order(
            customer.id,
            BeerOrderFormPayload {
                customer_ref: Some(CustomerRef::new("PO-1").unwrap()),
            },
            &repo,
        )
        .unwrap();
        assert_eq!(order.customer_id, customer.id);
        assert_eq!(order.version, 1);

        let orders = list_customer_orders(customer.id, &repo).unwrap();
        assert_eq!(orders, vec![order]);
    }

    #[test]
    fn unknown_customer_is_not_found() {
        let repo = MemoryRepository::new();
        let id = CustomerId::generate();
        assert_eq!(list_customer_orders(id, &repo), Err(ServiceError::NotFound));
        assert_eq!(
            create_customer_order(id, BeerOrderFormPayload { customer_ref: None }, &repo),
            Err(ServiceError::NotFound)
        );
    }
}
