use crate::domain::service_order::{NewServiceOrder, ServiceOrder};
use crate::domain::types::ClientId;
use crate::repository::{ClientReader, ServiceOrderReader, ServiceOrderWriter};
use crate::services::{ServiceError, ServiceResult};

fn ensure_client_exists<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    match repo.get_client_by_id(client_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found(format!(
            "Objeto não encontrado! Id: {client_id}, Tipo: Cliente"
        ))),
    }
}

/// Opens a service order for an existing client.
pub fn open_service_order<R>(repo: &R, order: &NewServiceOrder) -> ServiceResult<ServiceOrder>
where
    R: ClientReader + ServiceOrderWriter + ?Sized,
{
    ensure_client_exists(repo, order.client_id)?;

    let created = repo.create_service_order(order).map_err(|e| {
        log::error!("Failed to open service order for client {}: {e}", order.client_id);
        ServiceError::from(e)
    })?;

    log::info!("Service order {} opened for client {}", created.id, created.client_id);
    Ok(created)
}

/// Lists the orders of a client, newest first.
pub fn list_client_service_orders<R>(repo: &R, client_id: ClientId) -> ServiceResult<Vec<ServiceOrder>>
where
    R: ClientReader + ServiceOrderReader + ?Sized,
{
    ensure_client_exists(repo, client_id)?;

    repo.list_service_orders_by_client(client_id).map_err(|e| {
        log::error!("Failed to list service orders of client {client_id}: {e}");
        ServiceError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_order::ServiceOrderStatus;
    use crate::domain::types::{PriceCents, ServiceDescription, ServiceOrderId};
    use crate::repository::mock::{MockRepository, client_fixture};

    fn new_order(client_id: i32) -> NewServiceOrder {
        NewServiceOrder::open(
            ClientId::new(client_id).unwrap(),
            ServiceDescription::new("Troca de tela").unwrap(),
            PriceCents::new(15_000).unwrap(),
        )
    }

    fn stored(order: &NewServiceOrder, id: i32) -> ServiceOrder {
        ServiceOrder {
            id: ServiceOrderId::new(id).unwrap(),
            client_id: order.client_id,
            description: order.description.clone(),
            price: order.price,
            status: order.status,
            opened_at: order.opened_at,
            finished_at: None,
        }
    }

    #[test]
    fn opens_order_for_existing_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client_fixture(id.get(), "Maria Silva", "maria@example.com"))));
        repo.expect_create_service_order()
            .times(1)
            .returning(|order| Ok(stored(order, 10)));

        let order = open_service_order(&repo, &new_order(1)).unwrap();
        assert_eq!(order.id.get(), 10);
        assert_eq!(order.status, ServiceOrderStatus::Open);
    }

    #[test]
    fn unknown_client_cannot_open_orders() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_create_service_order().never();

        assert!(matches!(
            open_service_order(&repo, &new_order(7)),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn listing_requires_the_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_list_service_orders_by_client().never();

        assert!(matches!(
            list_client_service_orders(&repo, ClientId::new(3).unwrap()),
            Err(ServiceError::NotFound(_))
        ));
    }
}
