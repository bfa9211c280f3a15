use diesel::prelude::*;

use crate::{
    domain::{
        service_order::{NewServiceOrder, ServiceOrder},
        types::ClientId,
    },
    models::service_order::{
        NewServiceOrder as DbNewServiceOrder, ServiceOrder as DbServiceOrder,
    },
    repository::{
        DieselRepository, ServiceOrderReader, ServiceOrderWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ServiceOrderReader for DieselRepository {
    fn list_service_orders_by_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<ServiceOrder>> {
        use crate::schema::service_orders;

        let mut conn = self.conn()?;

        service_orders::table
            .filter(service_orders::client_id.eq(client_id.get()))
            .order((service_orders::opened_at.desc(), service_orders::id.desc()))
            .load::<DbServiceOrder>(&mut conn)?
            .into_iter()
            .map(|order| ServiceOrder::try_from(order).map_err(RepositoryError::from))
            .collect()
    }
}

impl ServiceOrderWriter for DieselRepository {
    fn create_service_order(&self, order: &NewServiceOrder) -> RepositoryResult<ServiceOrder> {
        use crate::schema::service_orders;

        let mut conn = self.conn()?;

        let insertable: DbNewServiceOrder = order.into();

        let row = diesel::insert_into(service_orders::table)
            .values(&insertable)
            .get_result::<DbServiceOrder>(&mut conn)?;

        Ok(ServiceOrder::try_from(row)?)
    }
}
