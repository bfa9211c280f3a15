use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service_order::{
    NewServiceOrder as DomainNewServiceOrder, ServiceOrder as DomainServiceOrder,
    ServiceOrderStatus,
};
use crate::domain::types::{
    ClientId, PriceCents, ServiceDescription, ServiceOrderId, TypeConstraintError,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::service_orders)]
pub struct ServiceOrder {
    pub id: i32,
    pub client_id: i32,
    pub description: String,
    pub price_cents: i64,
    pub status: String,
    pub opened_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_orders)]
pub struct NewServiceOrder<'a> {
    pub client_id: i32,
    pub description: &'a str,
    pub price_cents: i64,
    pub status: String,
    pub opened_at: NaiveDateTime,
}

impl<'a> From<&'a DomainNewServiceOrder> for NewServiceOrder<'a> {
    fn from(order: &'a DomainNewServiceOrder) -> Self {
        Self {
            client_id: order.client_id.get(),
            description: order.description.as_str(),
            price_cents: order.price.get(),
            status: order.status.to_string(),
            opened_at: order.opened_at,
        }
    }
}

impl TryFrom<ServiceOrder> for DomainServiceOrder {
    type Error = TypeConstraintError;

    fn try_from(order: ServiceOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceOrderId::new(order.id)?,
            client_id: ClientId::new(order.client_id)?,
            description: ServiceDescription::new(order.description)?,
            price: PriceCents::new(order.price_cents)?,
            status: order.status.parse::<ServiceOrderStatus>()?,
            opened_at: order.opened_at,
            finished_at: order.finished_at,
        })
    }
}
