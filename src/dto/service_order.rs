use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::service_order::ServiceOrder;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderModel {
    pub id: i32,
    pub cliente_id: i32,
    pub descricao: String,
    /// Price in reais.
    pub preco: f64,
    pub status: String,
    pub data_abertura: NaiveDateTime,
    pub data_finalizacao: Option<NaiveDateTime>,
}

impl From<ServiceOrder> for ServiceOrderModel {
    fn from(order: ServiceOrder) -> Self {
        Self {
            id: order.id.get(),
            cliente_id: order.client_id.get(),
            descricao: order.description.into_inner(),
            preco: order.price.get() as f64 / 100.0,
            status: order.status.to_string(),
            data_abertura: order.opened_at,
            data_finalizacao: order.finished_at,
        }
    }
}
