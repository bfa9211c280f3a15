use serde::Deserialize;
use validator::Validate;

use crate::domain::service_order::NewServiceOrder;
use crate::domain::types::{ClientId, PriceCents, ServiceDescription};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /ordens-servico`.
pub struct ServiceOrderForm {
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "descricao")]
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Price in reais, e.g. `150.5`.
    #[serde(rename = "preco")]
    pub price: f64,
}

impl TryFrom<ServiceOrderForm> for NewServiceOrder {
    type Error = FormError;

    fn try_from(form: ServiceOrderForm) -> Result<Self, Self::Error> {
        form.validate()?;

        if !form.price.is_finite() || form.price < 0.0 {
            return Err(FormError::Negative("preco"));
        }
        let cents = (form.price * 100.0).round() as i64;

        Ok(NewServiceOrder::open(
            ClientId::new(form.client_id).map_err(FormError::field("clienteId"))?,
            ServiceDescription::new(form.description).map_err(FormError::field("descricao"))?,
            PriceCents::new(cents).map_err(FormError::field("preco"))?,
        ))
    }
}
