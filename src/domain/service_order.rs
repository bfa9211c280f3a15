//! Service orders opened for a client. Their existence blocks client deletion.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, PriceCents, ServiceDescription, ServiceOrderId, TypeConstraintError};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    Open,
    Finished,
    Canceled,
}

impl Display for ServiceOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceOrderStatus::Open => write!(f, "open"),
            ServiceOrderStatus::Finished => write!(f, "finished"),
            ServiceOrderStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl FromStr for ServiceOrderStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ServiceOrderStatus::Open),
            "finished" => Ok(ServiceOrderStatus::Finished),
            "canceled" => Ok(ServiceOrderStatus::Canceled),
            other => Err(TypeConstraintError::InvalidServiceOrderStatus(
                other.to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceOrder {
    pub id: ServiceOrderId,
    pub client_id: ClientId,
    pub description: ServiceDescription,
    pub price: PriceCents,
    pub status: ServiceOrderStatus,
    pub opened_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewServiceOrder {
    pub client_id: ClientId,
    pub description: ServiceDescription,
    pub price: PriceCents,
    pub status: ServiceOrderStatus,
    pub opened_at: NaiveDateTime,
}

impl NewServiceOrder {
    /// Builds an order in the `open` state stamped with the current time.
    #[must_use]
    pub fn open(client_id: ClientId, description: ServiceDescription, price: PriceCents) -> Self {
        Self {
            client_id,
            description,
            price,
            status: ServiceOrderStatus::Open,
            opened_at: Utc::now().naive_utc(),
        }
    }
}
