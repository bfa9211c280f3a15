//! Addresses owned by a client.

use serde::{Deserialize, Serialize};

use crate::domain::city::City;
use crate::domain::types::{AddressId, CityId, District, PostalCode, Street, StreetNumber};

/// Stored address with its city resolved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub street: Street,
    pub number: StreetNumber,
    pub complement: Option<String>,
    pub district: District,
    pub postal_code: PostalCode,
    /// `None` when the address was registered against an unknown city.
    pub city: Option<City>,
}

/// Address data collected when a client is registered or updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAddress {
    pub street: Street,
    pub number: StreetNumber,
    pub complement: Option<String>,
    pub district: District,
    pub postal_code: PostalCode,
    pub city_id: Option<CityId>,
}

impl NewAddress {
    #[must_use]
    pub fn new(
        street: Street,
        number: StreetNumber,
        complement: Option<String>,
        district: District,
        postal_code: PostalCode,
        city_id: Option<CityId>,
    ) -> Self {
        Self {
            street,
            number,
            complement: complement
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            district,
            postal_code,
            city_id,
        }
    }
}
