//! Diesel models for client addresses.

use diesel::prelude::*;

use crate::domain::address::{Address as DomainAddress, NewAddress as DomainNewAddress};
use crate::domain::city::City as DomainCity;
use crate::domain::types::{
    AddressId, District, PostalCode, Street, StreetNumber, TypeConstraintError,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::addresses)]
/// Diesel model for [`crate::domain::address::Address`].
pub struct Address {
    pub id: i32,
    pub client_id: i32,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub city_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
/// Insertable form of [`Address`].
pub struct NewAddress<'a> {
    pub client_id: i32,
    pub street: &'a str,
    pub number: &'a str,
    pub complement: Option<&'a str>,
    pub district: &'a str,
    pub postal_code: &'a str,
    pub city_id: Option<i32>,
}

impl<'a> NewAddress<'a> {
    pub fn from_domain(client_id: i32, address: &'a DomainNewAddress) -> Self {
        Self {
            client_id,
            street: address.street.as_str(),
            number: address.number.as_str(),
            complement: address.complement.as_deref(),
            district: address.district.as_str(),
            postal_code: address.postal_code.as_str(),
            city_id: address.city_id.map(|id| id.get()),
        }
    }
}

impl Address {
    /// Converts the row into a domain address with its already loaded city.
    pub fn into_domain(self, city: Option<DomainCity>) -> Result<DomainAddress, TypeConstraintError> {
        Ok(DomainAddress {
            id: AddressId::new(self.id)?,
            street: Street::new(self.street)?,
            number: StreetNumber::new(self.number)?,
            complement: self.complement,
            district: District::new(self.district)?,
            postal_code: PostalCode::new(self.postal_code)?,
            city,
        })
    }
}
