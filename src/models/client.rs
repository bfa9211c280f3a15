use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::address::Address as DomainAddress;
use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientEmail, ClientId, ClientKind, ClientName, PhoneNumber, TaxId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    pub password_hash: Option<String>,
    pub kind: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub tax_id: &'a str,
    pub password_hash: Option<&'a str>,
    pub kind: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub tax_id: &'a str,
    pub kind: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewClient<'a> {
    pub fn from_domain(client: &'a DomainNewClient, now: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_str(),
            phone: client.phone.as_str(),
            tax_id: client.tax_id.as_str(),
            password_hash: client.password_hash.as_deref(),
            kind: client.kind.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn from_domain(client: &'a DomainUpdateClient, now: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_str(),
            phone: client.phone.as_str(),
            tax_id: client.tax_id.as_str(),
            kind: client.kind.as_str(),
            updated_at: now,
        }
    }
}

impl Client {
    /// Converts the row into a domain client owning the given addresses.
    pub fn into_domain(
        self,
        addresses: Vec<DomainAddress>,
    ) -> Result<DomainClient, TypeConstraintError> {
        Ok(DomainClient {
            id: ClientId::new(self.id)?,
            name: ClientName::new(self.name)?,
            email: ClientEmail::new(self.email)?,
            phone: PhoneNumber::new(self.phone)?,
            tax_id: TaxId::new(self.tax_id)?,
            kind: self.kind.parse::<ClientKind>()?,
            password_hash: self.password_hash,
            addresses,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
