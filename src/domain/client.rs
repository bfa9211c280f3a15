use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, NewAddress};
use crate::domain::types::{ClientEmail, ClientId, ClientKind, ClientName, PhoneNumber, TaxId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: PhoneNumber,
    pub tax_id: TaxId,
    pub kind: ClientKind,
    /// Argon2 PHC string; never the plaintext password.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Addresses ordered by insertion.
    pub addresses: Vec<Address>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: PhoneNumber,
    pub tax_id: TaxId,
    pub kind: ClientKind,
    pub password_hash: Option<String>,
    pub addresses: Vec<NewAddress>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        email: ClientEmail,
        phone: PhoneNumber,
        tax_id: TaxId,
        kind: ClientKind,
        addresses: Vec<NewAddress>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            tax_id,
            kind,
            password_hash: None,
            addresses,
        }
    }

    /// Attaches an already hashed password.
    #[must_use]
    pub fn with_password_hash(mut self, hash: String) -> Self {
        self.password_hash = Some(hash);
        self
    }
}

/// Replacement values for the mutable part of a client. The identifier and
/// the password hash are never touched by an update.
#[derive(Clone, Debug)]
pub struct UpdateClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: PhoneNumber,
    pub tax_id: TaxId,
    pub kind: ClientKind,
    pub addresses: Vec<NewAddress>,
}

impl From<NewClient> for UpdateClient {
    fn from(client: NewClient) -> Self {
        Self {
            name: client.name,
            email: client.email,
            phone: client.phone,
            tax_id: client.tax_id,
            kind: client.kind,
            addresses: client.addresses,
        }
    }
}
