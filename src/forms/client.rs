use secrecy::SecretString;
use serde::Deserialize;
use validator::Validate;

use crate::domain::address::NewAddress;
use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{
    CityId, ClientEmail, ClientKind, ClientName, District, PhoneNumber, PostalCode, Street,
    StreetNumber, TaxId, TypeConstraintError,
};
use crate::forms::FormError;

/// Client kind as sent by the frontend: the legacy numeric code or a name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClientKindField {
    Code(i32),
    Name(String),
}

impl TryFrom<ClientKindField> for ClientKind {
    type Error = TypeConstraintError;

    fn try_from(value: ClientKindField) -> Result<Self, Self::Error> {
        match value {
            ClientKindField::Code(code) => ClientKind::try_from(code),
            ClientKindField::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressForm {
    #[serde(rename = "logradouro")]
    #[validate(length(min = 1, max = 120))]
    pub street: String,
    #[serde(rename = "numero")]
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    #[validate(length(min = 1, max = 80))]
    pub district: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    /// May point to a city that does not exist; it is then stored as empty.
    #[serde(rename = "cidadeId", default)]
    pub city_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Body of `POST /clientes` and `PUT /clientes/{id}`.
pub struct ClientForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 5, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(rename = "telefone")]
    #[validate(length(min = 1, max = 30))]
    pub phone: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "tipo")]
    pub kind: ClientKindField,
    /// Initial password. Ignored on update.
    #[serde(rename = "senha", default)]
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[serde(rename = "enderecos", default)]
    #[validate(nested)]
    pub addresses: Vec<AddressForm>,
}

/// Validated client data plus the plaintext password still to be hashed.
#[derive(Debug)]
pub struct ClientPayload {
    pub client: NewClient,
    pub password: Option<SecretString>,
}

impl TryFrom<AddressForm> for NewAddress {
    type Error = FormError;

    fn try_from(form: AddressForm) -> Result<Self, Self::Error> {
        let city_id = form
            .city_id
            .map(CityId::new)
            .transpose()
            .map_err(FormError::field("cidadeId"))?;

        Ok(NewAddress::new(
            Street::new(form.street).map_err(FormError::field("logradouro"))?,
            StreetNumber::new(form.number).map_err(FormError::field("numero"))?,
            form.complement,
            District::new(form.district).map_err(FormError::field("bairro"))?,
            PostalCode::new(form.postal_code).map_err(FormError::field("cep"))?,
            city_id,
        ))
    }
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let kind = ClientKind::try_from(form.kind).map_err(FormError::field("tipo"))?;
        let tax_id = TaxId::for_kind(form.tax_id, kind).map_err(FormError::field("cpf"))?;

        let addresses = form
            .addresses
            .into_iter()
            .map(NewAddress::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let client = NewClient::new(
            ClientName::new(form.name).map_err(FormError::field("nome"))?,
            ClientEmail::new(form.email).map_err(FormError::field("email"))?,
            PhoneNumber::new(form.phone).map_err(FormError::field("telefone"))?,
            tax_id,
            kind,
            addresses,
        );

        Ok(ClientPayload {
            client,
            password: form.password.map(SecretString::from),
        })
    }
}

impl TryFrom<ClientForm> for UpdateClient {
    type Error = FormError;

    /// `senha` is dropped before validation; updates never touch the password.
    fn try_from(mut form: ClientForm) -> Result<Self, Self::Error> {
        form.password = None;
        ClientPayload::try_from(form).map(|payload| UpdateClient::from(payload.client))
    }
}
