//! Client representation with the Portuguese field names of the public API.

use serde::Serialize;

use crate::domain::address::Address;
use crate::domain::city::{City, State};
use crate::domain::client::Client;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StateModel {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "sigla")]
    pub abbreviation: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CityModel {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "estado")]
    pub state: StateModel,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AddressModel {
    pub id: i32,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "cidade")]
    pub city: Option<CityModel>,
}

/// Client as returned by `/clientes`. The password hash is never exposed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientModel {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    /// Legacy numeric code: 1 individual, 2 organization.
    #[serde(rename = "tipo")]
    pub kind: i32,
    #[serde(rename = "enderecos")]
    pub addresses: Vec<AddressModel>,
}

impl From<State> for StateModel {
    fn from(state: State) -> Self {
        Self {
            id: state.id.get(),
            name: state.name,
            abbreviation: state.abbreviation,
        }
    }
}

impl From<City> for CityModel {
    fn from(city: City) -> Self {
        Self {
            id: city.id.get(),
            name: city.name,
            state: city.state.into(),
        }
    }
}

impl From<Address> for AddressModel {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.get(),
            street: address.street.into_inner(),
            number: address.number.into_inner(),
            complement: address.complement,
            district: address.district.into_inner(),
            postal_code: address.postal_code.into_inner(),
            city: address.city.map(CityModel::from),
        }
    }
}

impl From<Client> for ClientModel {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.get(),
            name: client.name.into_inner(),
            email: client.email.into_inner(),
            phone: client.phone.into_inner(),
            tax_id: client.tax_id.into_inner(),
            kind: client.kind.code(),
            addresses: client.addresses.into_iter().map(AddressModel::from).collect(),
        }
    }
}
