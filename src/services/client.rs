use secrecy::ExposeSecret;

use crate::credentials::CredentialHasher;
use crate::domain::address::NewAddress;
use crate::domain::client::{Client, UpdateClient};
use crate::domain::types::{ClientEmail, ClientId, TaxId};
use crate::forms::client::ClientPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{CityReader, ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

pub const LINKED_ORDERS_MESSAGE: &str = "Há ordens de serviço vinculadas a esse cliente";
const DUPLICATE_MESSAGE: &str = "Email ou CPF/CNPJ já cadastrado";

fn client_not_found(key: impl std::fmt::Display) -> ServiceError {
    ServiceError::not_found(format!("Objeto não encontrado! Id: {key}, Tipo: Cliente"))
}

/// Duplicate email or tax id become a conflict with a readable message.
fn write_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::ConstraintViolation(_) => ServiceError::Conflict(DUPLICATE_MESSAGE.to_string()),
        other => ServiceError::from(other),
    }
}

/// Clears city references that do not exist so the address is still saved.
fn resolve_cities<R>(repo: &R, addresses: &mut [NewAddress]) -> ServiceResult<()>
where
    R: CityReader + ?Sized,
{
    for address in addresses.iter_mut() {
        let Some(city_id) = address.city_id else {
            continue;
        };
        if repo.get_city_by_id(city_id)?.is_none() {
            log::warn!("City {city_id} not found, storing address without a city");
            address.city_id = None;
        }
    }
    Ok(())
}

/// Lists every client ordered by name.
pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(|e| {
        log::error!("Failed to list clients: {e}");
        ServiceError::from(e)
    })
}

/// Fetches a client by id.
pub fn get_client<R>(repo: &R, id: ClientId) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(id)?
        .ok_or_else(|| client_not_found(id))
}

/// Fetches a client by CPF or CNPJ, with or without punctuation.
pub fn get_client_by_tax_id<R>(repo: &R, raw_tax_id: &str) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    // An invalid number cannot belong to any stored client.
    let Ok(tax_id) = TaxId::new(raw_tax_id) else {
        return Err(client_not_found(raw_tax_id));
    };

    repo.get_client_by_tax_id(&tax_id)?
        .ok_or_else(|| client_not_found(tax_id))
}

pub fn get_client_by_email<R>(repo: &R, raw_email: &str) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let Ok(email) = ClientEmail::new(raw_email) else {
        return Err(client_not_found(raw_email));
    };

    repo.get_client_by_email(&email)?
        .ok_or_else(|| client_not_found(email))
}

/// Registers a new client with its addresses, hashing the initial password
/// when one is given.
pub fn register_client<R, H>(repo: &R, hasher: &H, payload: ClientPayload) -> ServiceResult<Client>
where
    R: ClientWriter + CityReader + ?Sized,
    H: CredentialHasher + ?Sized,
{
    let ClientPayload {
        mut client,
        password,
    } = payload;

    resolve_cities(repo, &mut client.addresses)?;

    if let Some(password) = password {
        let hash = hasher.hash(password.expose_secret()).map_err(|e| {
            log::error!("Failed to hash initial password: {e}");
            ServiceError::Internal(e.to_string())
        })?;
        client = client.with_password_hash(hash);
    }

    let created = repo.create_client(&client).map_err(|e| {
        log::error!("Failed to create client: {e}");
        write_error(e)
    })?;

    log::info!("Client {} registered", created.id);
    Ok(created)
}

/// Replaces the mutable fields and the addresses of an existing client.
pub fn update_client<R>(repo: &R, id: ClientId, mut updates: UpdateClient) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + CityReader + ?Sized,
{
    if repo.get_client_by_id(id)?.is_none() {
        return Err(client_not_found(id));
    }

    resolve_cities(repo, &mut updates.addresses)?;

    repo.update_client(id, &updates).map_err(|e| {
        log::error!("Failed to update client {id}: {e}");
        write_error(e)
    })
}

/// Deletes a client and its addresses. Clients with service orders are kept.
pub fn delete_client<R>(repo: &R, id: ClientId) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    if repo.get_client_by_id(id)?.is_none() {
        return Err(client_not_found(id));
    }

    repo.delete_client(id).map_err(|e| match e {
        RepositoryError::ForeignKeyViolation(_) => {
            ServiceError::DataIntegrity(LINKED_ORDERS_MESSAGE.to_string())
        }
        other => {
            log::error!("Failed to delete client {id}: {other}");
            ServiceError::from(other)
        }
    })?;

    log::info!("Client {id} deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use secrecy::SecretString;

    use super::*;
    use crate::credentials::{CredentialError, MockCredentialHasher};
    use crate::domain::city::{City, State};
    use crate::domain::client::NewClient;
    use crate::domain::types::{
        CityId, ClientKind, ClientName, District, PhoneNumber, PostalCode, StateId, Street,
        StreetNumber,
    };
    use crate::repository::mock::{MockRepository, client_fixture};

    fn id(value: i32) -> ClientId {
        ClientId::new(value).unwrap()
    }

    fn address(city_id: Option<i32>) -> NewAddress {
        NewAddress::new(
            Street::new("Rua A").unwrap(),
            StreetNumber::new("100").unwrap(),
            None,
            District::new("Centro").unwrap(),
            PostalCode::new("38400000").unwrap(),
            city_id.map(|id| CityId::new(id).unwrap()),
        )
    }

    fn new_client(addresses: Vec<NewAddress>) -> NewClient {
        NewClient::new(
            ClientName::new("Maria Silva").unwrap(),
            ClientEmail::new("maria@example.com").unwrap(),
            PhoneNumber::new("34999990000").unwrap(),
            TaxId::new("52998224725").unwrap(),
            ClientKind::Individual,
            addresses,
        )
    }

    fn city(id: i32) -> City {
        City {
            id: CityId::new(id).unwrap(),
            name: "Uberlândia".into(),
            state: State {
                id: StateId::new(1).unwrap(),
                name: "Minas Gerais".into(),
                abbreviation: "MG".into(),
            },
        }
    }

    #[test]
    fn missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .with(eq(id(9)))
            .returning(|_| Ok(None));

        assert!(matches!(get_client(&repo, id(9)), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn tax_id_lookup_strips_punctuation() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_tax_id()
            .withf(|tax_id| tax_id.as_str() == "52998224725")
            .returning(|_| Ok(Some(client_fixture(1, "Maria Silva", "maria@example.com"))));

        let client = get_client_by_tax_id(&repo, "529.982.247-25").unwrap();
        assert_eq!(client.tax_id.as_str(), "52998224725");
    }

    #[test]
    fn invalid_tax_id_is_not_found_without_query() {
        let repo = MockRepository::new();
        assert!(matches!(
            get_client_by_tax_id(&repo, "52998224726"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn email_lookup_absent_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_email().returning(|_| Ok(None));

        assert!(matches!(
            get_client_by_email(&repo, "nobody@example.com"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn register_hashes_password_and_drops_unknown_cities() {
        let mut repo = MockRepository::new();
        repo.expect_get_city_by_id()
            .with(eq(CityId::new(1).unwrap()))
            .returning(|id| Ok(Some(city(id.get()))));
        repo.expect_get_city_by_id()
            .with(eq(CityId::new(99).unwrap()))
            .returning(|_| Ok(None));
        repo.expect_create_client()
            .withf(|client| {
                client.password_hash.as_deref() == Some("hashed")
                    && client.addresses[0].city_id == Some(CityId::new(1).unwrap())
                    && client.addresses[1].city_id.is_none()
            })
            .times(1)
            .returning(|_| Ok(client_fixture(1, "Maria Silva", "maria@example.com")));

        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .withf(|plain| plain == "segredo1")
            .returning(|_| Ok("hashed".to_string()));

        let payload = ClientPayload {
            client: new_client(vec![address(Some(1)), address(Some(99))]),
            password: Some(SecretString::from("segredo1".to_string())),
        };

        let created = register_client(&repo, &hasher, payload).unwrap();
        assert_eq!(created.id, id(1));
    }

    #[test]
    fn register_without_password_skips_hashing() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .withf(|client| client.password_hash.is_none())
            .returning(|_| Ok(client_fixture(1, "Maria Silva", "maria@example.com")));
        let hasher = MockCredentialHasher::new();

        let payload = ClientPayload {
            client: new_client(vec![address(None)]),
            password: None,
        };
        assert!(register_client(&repo, &hasher, payload).is_ok());
    }

    #[test]
    fn register_duplicate_is_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "UNIQUE constraint failed: clients.email".into(),
            ))
        });
        let hasher = MockCredentialHasher::new();

        let payload = ClientPayload {
            client: new_client(vec![]),
            password: None,
        };
        assert!(matches!(
            register_client(&repo, &hasher, payload),
            Err(ServiceError::Conflict(msg)) if msg == DUPLICATE_MESSAGE
        ));
    }

    #[test]
    fn register_stops_when_hashing_fails() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().never();
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(CredentialError::Hash("boom".into())));

        let payload = ClientPayload {
            client: new_client(vec![]),
            password: Some(SecretString::from("segredo1".to_string())),
        };
        assert!(matches!(
            register_client(&repo, &hasher, payload),
            Err(ServiceError::Internal(_))
        ));
    }

    #[test]
    fn update_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_update_client().never();

        let updates = UpdateClient::from(new_client(vec![]));
        assert!(matches!(
            update_client(&repo, id(5), updates),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn update_replaces_fields() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client_fixture(id.get(), "Nome Antigo", "old@example.com"))));
        repo.expect_update_client()
            .withf(|id, updates| id.get() == 2 && updates.email.as_str() == "maria@example.com")
            .returning(|id, _| Ok(client_fixture(id.get(), "Maria Silva", "maria@example.com")));

        let updated = update_client(&repo, id(2), UpdateClient::from(new_client(vec![]))).unwrap();
        assert_eq!(updated.email.as_str(), "maria@example.com");
    }

    #[test]
    fn delete_with_orders_is_data_integrity() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client_fixture(id.get(), "Maria Silva", "maria@example.com"))));
        repo.expect_delete_client()
            .returning(|_| Err(RepositoryError::ForeignKeyViolation("FOREIGN KEY constraint failed".into())));

        assert!(matches!(
            delete_client(&repo, id(1)),
            Err(ServiceError::DataIntegrity(msg)) if msg == LINKED_ORDERS_MESSAGE
        ));
    }

    #[test]
    fn delete_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_delete_client().never();

        assert!(matches!(delete_client(&repo, id(1)), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn delete_without_orders_succeeds() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client_fixture(id.get(), "Maria Silva", "maria@example.com"))));
        repo.expect_delete_client().times(1).returning(|_| Ok(()));

        assert!(delete_client(&repo, id(1)).is_ok());
    }
}
