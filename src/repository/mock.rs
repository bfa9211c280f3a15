//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::city::City;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::service_order::{NewServiceOrder, ServiceOrder};
use crate::domain::types::{CityId, ClientEmail, ClientId, TaxId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CityReader, ClientPageQuery, ClientReader, ClientWriter, ServiceOrderReader,
    ServiceOrderWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn list_clients_page(
            &self,
            query: &ClientPageQuery,
        ) -> RepositoryResult<(usize, Vec<Client>)>;
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn update_client_password<'a>(
            &self,
            id: ClientId,
            password_hash: Option<&'a str>,
        ) -> RepositoryResult<()>;
        fn replace_client_password<'a>(
            &self,
            id: ClientId,
            current: &str,
            replacement: Option<&'a str>,
        ) -> RepositoryResult<bool>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    }

    impl CityReader for Repository {
        fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>>;
    }

    impl ServiceOrderReader for Repository {
        fn list_service_orders_by_client(
            &self,
            client_id: ClientId,
        ) -> RepositoryResult<Vec<ServiceOrder>>;
    }

    impl ServiceOrderWriter for Repository {
        fn create_service_order(&self, order: &NewServiceOrder) -> RepositoryResult<ServiceOrder>;
    }
}

/// Individual client without addresses, stamped at the Unix epoch.
pub fn client_fixture(id: i32, name: &str, email: &str) -> Client {
    use chrono::DateTime;

    use crate::domain::types::{ClientKind, ClientName, PhoneNumber};

    let timestamp = DateTime::from_timestamp(0, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default();

    Client {
        id: ClientId::new(id).unwrap(),
        name: ClientName::new(name).unwrap(),
        email: ClientEmail::new(email).unwrap(),
        phone: PhoneNumber::new("34999990000").unwrap(),
        tax_id: TaxId::new("52998224725").unwrap(),
        kind: ClientKind::Individual,
        password_hash: None,
        addresses: vec![],
        created_at: timestamp,
        updated_at: timestamp,
    }
}
