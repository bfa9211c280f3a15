use std::str::FromStr;

use crate::{
    db::{DbConnection, DbPool},
    domain::{
        city::City,
        client::{Client, NewClient, UpdateClient},
        service_order::{NewServiceOrder, ServiceOrder},
        types::{CityId, ClientEmail, ClientId, TaxId, TypeConstraintError},
    },
    repository::errors::RepositoryResult,
};

pub mod city;
pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod service_order;

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows skipped before this page starts, or `None` when it
    /// does not fit a SQL offset and the page lies past every row.
    pub fn offset(&self) -> Option<i64> {
        let page = i64::try_from(self.page).ok()?;
        let per_page = i64::try_from(self.per_page).ok()?;
        page.checked_mul(per_page)
    }

    /// Row limit for this page.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Client columns a page may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSortField {
    Id,
    Name,
    Email,
    Phone,
    TaxId,
}

impl FromStr for ClientSortField {
    type Err = TypeConstraintError;

    /// Accepts the column names as well as the Portuguese names of the public
    /// API (`nome`, `telefone`, `cpf`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(ClientSortField::Id),
            "name" | "nome" => Ok(ClientSortField::Name),
            "email" => Ok(ClientSortField::Email),
            "phone" | "telefone" => Ok(ClientSortField::Phone),
            "tax_id" | "taxid" | "cpf" => Ok(ClientSortField::TaxId),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort field `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPageQuery {
    pub pagination: Pagination,
    pub sort_field: ClientSortField,
    pub direction: SortDirection,
}

impl ClientPageQuery {
    /// Page ordered by name ascending.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            pagination: Pagination { page, per_page },
            sort_field: ClientSortField::Name,
            direction: SortDirection::Asc,
        }
    }

    pub fn order_by(mut self, field: ClientSortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }
}

/// Client lookups. Every single-client lookup reports absence as `Ok(None)`.
pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn list_clients_page(&self, query: &ClientPageQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    /// Stores a new hash, or clears it with `None`.
    fn update_client_password(
        &self,
        id: ClientId,
        password_hash: Option<&str>,
    ) -> RepositoryResult<()>;
    /// Swaps the hash only while it still equals `current`. Returns `false`
    /// when the stored hash has changed since.
    fn replace_client_password(
        &self,
        id: ClientId,
        current: &str,
        replacement: Option<&str>,
    ) -> RepositoryResult<bool>;
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

pub trait CityReader {
    fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>>;
}

pub trait ServiceOrderReader {
    fn list_service_orders_by_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<ServiceOrder>>;
}

pub trait ServiceOrderWriter {
    fn create_service_order(&self, order: &NewServiceOrder) -> RepositoryResult<ServiceOrder>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_accepts_legacy_names() {
        assert_eq!("nome".parse(), Ok(ClientSortField::Name));
        assert_eq!("cpf".parse(), Ok(ClientSortField::TaxId));
        assert_eq!("Email".parse(), Ok(ClientSortField::Email));
        assert!("password_hash".parse::<ClientSortField>().is_err());
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!("desc".parse(), Ok(SortDirection::Desc));
        assert_eq!("ASC".parse(), Ok(SortDirection::Asc));
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn offset_is_zero_based() {
        let query = ClientPageQuery::new(2, 24);
        assert_eq!(query.pagination.offset(), Some(48));
        assert_eq!(query.sort_field, ClientSortField::Name);
    }

    #[test]
    fn offset_past_sql_range_is_none() {
        let query = ClientPageQuery::new(i64::MAX as usize, 24);
        assert_eq!(query.pagination.offset(), None);

        let query = ClientPageQuery::new(400_000_000_000_000_000, 24);
        assert_eq!(query.pagination.offset(), None);

        let query = ClientPageQuery::new(i64::MAX as usize, 1);
        assert_eq!(query.pagination.offset(), Some(i64::MAX));
    }
}
