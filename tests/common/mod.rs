#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use osworks_crm::db::{DbPool, establish_connection_pool};
use osworks_crm::domain::address::NewAddress;
use osworks_crm::domain::client::NewClient;
use osworks_crm::domain::types::{
    CityId, ClientEmail, ClientKind, ClientName, District, PhoneNumber, PostalCode, Street,
    StreetNumber, TaxId,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite file living in a temporary directory for one test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn address(street: &str, city_id: Option<i32>) -> NewAddress {
    NewAddress::new(
        Street::new(street).unwrap(),
        StreetNumber::new("100").unwrap(),
        Some("Apto 12".to_string()),
        District::new("Centro").unwrap(),
        PostalCode::new("38400-000").unwrap(),
        city_id.map(|id| CityId::new(id).unwrap()),
    )
}

pub fn new_client(name: &str, email: &str, tax_id: &str) -> NewClient {
    NewClient::new(
        ClientName::new(name).unwrap(),
        ClientEmail::new(email).unwrap(),
        PhoneNumber::new("34999990000").unwrap(),
        TaxId::new(tax_id).unwrap(),
        ClientKind::Individual,
        vec![],
    )
}
