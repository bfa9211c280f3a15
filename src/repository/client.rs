use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::{
        address::Address,
        city::City,
        client::{Client, NewClient, UpdateClient},
        types::{ClientEmail, ClientId, TaxId},
    },
    models::{
        address::{Address as DbAddress, NewAddress as DbNewAddress},
        city::{City as DbCity, State as DbState},
        client::{Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient},
    },
    repository::{
        ClientPageQuery, ClientReader, ClientSortField, ClientWriter, DieselRepository,
        SortDirection,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Loads the addresses of the given clients with their cities, grouped by
/// client id and kept in insertion order.
fn load_addresses(
    conn: &mut SqliteConnection,
    client_ids: Vec<i32>,
) -> RepositoryResult<HashMap<i32, Vec<Address>>> {
    use crate::schema::{addresses, cities, states};

    let rows = addresses::table
        .filter(addresses::client_id.eq_any(client_ids))
        .order(addresses::id.asc())
        .load::<DbAddress>(conn)?;

    let city_ids: Vec<i32> = rows
        .iter()
        .filter_map(|row| row.city_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let cities = cities::table
        .inner_join(states::table)
        .filter(cities::id.eq_any(city_ids))
        .load::<(DbCity, DbState)>(conn)?
        .into_iter()
        .map(|(city, state)| {
            let id = city.id;
            City::try_from((city, state)).map(|city| (id, city))
        })
        .collect::<Result<HashMap<i32, City>, _>>()?;

    let mut grouped: HashMap<i32, Vec<Address>> = HashMap::new();
    for row in rows {
        let client_id = row.client_id;
        let city = row.city_id.and_then(|id| cities.get(&id).cloned());
        grouped
            .entry(client_id)
            .or_default()
            .push(row.into_domain(city)?);
    }

    Ok(grouped)
}

/// Attaches addresses to client rows, preserving the row order.
fn hydrate_clients(conn: &mut SqliteConnection, rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut addresses = load_addresses(conn, ids)?;

    rows.into_iter()
        .map(|row| {
            let owned = addresses.remove(&row.id).unwrap_or_default();
            row.into_domain(owned).map_err(RepositoryError::from)
        })
        .collect()
}

fn hydrate_client(conn: &mut SqliteConnection, row: DbClient) -> RepositoryResult<Client> {
    hydrate_clients(conn, vec![row])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

fn insert_addresses(
    conn: &mut SqliteConnection,
    client_id: i32,
    addresses: &[crate::domain::address::NewAddress],
) -> RepositoryResult<()> {
    use crate::schema::addresses;

    if addresses.is_empty() {
        return Ok(());
    }

    let rows: Vec<DbNewAddress> = addresses
        .iter()
        .map(|address| DbNewAddress::from_domain(client_id, address))
        .collect();

    diesel::insert_into(addresses::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

impl ClientReader for DieselRepository {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let rows = clients::table
            .order((clients::name.asc(), clients::id.asc()))
            .load::<DbClient>(&mut conn)?;

        hydrate_clients(&mut conn, rows)
    }

    fn list_clients_page(&self, query: &ClientPageQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        conn.transaction::<(usize, Vec<Client>), RepositoryError, _>(|conn| {
            let total = clients::table.count().get_result::<i64>(conn)? as usize;

            let Some(offset) = query.pagination.offset() else {
                return Ok((total, Vec::new()));
            };

            let mut items = clients::table.into_boxed::<Sqlite>();

            items = match (query.sort_field, query.direction) {
                (ClientSortField::Id, SortDirection::Asc) => items.order(clients::id.asc()),
                (ClientSortField::Id, SortDirection::Desc) => items.order(clients::id.desc()),
                (ClientSortField::Name, SortDirection::Asc) => items.order(clients::name.asc()),
                (ClientSortField::Name, SortDirection::Desc) => items.order(clients::name.desc()),
                (ClientSortField::Email, SortDirection::Asc) => items.order(clients::email.asc()),
                (ClientSortField::Email, SortDirection::Desc) => {
                    items.order(clients::email.desc())
                }
                (ClientSortField::Phone, SortDirection::Asc) => items.order(clients::phone.asc()),
                (ClientSortField::Phone, SortDirection::Desc) => {
                    items.order(clients::phone.desc())
                }
                (ClientSortField::TaxId, SortDirection::Asc) => items.order(clients::tax_id.asc()),
                (ClientSortField::TaxId, SortDirection::Desc) => {
                    items.order(clients::tax_id.desc())
                }
            };

            // Ties keep a stable order across pages.
            let rows = items
                .then_order_by(clients::id.asc())
                .offset(offset)
                .limit(query.pagination.limit())
                .load::<DbClient>(conn)?;

            let clients = hydrate_clients(conn, rows)?;

            Ok((total, clients))
        })
    }

    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let row = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        row.map(|row| hydrate_client(&mut conn, row)).transpose()
    }

    fn get_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let row = clients::table
            .filter(clients::tax_id.eq(tax_id.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        row.map(|row| hydrate_client(&mut conn, row)).transpose()
    }

    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let row = clients::table
            .filter(clients::email.eq(email.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        row.map(|row| hydrate_client(&mut conn, row)).transpose()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        conn.transaction::<Client, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();
            let insertable = DbNewClient::from_domain(new_client, now);

            let row = diesel::insert_into(clients::table)
                .values(&insertable)
                .get_result::<DbClient>(conn)?;

            insert_addresses(conn, row.id, &new_client.addresses)?;

            hydrate_client(conn, row)
        })
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        use crate::schema::{addresses, clients};

        let mut conn = self.conn()?;

        conn.transaction::<Client, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();
            let changes = DbUpdateClient::from_domain(updates, now);

            let row = diesel::update(clients::table.find(id.get()))
                .set(&changes)
                .get_result::<DbClient>(conn)?;

            diesel::delete(addresses::table.filter(addresses::client_id.eq(id.get())))
                .execute(conn)?;
            insert_addresses(conn, row.id, &updates.addresses)?;

            hydrate_client(conn, row)
        })
    }

    fn update_client_password(
        &self,
        id: ClientId,
        password_hash: Option<&str>,
    ) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let affected = diesel::update(clients::table.find(id.get()))
            .set((
                clients::password_hash.eq(password_hash),
                clients::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn replace_client_password(
        &self,
        id: ClientId,
        current: &str,
        replacement: Option<&str>,
    ) -> RepositoryResult<bool> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            clients::table
                .find(id.get())
                .filter(clients::password_hash.eq(current)),
        )
        .set((
            clients::password_hash.eq(replacement),
            clients::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        // Addresses go with the client (ON DELETE CASCADE); service orders
        // make this fail with a foreign key violation.
        let affected = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
