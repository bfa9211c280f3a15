use diesel::prelude::*;

use crate::{
    domain::{city::City, types::CityId},
    models::city::{City as DbCity, State as DbState},
    repository::{CityReader, DieselRepository, errors::RepositoryResult},
};

impl CityReader for DieselRepository {
    fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>> {
        use crate::schema::{cities, states};

        let mut conn = self.conn()?;

        let row = cities::table
            .inner_join(states::table)
            .filter(cities::id.eq(id.get()))
            .first::<(DbCity, DbState)>(&mut conn)
            .optional()?;

        Ok(row.map(City::try_from).transpose()?)
    }
}
