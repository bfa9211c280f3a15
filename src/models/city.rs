//! Diesel models for the city and state reference tables.

use diesel::prelude::*;

use crate::domain::city::{City as DomainCity, State as DomainState};
use crate::domain::types::{CityId, StateId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::states)]
pub struct State {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(State, foreign_key = state_id))]
#[diesel(table_name = crate::schema::cities)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state_id: i32,
}

impl TryFrom<State> for DomainState {
    type Error = TypeConstraintError;

    fn try_from(state: State) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StateId::new(state.id)?,
            name: state.name,
            abbreviation: state.abbreviation,
        })
    }
}

impl TryFrom<(City, State)> for DomainCity {
    type Error = TypeConstraintError;

    fn try_from((city, state): (City, State)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CityId::new(city.id)?,
            name: city.name,
            state: state.try_into()?,
        })
    }
}
