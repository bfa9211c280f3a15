//! Reference data for addresses: cities and the states they belong to.

use serde::{Deserialize, Serialize};

use crate::domain::types::{CityId, StateId};

/// Federative state (estado).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub abbreviation: String,
}

/// City referenced by client addresses. Cities are not owned by clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state: State,
}
