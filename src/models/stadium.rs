//! Stadium document. Stadium names are unique across the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stadium.
pub type StadiumId = Uuid;

/// A stadium teams play at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub id: StadiumId,
    pub name: String,
    pub city: Option<String>,
    pub capacity: Option<u32>,
}

impl Stadium {
    pub fn new(name: impl Into<String>, city: Option<String>, capacity: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city,
            capacity,
        }
    }
}

/// Field-level stadium update; only the listed fields can change.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StadiumUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u32>,
}
