pub mod config;
pub mod error;
pub mod db;
pub mod store;
pub mod kinship;

pub use config::Config;
pub use error::{KintreeError, Result};
pub use store::{NewPerson, Person, Relation, RelationKind, Store};
pub use kinship::{AdjacencyIndex, AncestryEntry, KinshipEngine, DEFAULT_MAX_GENERATIONS};
