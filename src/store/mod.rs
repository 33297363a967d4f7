//! Record store: keyed CRUD for persons and relation edges on SQLite.
//!
//! No traversal logic lives here; the kinship engine derives everything
//! from the raw edge queries below.

mod model;
mod persons;
mod relations;

pub use model::{NewPerson, Person, Relation, RelationKind};

use crate::db::Db;

/// Handle to the genealogy record store.
///
/// Cheap to clone; each operation opens its own connection through [`Db`].
#[derive(Debug, Clone)]
pub struct Store {
    db: Db,
}

impl Store {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::db::migrate;
    use std::path::Path;
    use tempfile::TempDir;

    /// Open a migrated store on a throwaway database file.
    pub async fn open_temp_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Db::new(&db_path);
        let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        db.with_connection(move |conn| migrate::run_migrations(conn, &migrations_dir))
            .await
            .unwrap();
        (Store::new(db), temp_dir)
    }
}
