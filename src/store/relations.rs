use rusqlite::{params, Row};

use crate::error::{KintreeError, Result};
use super::model::{Relation, RelationKind};
use super::Store;

// Denormalized endpoint names come from the join; the engine ignores them
// but the CLI and editing layers display them.
const RELATION_SELECT: &str =
    "SELECT r.id, r.person1_id, r.person2_id, r.kind, \
     p1.given_name || ' ' || p1.family_name, \
     p2.given_name || ' ' || p2.family_name \
     FROM relations r \
     JOIN persons p1 ON r.person1_id = p1.id \
     JOIN persons p2 ON r.person2_id = p2.id";

fn relation_from_row(row: &Row<'_>) -> rusqlite::Result<Relation> {
    Ok(Relation {
        id: row.get(0)?,
        person1_id: row.get(1)?,
        person2_id: row.get(2)?,
        kind: row.get(3)?,
        person1_name: row.get(4)?,
        person2_name: row.get(5)?,
    })
}

impl Store {
    /// Insert a relation edge, returning its id.
    ///
    /// No deduplication: a mirrored spelling of an existing edge is stored
    /// as another record.
    pub async fn add_relation(
        &self,
        person1_id: i64,
        person2_id: i64,
        kind: RelationKind,
    ) -> Result<i64> {
        self.db()
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT INTO relations (person1_id, person2_id, kind) VALUES (?1, ?2, ?3)",
                    params![person1_id, person2_id, kind],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Delete a single relation edge by id
    pub async fn delete_relation(&self, relation_id: i64) -> Result<()> {
        self.db()
            .with_connection(move |conn| {
                conn.execute("DELETE FROM relations WHERE id = ?1", params![relation_id])?;
                Ok(())
            })
            .await
    }

    /// All edges touching the given person, in edge-id order
    pub async fn relations_for(&self, person_id: i64) -> Result<Vec<Relation>> {
        self.db()
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE r.person1_id = ?1 OR r.person2_id = ?1 ORDER BY r.id",
                    RELATION_SELECT
                ))?;
                let rows = stmt.query_map(params![person_id], relation_from_row)?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row.map_err(KintreeError::Database)?);
                }
                Ok(out)
            })
            .await
    }

    /// Every edge in the store, in edge-id order
    pub async fn all_relations(&self) -> Result<Vec<Relation>> {
        self.db()
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&format!("{} ORDER BY r.id", RELATION_SELECT))?;
                let rows = stmt.query_map([], relation_from_row)?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row.map_err(KintreeError::Database)?);
                }
                Ok(out)
            })
            .await
    }
}
