use rusqlite::{params, Row};

use crate::error::{KintreeError, Result};
use super::model::{NewPerson, Person};
use super::Store;

const PERSON_COLUMNS: &str =
    "id, given_name, family_name, birth_date, death_date, sex, \
     birth_place, death_place, notes, photo_path";

pub(crate) fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        given_name: row.get(1)?,
        family_name: row.get(2)?,
        birth_date: row.get(3)?,
        death_date: row.get(4)?,
        sex: row.get(5)?,
        birth_place: row.get(6)?,
        death_place: row.get(7)?,
        notes: row.get(8)?,
        photo_path: row.get(9)?,
    })
}

impl Store {
    /// Insert a person, returning the store-assigned id
    pub async fn add_person(&self, person: NewPerson) -> Result<i64> {
        self.db()
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT INTO persons (given_name, family_name, birth_date, death_date, \
                     sex, birth_place, death_place, notes, photo_path) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        person.given_name,
                        person.family_name,
                        person.birth_date,
                        person.death_date,
                        person.sex,
                        person.birth_place,
                        person.death_place,
                        person.notes,
                        person.photo_path,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Overwrite all attributes of an existing person
    pub async fn update_person(&self, person_id: i64, person: NewPerson) -> Result<()> {
        self.db()
            .with_connection(move |conn| {
                conn.execute(
                    "UPDATE persons SET given_name = ?1, family_name = ?2, birth_date = ?3, \
                     death_date = ?4, sex = ?5, birth_place = ?6, death_place = ?7, \
                     notes = ?8, photo_path = ?9 WHERE id = ?10",
                    params![
                        person.given_name,
                        person.family_name,
                        person.birth_date,
                        person.death_date,
                        person.sex,
                        person.birth_place,
                        person.death_place,
                        person.notes,
                        person.photo_path,
                        person_id,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Delete a person and every relation edge touching them.
    ///
    /// The cascade is explicit (and transactional) so the engine can never
    /// dereference a dangling endpoint, even on databases created before
    /// foreign keys were enforced.
    pub async fn delete_person(&self, person_id: i64) -> Result<()> {
        self.db()
            .with_connection(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "DELETE FROM relations WHERE person1_id = ?1 OR person2_id = ?1",
                    params![person_id],
                )?;
                tx.execute("DELETE FROM persons WHERE id = ?1", params![person_id])?;
                tx.commit()?;
                Ok(())
            })
            .await
    }

    /// Fetch a person by id; None when the identity is not on file
    pub async fn person(&self, person_id: i64) -> Result<Option<Person>> {
        self.db()
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM persons WHERE id = ?1",
                    PERSON_COLUMNS
                ))?;
                let mut rows = stmt.query_map(params![person_id], person_from_row)?;
                match rows.next() {
                    Some(row) => Ok(Some(row.map_err(KintreeError::Database)?)),
                    None => Ok(None),
                }
            })
            .await
    }

    /// All persons, ordered by family name then given name
    pub async fn all_persons(&self) -> Result<Vec<Person>> {
        self.db()
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM persons ORDER BY family_name, given_name",
                    PERSON_COLUMNS
                ))?;
                let rows = stmt.query_map([], person_from_row)?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row.map_err(KintreeError::Database)?);
                }
                Ok(out)
            })
            .await
    }

    /// Substring search on given or family name
    pub async fn search_persons(&self, query: &str) -> Result<Vec<Person>> {
        let pattern = format!("%{}%", query);
        self.db()
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM persons \
                     WHERE given_name LIKE ?1 OR family_name LIKE ?1 \
                     ORDER BY family_name, given_name",
                    PERSON_COLUMNS
                ))?;
                let rows = stmt.query_map(params![pattern], person_from_row)?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row.map_err(KintreeError::Database)?);
                }
                Ok(out)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::open_temp_store;
    use super::*;
    use crate::store::RelationKind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_person() {
        let (store, _temp) = open_temp_store().await;
        let id = store
            .add_person(NewPerson {
                given_name: "Jan".to_string(),
                family_name: "Kowalski".to_string(),
                birth_date: Some(date(1940, 5, 15)),
                sex: Some("M".to_string()),
                birth_place: Some("Warszawa".to_string()),
                ..NewPerson::default()
            })
            .await
            .unwrap();

        let person = store.person(id).await.unwrap().expect("person should exist");
        assert_eq!(person.id, id);
        assert_eq!(person.full_name(), "Jan Kowalski");
        assert_eq!(person.birth_date, Some(date(1940, 5, 15)));
        assert_eq!(person.birth_place.as_deref(), Some("Warszawa"));
        assert!(person.is_living());
    }

    #[tokio::test]
    async fn test_get_missing_person() {
        let (store, _temp) = open_temp_store().await;
        assert!(store.person(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_person() {
        let (store, _temp) = open_temp_store().await;
        let id = store
            .add_person(NewPerson::named("Anna", "Kowalska", None))
            .await
            .unwrap();

        store
            .update_person(
                id,
                NewPerson {
                    given_name: "Anna".to_string(),
                    family_name: "Nowak".to_string(),
                    death_date: Some(date(2020, 1, 1)),
                    ..NewPerson::default()
                },
            )
            .await
            .unwrap();

        let person = store.person(id).await.unwrap().unwrap();
        assert_eq!(person.family_name, "Nowak");
        assert!(!person.is_living());
    }

    #[tokio::test]
    async fn test_all_persons_ordering() {
        let (store, _temp) = open_temp_store().await;
        store.add_person(NewPerson::named("Piotr", "Nowak", None)).await.unwrap();
        store.add_person(NewPerson::named("Jan", "Kowalski", None)).await.unwrap();
        store.add_person(NewPerson::named("Anna", "Kowalska", None)).await.unwrap();

        let names: Vec<String> = store
            .all_persons()
            .await
            .unwrap()
            .iter()
            .map(Person::full_name)
            .collect();
        assert_eq!(names, vec!["Jan Kowalski", "Anna Kowalska", "Piotr Nowak"]);
    }

    #[tokio::test]
    async fn test_search_persons() {
        let (store, _temp) = open_temp_store().await;
        store.add_person(NewPerson::named("Jan", "Kowalski", None)).await.unwrap();
        store.add_person(NewPerson::named("Maria", "Kowalska", None)).await.unwrap();
        store.add_person(NewPerson::named("Piotr", "Nowak", None)).await.unwrap();

        let hits = store.search_persons("Kowal").await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.search_persons("Piotr").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].given_name, "Piotr");

        assert!(store.search_persons("Wisniewski").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_person_cascades_relations() {
        let (store, _temp) = open_temp_store().await;
        let jan = store.add_person(NewPerson::named("Jan", "Kowalski", None)).await.unwrap();
        let piotr = store.add_person(NewPerson::named("Piotr", "Nowak", None)).await.unwrap();
        let anna = store.add_person(NewPerson::named("Anna", "Nowak", None)).await.unwrap();

        store.add_relation(jan, piotr, RelationKind::Parent).await.unwrap();
        store.add_relation(piotr, anna, RelationKind::Spouse).await.unwrap();

        store.delete_person(piotr).await.unwrap();

        assert!(store.person(piotr).await.unwrap().is_none());
        assert!(store.relations_for(jan).await.unwrap().is_empty());
        assert!(store.relations_for(anna).await.unwrap().is_empty());
        assert!(store.all_relations().await.unwrap().is_empty());
    }
}
