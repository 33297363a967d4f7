//! Relationship graph engine: derives kinship answers from raw relation
//! edges.
//!
//! Stateless query layer over [`Store`]: every operation re-reads the
//! store, so answers always reflect the latest committed data. Traversals
//! are cycle-safe via visited sets; nothing here assumes the parent/child
//! graph is acyclic.

mod accessors;
mod adjacency;
mod degree;
mod path;
mod traversal;

pub use adjacency::AdjacencyIndex;
pub use traversal::AncestryEntry;

use crate::store::Store;

/// Default generation bound for ancestor/descendant enumeration
pub const DEFAULT_MAX_GENERATIONS: u32 = 10;

/// Kinship query engine over an injected record store.
///
/// Holds no cache and no mutable state; concurrent use is as safe as the
/// underlying store's concurrent reads.
#[derive(Debug, Clone)]
pub struct KinshipEngine {
    store: Store,
}

impl KinshipEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::store::testutil::open_temp_store;
    use crate::store::{NewPerson, RelationKind, Store};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn birth(y: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, 1, 1)
    }

    pub struct SampleFamily {
        pub jan: i64,
        pub maria_sr: i64,
        pub piotr: i64,
        pub anna: i64,
        pub maria: i64,
        pub tomasz: i64,
        pub kasia: i64,
        pub jakub: i64,
    }

    /// Four-generation family: Jan & Maria sr. -> Piotr; Piotr & Anna ->
    /// Maria, Tomasz; Maria -> Kasia, Jakub.
    pub async fn sample_family() -> (Store, SampleFamily, TempDir) {
        let (store, temp) = open_temp_store().await;

        let jan = store.add_person(NewPerson::named("Jan", "Kowalski", birth(1940))).await.unwrap();
        let maria_sr = store.add_person(NewPerson::named("Maria", "Kowalska", birth(1942))).await.unwrap();
        let piotr = store.add_person(NewPerson::named("Piotr", "Nowak", birth(1948))).await.unwrap();
        let anna = store.add_person(NewPerson::named("Anna", "Nowak", birth(1950))).await.unwrap();
        let maria = store.add_person(NewPerson::named("Maria", "Nowak", birth(1975))).await.unwrap();
        let tomasz = store.add_person(NewPerson::named("Tomasz", "Nowak", birth(1977))).await.unwrap();
        let kasia = store.add_person(NewPerson::named("Katarzyna", "Kowalska", birth(2000))).await.unwrap();
        let jakub = store.add_person(NewPerson::named("Jakub", "Kowalski", birth(2002))).await.unwrap();

        store.add_relation(jan, maria_sr, RelationKind::Spouse).await.unwrap();
        store.add_relation(piotr, anna, RelationKind::Spouse).await.unwrap();
        store.add_relation(jan, piotr, RelationKind::Parent).await.unwrap();
        store.add_relation(maria_sr, piotr, RelationKind::Parent).await.unwrap();
        store.add_relation(piotr, maria, RelationKind::Parent).await.unwrap();
        store.add_relation(anna, maria, RelationKind::Parent).await.unwrap();
        store.add_relation(piotr, tomasz, RelationKind::Parent).await.unwrap();
        store.add_relation(anna, tomasz, RelationKind::Parent).await.unwrap();
        store.add_relation(maria, kasia, RelationKind::Parent).await.unwrap();
        store.add_relation(maria, jakub, RelationKind::Parent).await.unwrap();

        let family = SampleFamily { jan, maria_sr, piotr, anna, maria, tomasz, kasia, jakub };
        (store, family, temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testutil::open_temp_store;
    use crate::store::{NewPerson, RelationKind};
    use chrono::NaiveDate;

    fn birth(y: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, 1, 1)
    }

    /// The four-generation scenario: Jan -> Piotr (married to Anna) ->
    /// Maria -> Kasia, with no sibling records.
    async fn scenario() -> (KinshipEngine, i64, i64, i64, i64, i64, tempfile::TempDir) {
        let (store, temp) = open_temp_store().await;
        let jan = store.add_person(NewPerson::named("Jan", "Kowalski", birth(1940))).await.unwrap();
        let piotr = store.add_person(NewPerson::named("Piotr", "Nowak", birth(1948))).await.unwrap();
        let anna = store.add_person(NewPerson::named("Anna", "Nowak", birth(1950))).await.unwrap();
        let maria = store.add_person(NewPerson::named("Maria", "Nowak", birth(1975))).await.unwrap();
        let kasia = store.add_person(NewPerson::named("Katarzyna", "Nowak", birth(2000))).await.unwrap();

        store.add_relation(jan, piotr, RelationKind::Parent).await.unwrap();
        store.add_relation(piotr, anna, RelationKind::Spouse).await.unwrap();
        store.add_relation(piotr, maria, RelationKind::Parent).await.unwrap();
        store.add_relation(anna, maria, RelationKind::Parent).await.unwrap();
        store.add_relation(maria, kasia, RelationKind::Parent).await.unwrap();

        let engine = KinshipEngine::new(store);
        (engine, jan, piotr, anna, maria, kasia, temp)
    }

    #[tokio::test]
    async fn test_scenario_ancestors_of_kasia() {
        let (engine, jan, piotr, anna, maria, kasia, _temp) = scenario().await;

        let ancestors = engine.ancestors(kasia, 5).await.unwrap();
        let got: Vec<(i64, u32)> = ancestors.iter().map(|e| (e.person.id, e.generation)).collect();
        assert_eq!(got, vec![(maria, 1), (piotr, 2), (anna, 2), (jan, 3)]);
    }

    #[tokio::test]
    async fn test_scenario_spouse_and_siblings() {
        let (engine, _jan, piotr, anna, maria, _kasia, _temp) = scenario().await;

        let spouse = engine.spouse(piotr).await.unwrap().expect("Piotr is married");
        assert_eq!(spouse.id, anna);

        // Maria has parents on file but no shared-parent sibling
        assert!(engine.siblings(maria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_degree_jan_to_kasia() {
        let (engine, jan, _piotr, _anna, _maria, kasia, _temp) = scenario().await;

        // Pure descending chain of distance 3
        let label = engine.relation_degree(jan, kasia).await.unwrap();
        assert_eq!(label.as_deref(), Some("great-grandchild"));

        let label = engine.relation_degree(kasia, jan).await.unwrap();
        assert_eq!(label.as_deref(), Some("great-grandparent"));
    }

    #[tokio::test]
    async fn test_scenario_cascade_delete_observed_by_engine() {
        let (engine, _jan, piotr, anna, maria, _kasia, _temp) = scenario().await;

        engine.store().delete_person(piotr).await.unwrap();

        let parent_ids: Vec<i64> = engine
            .parents(maria)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(parent_ids, vec![anna]);

        // Every edge touching Piotr is gone, including the spouse record
        assert!(engine.spouse(anna).await.unwrap().is_none());
    }
}
