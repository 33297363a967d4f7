//! Optional adjacency-list accelerator.
//!
//! The engine re-queries the store per visited node, which is O(V*E) on
//! large trees. [`AdjacencyIndex`] snapshots persons and edges in one pass
//! and answers the same queries in memory with identical result ordering
//! (neighbor lists are populated in edge-id order, matching the store's
//! `ORDER BY r.id`). Callers rebuild the snapshot whenever they need
//! current data; the engine never caches one internally.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::Result;
use crate::store::{Person, RelationKind, Store};

#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    persons: HashMap<i64, Person>,
    parents: HashMap<i64, Vec<i64>>,
    children: HashMap<i64, Vec<i64>>,
    spouses: HashMap<i64, Vec<i64>>,
}

impl AdjacencyIndex {
    /// Snapshot the whole store into adjacency lists
    pub async fn load(store: &Store) -> Result<Self> {
        let mut index = Self::default();

        for person in store.all_persons().await? {
            index.persons.insert(person.id, person);
        }

        for rel in store.all_relations().await? {
            match rel.kind {
                RelationKind::Parent => {
                    index.children.entry(rel.person1_id).or_default().push(rel.person2_id);
                    index.parents.entry(rel.person2_id).or_default().push(rel.person1_id);
                }
                RelationKind::Child => {
                    index.parents.entry(rel.person1_id).or_default().push(rel.person2_id);
                    index.children.entry(rel.person2_id).or_default().push(rel.person1_id);
                }
                RelationKind::Spouse => {
                    index.spouses.entry(rel.person1_id).or_default().push(rel.person2_id);
                    index.spouses.entry(rel.person2_id).or_default().push(rel.person1_id);
                }
            }
        }

        Ok(index)
    }

    pub fn person(&self, person_id: i64) -> Option<&Person> {
        self.persons.get(&person_id)
    }

    fn resolve(&self, ids: &[i64]) -> Vec<&Person> {
        ids.iter().filter_map(|id| self.persons.get(id)).collect()
    }

    pub fn parents_of(&self, person_id: i64) -> Vec<&Person> {
        self.parents.get(&person_id).map_or_else(Vec::new, |ids| self.resolve(ids))
    }

    pub fn children_of(&self, person_id: i64) -> Vec<&Person> {
        self.children.get(&person_id).map_or_else(Vec::new, |ids| self.resolve(ids))
    }

    /// First spouse edge wins, matching the engine's first-match policy
    pub fn spouse_of(&self, person_id: i64) -> Option<&Person> {
        self.spouses
            .get(&person_id)
            .and_then(|ids| ids.iter().find_map(|id| self.persons.get(id)))
    }

    pub fn siblings_of(&self, person_id: i64) -> Vec<&Person> {
        let mut seen = HashSet::new();
        let mut siblings = Vec::new();
        for parent in self.parents_of(person_id) {
            for child in self.children_of(parent.id) {
                if child.id != person_id && seen.insert(child.id) {
                    siblings.push(child);
                }
            }
        }
        siblings
    }

    pub fn ancestors(&self, person_id: i64, max_generations: u32) -> Vec<(&Person, u32)> {
        self.expand(person_id, max_generations, &self.parents)
    }

    pub fn descendants(&self, person_id: i64, max_generations: u32) -> Vec<(&Person, u32)> {
        self.expand(person_id, max_generations, &self.children)
    }

    fn expand<'a>(
        &'a self,
        person_id: i64,
        max_generations: u32,
        adjacency: &'a HashMap<i64, Vec<i64>>,
    ) -> Vec<(&'a Person, u32)> {
        let mut result = Vec::new();
        let mut visited = HashSet::from([person_id]);
        let mut queue = VecDeque::from([(person_id, 0u32)]);

        while let Some((current, generation)) = queue.pop_front() {
            if generation >= max_generations {
                continue;
            }
            let Some(next) = adjacency.get(&current) else { continue };
            for &id in next {
                let Some(person) = self.persons.get(&id) else { continue };
                if visited.insert(id) {
                    queue.push_back((id, generation + 1));
                    result.push((person, generation + 1));
                }
            }
        }

        result
    }

    /// Same BFS as the engine's `relationship_path`, answered from the
    /// snapshot
    pub fn shortest_path(&self, from: i64, to: i64) -> Option<Vec<&Person>> {
        if from == to {
            return self.persons.get(&from).map(|p| vec![p]);
        }

        let mut visited = HashSet::from([from]);
        let mut queue: VecDeque<(i64, Vec<i64>)> = VecDeque::from([(from, vec![from])]);

        while let Some((current, path)) = queue.pop_front() {
            // Same neighbor order as the engine: parents, children, first spouse
            let mut neighbors: Vec<i64> = Vec::new();
            neighbors.extend(self.parents_of(current).iter().map(|p| p.id));
            neighbors.extend(self.children_of(current).iter().map(|p| p.id));
            if let Some(spouse) = self.spouse_of(current) {
                neighbors.push(spouse.id);
            }

            for id in neighbors {
                if id == to {
                    let mut ids = path;
                    ids.push(to);
                    return Some(self.resolve(&ids));
                }
                if visited.insert(id) {
                    let mut ids = path.clone();
                    ids.push(id);
                    queue.push_back((id, ids));
                }
            }
        }

        None
    }
}
