//! Shortest relational path between two persons.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::store::Person;
use super::KinshipEngine;

impl KinshipEngine {
    /// Breadth-first search over the undirected union of parent, child and
    /// spouse edges, returning the first-discovered (shortest by edge-hop
    /// count) path inclusive of both endpoints.
    ///
    /// `from == to` short-circuits to a single-element path when the person
    /// exists. Returns `None` when the endpoints are disconnected or the
    /// target does not exist. The visited set guarantees termination on
    /// cyclic graphs; a node is never re-expanded once discovered.
    pub async fn relationship_path(&self, from: i64, to: i64) -> Result<Option<Vec<Person>>> {
        if from == to {
            return Ok(self.store().person(from).await?.map(|p| vec![p]));
        }

        let mut visited = HashSet::from([from]);
        let mut queue: VecDeque<(i64, Vec<i64>)> = VecDeque::from([(from, vec![from])]);

        while let Some((current, path)) = queue.pop_front() {
            // Uniform neighbors: parents, children, then the (first) spouse
            let mut neighbors = self.parents(current).await?;
            neighbors.extend(self.children(current).await?);
            if let Some(spouse) = self.spouse(current).await? {
                neighbors.push(spouse);
            }

            for neighbor in neighbors {
                if neighbor.id == to {
                    let mut ids = path;
                    ids.push(to);
                    return Ok(Some(self.resolve_path(&ids).await?));
                }
                if visited.insert(neighbor.id) {
                    let mut ids = path.clone();
                    ids.push(neighbor.id);
                    queue.push_back((neighbor.id, ids));
                }
            }
        }

        Ok(None)
    }

    async fn resolve_path(&self, ids: &[i64]) -> Result<Vec<Person>> {
        let mut persons = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(person) = self.store().person(id).await? {
                persons.push(person);
            }
        }
        Ok(persons)
    }
}
