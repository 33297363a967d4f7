//! Bounded generational BFS: ancestors and descendants.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::error::Result;
use crate::store::Person;
use super::KinshipEngine;

/// One discovered ancestor or descendant with its edge-hop distance from
/// the query subject (generation >= 1).
#[derive(Debug, Clone, Serialize)]
pub struct AncestryEntry {
    pub person: Person,
    pub generation: u32,
}

/// Which direction a generational expansion walks
#[derive(Debug, Clone, Copy)]
enum Wave {
    Parents,
    Children,
}

impl KinshipEngine {
    /// All ancestors of `person_id` within `max_generations` edge-hops,
    /// in breadth-first discovery order.
    ///
    /// The visited set is keyed by person id and seeded with the subject,
    /// so traversal terminates on cyclic data and the subject is never
    /// listed as its own ancestor. A person is recorded at the first
    /// (shallowest) generation it is discovered and never re-emitted.
    /// Nodes at exactly `max_generations` are emitted but not expanded.
    pub async fn ancestors(&self, person_id: i64, max_generations: u32) -> Result<Vec<AncestryEntry>> {
        self.expand_generations(person_id, max_generations, Wave::Parents).await
    }

    /// All descendants of `person_id` within `max_generations` edge-hops.
    /// Identical algorithm and guarantees as [`ancestors`](Self::ancestors),
    /// walking child edges instead.
    pub async fn descendants(&self, person_id: i64, max_generations: u32) -> Result<Vec<AncestryEntry>> {
        self.expand_generations(person_id, max_generations, Wave::Children).await
    }

    async fn expand_generations(
        &self,
        person_id: i64,
        max_generations: u32,
        wave: Wave,
    ) -> Result<Vec<AncestryEntry>> {
        let mut result = Vec::new();
        let mut visited = HashSet::from([person_id]);
        let mut queue = VecDeque::from([(person_id, 0u32)]);

        while let Some((current, generation)) = queue.pop_front() {
            if generation >= max_generations {
                continue;
            }

            let next = match wave {
                Wave::Parents => self.parents(current).await?,
                Wave::Children => self.children(current).await?,
            };

            for person in next {
                if visited.insert(person.id) {
                    queue.push_back((person.id, generation + 1));
                    result.push(AncestryEntry { person, generation: generation + 1 });
                }
            }
        }

        Ok(result)
    }
}
