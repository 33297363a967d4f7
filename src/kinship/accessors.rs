//! Edge-classification accessors: parents, children, spouse, siblings.
//!
//! These read raw edges and translate kind semantics; they do not dedupe,
//! so a mirror pair (A, parent, B) + (B, child, A) yields A twice in
//! `parents(B)`. The traversal layers dedupe by visited set regardless.

use std::collections::HashSet;

use crate::error::Result;
use crate::store::{Person, RelationKind};
use super::KinshipEngine;

impl KinshipEngine {
    /// Persons recorded as parents of `person_id`
    pub async fn parents(&self, person_id: i64) -> Result<Vec<Person>> {
        let mut parents = Vec::new();
        for rel in self.store().relations_for(person_id).await? {
            let parent_id = match rel.kind {
                RelationKind::Parent if rel.person2_id == person_id => rel.person1_id,
                RelationKind::Child if rel.person1_id == person_id => rel.person2_id,
                _ => continue,
            };
            if let Some(person) = self.store().person(parent_id).await? {
                parents.push(person);
            }
        }
        Ok(parents)
    }

    /// Persons recorded as children of `person_id`
    pub async fn children(&self, person_id: i64) -> Result<Vec<Person>> {
        let mut children = Vec::new();
        for rel in self.store().relations_for(person_id).await? {
            let child_id = match rel.kind {
                RelationKind::Parent if rel.person1_id == person_id => rel.person2_id,
                RelationKind::Child if rel.person2_id == person_id => rel.person1_id,
                _ => continue,
            };
            if let Some(person) = self.store().person(child_id).await? {
                children.push(person);
            }
        }
        Ok(children)
    }

    /// The other party of the first spouse edge touching `person_id`.
    ///
    /// First-match policy: additional spouse edges (remarriage records)
    /// are ignored.
    pub async fn spouse(&self, person_id: i64) -> Result<Option<Person>> {
        for rel in self.store().relations_for(person_id).await? {
            if rel.kind == RelationKind::Spouse {
                return self.store().person(rel.other_endpoint(person_id)).await;
            }
        }
        Ok(None)
    }

    /// Children of each parent of `person_id`, excluding the person,
    /// deduplicated by identity, in discovery order. Half-siblings are
    /// included when any one parent is shared.
    pub async fn siblings(&self, person_id: i64) -> Result<Vec<Person>> {
        let mut seen = HashSet::new();
        let mut siblings = Vec::new();
        for parent in self.parents(person_id).await? {
            for child in self.children(parent.id).await? {
                if child.id != person_id && seen.insert(child.id) {
                    siblings.push(child);
                }
            }
        }
        Ok(siblings)
    }
}
