//! Kinship labeling: classify the shortest path between two persons.

use crate::error::Result;
use crate::store::Person;
use super::KinshipEngine;

impl KinshipEngine {
    /// Human-readable kinship label for the shortest path from `from` to
    /// `to`, or `None` when the two are unrelated (or either is unknown).
    ///
    /// A direct edge is labeled with its literal relation kind. Longer
    /// paths are classified by re-checking each adjacent pair against the
    /// child/parent views: a pure descending chain means `from` is a strict
    /// ancestor of `to` (label names `to`'s position: grandchild and so
    /// on), a pure ascending chain the reverse; anything passing through a
    /// sibling or spouse hop falls back to a generic relative label.
    pub async fn relation_degree(&self, from: i64, to: i64) -> Result<Option<String>> {
        let path = match self.relationship_path(from, to).await? {
            Some(path) if path.len() >= 2 => path,
            _ => return Ok(None),
        };

        if path.len() == 2 {
            // First edge touching `from` that references `to` names the relation
            for rel in self.store().relations_for(from).await? {
                if rel.touches(to) {
                    return Ok(Some(rel.kind.to_string()));
                }
            }
        }

        let distance = path.len() - 1;

        if self.path_descends(&path).await? {
            return Ok(Some(match distance {
                2 => "grandchild".to_string(),
                3 => "great-grandchild".to_string(),
                n => format!("descendant ({} generations)", n),
            }));
        }

        if self.path_ascends(&path).await? {
            return Ok(Some(match distance {
                2 => "grandparent".to_string(),
                3 => "great-grandparent".to_string(),
                n => format!("ancestor ({} generations)", n),
            }));
        }

        Ok(Some(format!("relative ({} degrees removed)", distance)))
    }

    /// Every step goes parent -> child: each later person is among the
    /// earlier person's children
    async fn path_descends(&self, path: &[Person]) -> Result<bool> {
        for pair in path.windows(2) {
            let children = self.children(pair[0].id).await?;
            if !children.iter().any(|c| c.id == pair[1].id) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every step goes child -> parent
    async fn path_ascends(&self, path: &[Person]) -> Result<bool> {
        for pair in path.windows(2) {
            let parents = self.parents(pair[0].id).await?;
            if !parents.iter().any(|p| p.id == pair[1].id) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
