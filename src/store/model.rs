use chrono::{Datelike, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person record. Identity is the store-assigned rowid, stable for the
/// record's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub given_name: String,
    pub family_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_date.map(|d| d.year())
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_date.map(|d| d.year())
    }

    /// A person with no death date on file is considered living
    pub fn is_living(&self) -> bool {
        self.death_date.is_none()
    }
}

/// Field set for inserting or updating a person
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    pub given_name: String,
    pub family_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

impl NewPerson {
    /// Shorthand for the common case of a named person with a birth date
    pub fn named(given_name: &str, family_name: &str, birth_date: Option<NaiveDate>) -> Self {
        Self {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
            birth_date,
            ..Self::default()
        }
    }
}

/// The closed set of relation-kind tags.
///
/// `Parent` and `Child` are semantic inverses: (A, parent, B) and
/// (B, child, A) are equivalent evidence that A parents B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// person1 is a parent of person2
    Parent,
    /// person1 is a child of person2
    Child,
    /// symmetric
    Spouse,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Spouse => "spouse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(RelationKind::Parent),
            "child" => Some(RelationKind::Child),
            "spouse" => Some(RelationKind::Spouse),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for RelationKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for RelationKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        RelationKind::parse(s).ok_or_else(|| {
            FromSqlError::Other(format!("unknown relation kind: {}", s).into())
        })
    }
}

/// A stored relation edge between two persons, with denormalized endpoint
/// names for display. The kinship engine only looks at ids and kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    pub person1_id: i64,
    pub person2_id: i64,
    pub kind: RelationKind,
    pub person1_name: Option<String>,
    pub person2_name: Option<String>,
}

impl Relation {
    /// Whether this edge has the given person at either endpoint
    pub fn touches(&self, person_id: i64) -> bool {
        self.person1_id == person_id || self.person2_id == person_id
    }

    /// The endpoint opposite to `person_id`. Assumes the edge touches it.
    pub fn other_endpoint(&self, person_id: i64) -> i64 {
        if self.person1_id == person_id {
            self.person2_id
        } else {
            self.person1_id
        }
    }

    pub fn describe(&self) -> String {
        match (&self.person1_name, &self.person2_name) {
            (Some(a), Some(b)) => format!("{} - {} - {}", a, self.kind, b),
            _ => format!(
                "Person {} - {} - Person {}",
                self.person1_id, self.kind, self.person2_id
            ),
        }
    }
}
