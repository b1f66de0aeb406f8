//! Relationship and field naming.
//!
//! - Belongs-to fields take the foreign key column without its `_id` suffix
//! - Has-many fields take the pluralized name of the referencing table
//! - Relationship names are `<child_table>_<child_column>`
//!
//! Every fallback for a clash is derived from the edge itself, never from
//! iteration order or randomness, so repeated runs produce the same names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::inflection;
use crate::catalog::ForeignKeyEdge;

/// Length of the hex suffix used to break naming ties.
const SHORT_HASH_LEN: usize = 8;

/// Naming knobs for relationship fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOptions {
    /// Singularize belongs-to field names after stripping `_id`
    /// (`authors_id` → `author`).
    pub singularize_belongs_to: bool,
}

/// SHA-256 over identifier parts, as lowercase hex.
///
/// Parts are separated by a NUL byte so `("ab", "c")` and `("a", "bc")` differ.
pub fn stable_hash(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update([0u8]);
        }
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// First eight hex characters of [`stable_hash`].
pub fn short_hash(parts: &[&str]) -> String {
    let mut hash = stable_hash(parts);
    hash.truncate(SHORT_HASH_LEN);
    hash
}

fn edge_parts(edge: &ForeignKeyEdge) -> [&str; 4] {
    [
        edge.from_table.as_str(),
        edge.from_column.as_str(),
        edge.to_table.as_str(),
        edge.to_column.as_str(),
    ]
}

/// Short hash of an edge; attempts after the first are salted with a counter.
fn salted_hash(edge: &ForeignKeyEdge, attempt: u32) -> String {
    let parts = edge_parts(edge);
    if attempt == 0 {
        return short_hash(&parts);
    }
    let salt = attempt.to_string();
    let mut salted = parts.to_vec();
    salted.push(&salt);
    short_hash(&salted)
}

/// Strip a trailing `_id` (any case). A column named just `_id` is kept.
pub fn strip_id_suffix(column: &str) -> &str {
    let len = column.len();
    if len > 3 && column.is_char_boundary(len - 3) && column[len - 3..].eq_ignore_ascii_case("_id")
    {
        &column[..len - 3]
    } else {
        column
    }
}

/// Field name for the belongs-to side on the table holding the foreign key.
pub fn belongs_to_field_name(column: &str, options: &NamingOptions) -> String {
    let stripped = strip_id_suffix(column);
    if options.singularize_belongs_to {
        inflection::singularize(stripped)
    } else {
        stripped.to_string()
    }
}

/// Field name for the has-many side on the referenced table.
pub fn has_many_field_name(referencing_table: &str) -> String {
    inflection::pluralize(referencing_table)
}

/// Assigns relationship names, one per foreign-key edge.
#[derive(Debug, Default)]
pub struct RelationshipNamer {
    used: HashSet<String>,
}

impl RelationshipNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name an edge `<from_table>_<from_column>`.
    ///
    /// If that name is already taken (the same column in two foreign keys,
    /// or an underscore ambiguity such as `a_b.c` vs `a.b_c`), the edge's
    /// short hash is appended.
    pub fn assign(&mut self, edge: &ForeignKeyEdge) -> String {
        let base = format!("{}_{}", edge.from_table, edge.from_column);
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut attempt = 0u32;
        loop {
            let name = format!("{}_{}", base, salted_hash(edge, attempt));
            if self.used.insert(name.clone()) {
                return name;
            }
            attempt += 1;
        }
    }
}

/// Pick a field name not yet taken in one table's relationship set.
///
/// Tries the candidate, then `<candidate>_<column without _id>`, then that
/// with the edge's short hash appended.
pub fn unique_field_name(
    candidate: &str,
    edge: &ForeignKeyEdge,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    if !is_taken(candidate) {
        return candidate.to_string();
    }

    let with_column = format!("{}_{}", candidate, strip_id_suffix(&edge.from_column));
    if !is_taken(&with_column) {
        return with_column;
    }

    let mut attempt = 0u32;
    loop {
        let name = format!("{}_{}", with_column, salted_hash(edge, attempt));
        if !is_taken(&name) {
            return name;
        }
        attempt += 1;
    }
}
