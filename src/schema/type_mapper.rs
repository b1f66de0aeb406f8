//! Catalog type token → [`ColumnKind`] mapping.
//!
//! Each dialect supplies a static table of [`TypeEntry`] rows. Lookup tries,
//! in order:
//!
//! 1. the normalized token as-is (`tinyint(1)`)
//! 2. the token without sign/fill modifiers (`tinyint(1) unsigned` → `tinyint(1)`)
//! 3. the base name without parameters (`varchar(64)` → `varchar`,
//!    `timestamp(6) with time zone` → `timestamp with time zone`)
//!
//! Anything still unknown becomes [`ColumnKind::Text`]. Mapping never fails.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::ColumnKind;
use crate::catalog::CatalogColumn;
use crate::dialect::Dialect;

/// Extra metadata a type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    None,
    /// Character length from `character_maximum_length` or the token.
    Length,
    /// Numeric precision from `numeric_precision`.
    Precision,
    /// Numeric precision and scale, from the catalog or the token.
    PrecisionScale,
}

/// One row of a dialect's known-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    /// Lowercase type token.
    pub token: &'static str,
    pub kind: ColumnKind,
    pub refinement: Refinement,
}

impl TypeEntry {
    pub const fn new(token: &'static str, kind: ColumnKind, refinement: Refinement) -> Self {
        Self {
            token,
            kind,
            refinement,
        }
    }
}

/// Result of mapping one column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    pub kind: ColumnKind,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    /// Whether the token was found in the dialect table.
    pub recognized: bool,
}

impl MappedType {
    fn fallback() -> Self {
        Self {
            kind: ColumnKind::Text,
            length: None,
            precision: None,
            scale: None,
            recognized: false,
        }
    }
}

static PARAMETERIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>[^(]+?)\s*\((?P<args>[^)]*)\)(?P<rest>.*)$").unwrap()
});

const MODIFIERS: &[&str] = &["unsigned", "signed", "zerofill"];

/// Lowercase, trim, and collapse internal whitespace.
fn normalize(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn strip_modifiers(token: &str) -> String {
    token
        .split(' ')
        .filter(|word| !MODIFIERS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split `name(args) rest` into (`name rest`, parsed args).
fn split_parameters(token: &str) -> Option<(String, Vec<u32>)> {
    let caps = PARAMETERIZED.captures(token)?;
    let base = caps.name("base")?.as_str().trim();
    let rest = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or("");
    let args = caps
        .name("args")
        .map(|m| {
            m.as_str()
                .split(',')
                .filter_map(|a| a.trim().parse::<u32>().ok())
                .collect()
        })
        .unwrap_or_default();

    let name = if rest.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, rest)
    };
    Some((name, args))
}

/// Find a token in a type table.
pub fn lookup(table: &'static [TypeEntry], token: &str) -> Option<&'static TypeEntry> {
    table.iter().find(|entry| entry.token == token)
}

/// Resolve a token against a table, returning the entry and any token parameters.
fn resolve(table: &'static [TypeEntry], token: &str) -> Option<(&'static TypeEntry, Vec<u32>)> {
    let normalized = normalize(token);
    let unmodified = strip_modifiers(&normalized);
    let params = split_parameters(&unmodified);
    let args = params.as_ref().map(|(_, a)| a.clone()).unwrap_or_default();

    if let Some(entry) = lookup(table, &normalized).or_else(|| lookup(table, &unmodified)) {
        return Some((entry, args));
    }

    let (base, args) = params?;
    lookup(table, &base).map(|entry| (entry, args))
}

/// Map a catalog type token to a column kind with refinement metadata.
///
/// `column` supplies the catalog's length/precision fields; parameters
/// written in the token are used when those fields are absent.
pub fn map_type(dialect: Dialect, token: &str, column: &CatalogColumn) -> MappedType {
    let Some((entry, args)) = resolve(dialect.catalog().type_table(), token) else {
        debug!(
            dialect = %dialect,
            table = %column.table_name,
            column = %column.column_name,
            data_type = %token,
            "unrecognized column type, using text"
        );
        return MappedType::fallback();
    };

    let mut mapped = MappedType {
        kind: entry.kind,
        length: None,
        precision: None,
        scale: None,
        recognized: true,
    };

    match entry.refinement {
        Refinement::None => {}
        Refinement::Length => {
            mapped.length = column.character_maximum_length.or_else(|| args.first().copied());
        }
        Refinement::Precision => {
            mapped.precision = column.numeric_precision;
        }
        Refinement::PrecisionScale => {
            mapped.precision = column.numeric_precision.or_else(|| args.first().copied());
            mapped.scale = column.numeric_scale.or_else(|| args.get(1).copied());
        }
    }

    mapped
}
