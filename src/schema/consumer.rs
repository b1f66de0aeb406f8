//! Handing a finished schema to a downstream builder.

use std::fmt::Write;

use super::types::{ColumnDescriptor, RelationshipDescriptor, RelationshipKind, Schema};

/// Something that builds from a [`Schema`], such as an ORM or API generator.
///
/// Consumers get a shared reference and cannot change the schema.
pub trait SchemaConsumer {
    type Output;
    type Error;

    fn consume(&mut self, schema: &Schema) -> Result<Self::Output, Self::Error>;
}

impl Schema {
    /// Pass this schema to a consumer.
    pub fn hand_to<C: SchemaConsumer>(&self, consumer: &mut C) -> Result<C::Output, C::Error> {
        consumer.consume(self)
    }
}

/// Renders a plain-text outline of tables, columns and relationships.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryConsumer;

impl SummaryConsumer {
    fn column_line(out: &mut String, column: &ColumnDescriptor) -> std::fmt::Result {
        write!(out, "  {} {}", column.name, column.kind)?;
        match (column.length, column.precision, column.scale) {
            (Some(len), _, _) => write!(out, "({})", len)?,
            (None, Some(p), Some(s)) => write!(out, "({},{})", p, s)?,
            (None, Some(p), None) => write!(out, "({})", p)?,
            _ => {}
        }
        if column.is_primary_key {
            out.push_str(" pk");
        } else if column.is_unique {
            out.push_str(" unique");
        }
        if column.is_auto_increment {
            out.push_str(" auto_increment");
        }
        if !column.is_nullable {
            out.push_str(" not_null");
        }
        if let Some(default) = &column.default_value {
            write!(out, " default={}", default)?;
        }
        out.push('\n');
        Ok(())
    }

    fn relationship_line(out: &mut String, rel: &RelationshipDescriptor) -> std::fmt::Result {
        match rel.kind {
            RelationshipKind::BelongsTo => writeln!(
                out,
                "  {} -> one {} ({} = {}.{}) [{}]",
                rel.field_name,
                rel.target_table,
                rel.local_column.as_deref().unwrap_or("?"),
                rel.target_table,
                rel.target_column.as_deref().unwrap_or("?"),
                rel.relationship_name
            ),
            RelationshipKind::HasMany => writeln!(
                out,
                "  {} -> many {} [{}]",
                rel.field_name, rel.target_table, rel.relationship_name
            ),
        }
    }
}

impl SchemaConsumer for SummaryConsumer {
    type Output = String;
    type Error = std::fmt::Error;

    fn consume(&mut self, schema: &Schema) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        for (i, table) in schema.tables().values().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            writeln!(out, "{}", table.name)?;
            for column in &table.columns {
                Self::column_line(&mut out, column)?;
            }
            for rel in schema.relationships_of(&table.name) {
                Self::relationship_line(&mut out, rel)?;
            }
        }
        Ok(out)
    }
}
