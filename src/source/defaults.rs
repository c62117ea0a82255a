//! Declared-default source.

use super::{Fetched, RawValue, Source, SourceKind};
use crate::error::Result;
use crate::schema::Schema;

/// The lowest-precedence source: every option's declared default.
///
/// Always fully populated over the schema and infallible; defaults were
/// cross-validated when the schema was linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl Source for Defaults {
    fn kind(&self) -> SourceKind {
        SourceKind::Defaults
    }

    fn fetch(&self, schema: &Schema) -> Result<Fetched> {
        Ok(schema
            .iter()
            .map(|spec| {
                (
                    spec.name().to_string(),
                    RawValue::Typed(spec.default_value().clone()),
                )
            })
            .collect())
    }
}
