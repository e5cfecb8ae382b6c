use crate::Record;

/// Ordered (column, field) pairs derived from a record type.
///
/// Derivation is deterministic: `R::FIELDS` is a `const`, so two derivations
/// for the same type always agree on ordering and column names. One
/// `FieldMapping` is derived per statement and shared by everything touching
/// that statement, so parameter positions and result-cell positions can never
/// drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    fields: Vec<MappedField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedField {
    /// Declared field name.
    pub field: &'static str,

    /// Derived column name (explicit override, or the lower-cased field name).
    pub column: String,
}

impl FieldMapping {
    /// Derives the mapping for a record type.
    ///
    /// # Panics
    ///
    /// Panics if the type declares no fields. A record with nothing to map is
    /// a programmer error, not a recoverable condition.
    pub fn of<R: Record>() -> Self {
        assert!(
            !R::FIELDS.is_empty(),
            "record type has no fields to map to columns"
        );

        let fields = R::FIELDS
            .iter()
            .map(|descriptor| MappedField {
                field: descriptor.name(),
                column: descriptor.column_name(),
            })
            .collect();

        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    /// Derived column names, in field declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.column.clone()).collect()
    }
}
