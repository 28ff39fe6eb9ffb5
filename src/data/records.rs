use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::debug;

/// Semantic type of a list-view column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
}

/// A single cell value in a record.
///
/// `Null` stands for a field that was absent from the export or could not
/// be coerced to the column's declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Coerce a JSON value to the column's declared kind.
    pub fn from_json(json: &JsonValue, kind: FieldKind) -> Self {
        match (kind, json) {
            (_, JsonValue::Null) => FieldValue::Null,
            (FieldKind::Text, JsonValue::String(s)) => FieldValue::Text(s.clone()),
            (FieldKind::Text, JsonValue::Number(n)) => FieldValue::Text(n.to_string()),
            (FieldKind::Text, JsonValue::Bool(b)) => FieldValue::Text(b.to_string()),
            (FieldKind::Integer, JsonValue::Number(n)) => {
                n.as_i64().map(FieldValue::Integer).unwrap_or(FieldValue::Null)
            }
            (FieldKind::Integer, JsonValue::String(s)) => {
                s.trim().parse::<i64>().map(FieldValue::Integer).unwrap_or(FieldValue::Null)
            }
            (FieldKind::Float, JsonValue::Number(n)) => {
                n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null)
            }
            (FieldKind::Float, JsonValue::String(s)) => {
                s.trim().parse::<f64>().map(FieldValue::Float).unwrap_or(FieldValue::Null)
            }
            (FieldKind::Boolean, JsonValue::Bool(b)) => FieldValue::Boolean(*b),
            (FieldKind::Boolean, JsonValue::String(s)) => FieldValue::parse(FieldKind::Boolean, s),
            (FieldKind::Boolean, JsonValue::Number(n)) => {
                FieldValue::Boolean(n.as_i64() == Some(1))
            }
            _ => FieldValue::Null,
        }
    }

    /// Parse a raw string (CSV cell) into the column's declared kind.
    pub fn parse(kind: FieldKind, s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return FieldValue::Null;
        }

        match kind {
            FieldKind::Text => FieldValue::Text(trimmed.to_string()),
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(FieldValue::Integer)
                .unwrap_or(FieldValue::Null),
            FieldKind::Float => trimmed
                .parse::<f64>()
                .map(FieldValue::Float)
                .unwrap_or(FieldValue::Null),
            FieldKind::Boolean => {
                let lower = trimmed.to_lowercase();
                FieldValue::Boolean(lower == "true" || lower == "1" || lower == "yes")
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The text content, for search matching. Only `Text` values participate
    /// in free-text search; display forms of numbers and booleans do not.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Integer(_) => Some(FieldKind::Integer),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Boolean(_) => Some(FieldKind::Boolean),
            FieldValue::Null => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, ""),
        }
    }
}

/// Column descriptor: name, semantic kind, and whether free-text search
/// scans this column. The searchable set is part of the schema a caller
/// supplies; the pipeline never hard-codes field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub searchable: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            searchable: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

/// One row of a list view, positionally aligned with the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<FieldValue>,
}

impl Record {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named collection of records sharing one schema. Insertion order of the
/// records is the "no sort" order every view starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
            records: Vec::new(),
        }
    }

    pub fn add_record(&mut self, record: Record) -> Result<(), String> {
        if record.len() != self.fields.len() {
            return Err(format!(
                "Record has {} values but the schema has {} fields",
                record.len(),
                self.fields.len()
            ));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Indices of the columns free-text search scans.
    pub fn searchable_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.searchable)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a value at a specific record and field index.
    pub fn value(&self, record: usize, field: usize) -> Option<&FieldValue> {
        self.records.get(record)?.get(field)
    }

    /// Get a value by record index and field name.
    pub fn value_by_name(&self, record: usize, field_name: &str) -> Option<&FieldValue> {
        let field = self.field_index(field_name)?;
        self.value(record, field)
    }

    /// Build a record set from a JSON array of objects, coercing each field
    /// to the schema's declared kind. Absent fields become `Null`; object
    /// keys outside the schema are ignored.
    pub fn from_json_objects(
        name: impl Into<String>,
        fields: Vec<FieldDef>,
        rows: &[JsonValue],
    ) -> Result<Self, String> {
        let mut set = RecordSet::new(name, fields);

        for row in rows {
            let obj = row
                .as_object()
                .ok_or_else(|| "JSON data must be an array of objects".to_string())?;
            let values = set
                .fields
                .iter()
                .map(|field| {
                    obj.get(&field.name)
                        .map(|v| FieldValue::from_json(v, field.kind))
                        .unwrap_or(FieldValue::Null)
                })
                .collect();
            set.add_record(Record::new(values))?;
        }

        debug!(
            "Built record set '{}' with {} fields and {} records",
            set.name,
            set.field_count(),
            set.record_count()
        );
        Ok(set)
    }
}
