use crate::data::records::{FieldDef, FieldValue, Record, RecordSet};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a JSON array of objects into a record set with the given schema.
///
/// Values are coerced to each field's declared kind. Fields absent from
/// an object become `Null`; keys outside the schema are ignored.
pub fn load_json_records<P: AsRef<Path>>(
    path: P,
    name: &str,
    fields: Vec<FieldDef>,
) -> Result<RecordSet> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let reader = BufReader::new(file);

    let rows: Vec<JsonValue> =
        serde_json::from_reader(reader).with_context(|| "Failed to parse JSON file")?;

    RecordSet::from_json_objects(name, fields, &rows).map_err(|e| anyhow::anyhow!(e))
}

/// Load a CSV file with a header row into a record set with the given
/// schema. Header names are matched to schema fields by name, so column
/// order in the file does not matter. Schema fields with no matching
/// header load as `Null`; extra CSV columns are ignored.
pub fn load_csv_records<P: AsRef<Path>>(
    path: P,
    name: &str,
    fields: Vec<FieldDef>,
) -> Result<RecordSet> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers()?.clone();

    // Map each schema field to its position in the CSV, if present.
    let positions: Vec<Option<usize>> = fields
        .iter()
        .map(|field| headers.iter().position(|h| h == field.name))
        .collect();

    let mut set = RecordSet::new(name, fields);

    for result in reader.records() {
        let record = result?;
        let values = set
            .fields
            .iter()
            .zip(&positions)
            .map(|(field, pos)| match pos.and_then(|idx| record.get(idx)) {
                Some(raw) => FieldValue::parse(field.kind, raw),
                None => FieldValue::Null,
            })
            .collect();
        set.add_record(Record::new(values))
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(set)
}
