use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow::util::pretty::pretty_format_batches_with_options;
use serde_json::Value as JsonValue;

use super::model::{Column, SemanticType, Table, Value};
use crate::error::{EdaError, Result};

/// Text shown for missing cells in printed tables.
pub(crate) const NULL_TEXT: &str = "null";

// ---------------------------------------------------------------------------
// Arrow → Table
// ---------------------------------------------------------------------------

/// Map an Arrow physical type onto the closed semantic tag set.
pub fn semantic_type_of(data_type: &DataType) -> SemanticType {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => SemanticType::Text,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => SemanticType::Integer,
        // u64 does not fit in i64
        DataType::UInt64
        | DataType::Float16
        | DataType::Float32
        | DataType::Float64 => SemanticType::Floating,
        DataType::Boolean => SemanticType::Boolean,
        _ => SemanticType::Unknown,
    }
}

impl Table {
    /// Build a table from an Arrow record batch.
    ///
    /// Integer widths up to `u32` are widened to `i64`; `u64` and float
    /// widths become `f64`, so no present value turns missing. Columns of any other
    /// Arrow type are kept as `Unknown`, holding their display text.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Table> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| column_from_array(field.name(), array))
            .collect::<Result<Vec<_>>>()?;
        Table::new(columns)
    }

    /// Convert the table into a single Arrow record batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .columns()
            .iter()
            .map(|c| Field::new(c.name(), arrow_type_of(c.dtype()), true))
            .collect();
        let arrays: Vec<ArrayRef> = self.columns().iter().map(array_from_column).collect();
        // explicit row count so a table without columns still converts
        let options = RecordBatchOptions::new().with_row_count(Some(self.row_count()));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            arrays,
            &options,
        )?)
    }

    /// Render the table as an ASCII grid, missing cells shown as `null`.
    pub fn to_pretty_string(&self) -> Result<String> {
        if self.column_count() == 0 {
            return Ok(String::new());
        }
        let batch = self.to_record_batch()?;
        let options = FormatOptions::default().with_null(NULL_TEXT);
        Ok(pretty_format_batches_with_options(&[batch], &options)?.to_string())
    }

    /// Approximate in-memory size in bytes, measured on the Arrow layout.
    pub fn memory_size(&self) -> Result<usize> {
        Ok(self.to_record_batch()?.get_array_memory_size())
    }
}

fn column_from_array(name: &str, array: &ArrayRef) -> Result<Column> {
    let dtype = semantic_type_of(array.data_type());
    let values: Vec<Value> = match dtype {
        SemanticType::Text => {
            let utf8 = cast(array.as_ref(), &DataType::Utf8)?;
            utf8.as_string::<i32>()
                .iter()
                .map(|v| v.map_or(Value::Null, |s| Value::Text(s.to_string())))
                .collect()
        }
        SemanticType::Integer => {
            let ints = cast(array.as_ref(), &DataType::Int64)?;
            ints.as_primitive::<Int64Type>()
                .iter()
                .map(Value::from)
                .collect()
        }
        SemanticType::Floating => {
            let floats = cast(array.as_ref(), &DataType::Float64)?;
            floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(Value::from)
                .collect()
        }
        SemanticType::Boolean => array.as_boolean().iter().map(Value::from).collect(),
        SemanticType::Unknown => {
            log::warn!(
                "column '{name}' has unsupported Arrow type {:?}; keeping it as unknown",
                array.data_type()
            );
            let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
            (0..array.len())
                .map(|row| {
                    if array.is_null(row) {
                        Value::Null
                    } else {
                        Value::Text(formatter.value(row).to_string())
                    }
                })
                .collect()
        }
    };
    log::trace!("converted column '{name}' ({dtype}, {} rows)", values.len());
    Column::new(name, dtype, values)
}

// ---------------------------------------------------------------------------
// Table → Arrow
// ---------------------------------------------------------------------------

fn arrow_type_of(dtype: SemanticType) -> DataType {
    match dtype {
        SemanticType::Integer => DataType::Int64,
        SemanticType::Floating => DataType::Float64,
        SemanticType::Boolean => DataType::Boolean,
        SemanticType::Text | SemanticType::Unknown => DataType::Utf8,
    }
}

fn array_from_column(col: &Column) -> ArrayRef {
    let values = col.values();
    match col.dtype() {
        SemanticType::Integer => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    Value::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect::<Int64Array>(),
        ),
        SemanticType::Floating => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    Value::Float(f) if !f.is_nan() => Some(*f),
                    _ => None,
                })
                .collect::<Float64Array>(),
        ),
        SemanticType::Boolean => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        SemanticType::Text | SemanticType::Unknown => Arc::new(
            values
                .iter()
                .map(|v| (!v.is_missing()).then(|| v.to_string()))
                .collect::<StringArray>(),
        ),
    }
}

// ---------------------------------------------------------------------------
// JSON records → Table
// ---------------------------------------------------------------------------

static JSON_NULL: JsonValue = JsonValue::Null;

impl Table {
    /// Build a table from records-oriented JSON:
    ///
    /// ```json
    /// [
    ///   { "id": 0, "category": "A", "score": 1.5 },
    ///   { "id": 1, "category": "B", "score": null }
    /// ]
    /// ```
    ///
    /// Columns appear in the order their keys are first met. A key absent
    /// from a record is a missing cell. Each column's type is inferred from
    /// its non-null values: all strings → text, all integers → integer, all
    /// numbers → floating, all booleans → boolean, anything else → unknown.
    pub fn from_json_records(root: &JsonValue) -> Result<Table> {
        let records = root
            .as_array()
            .ok_or_else(|| EdaError::InvalidRecords("expected a top-level array".into()))?;

        let mut names: Vec<String> = Vec::new();
        for (i, rec) in records.iter().enumerate() {
            let obj = rec
                .as_object()
                .ok_or_else(|| EdaError::InvalidRecords(format!("row {i} is not an object")))?;
            for key in obj.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                let cells: Vec<&JsonValue> = records
                    .iter()
                    .map(|rec| rec.get(name).unwrap_or(&JSON_NULL))
                    .collect();
                json_column(name, &cells)
            })
            .collect::<Result<Vec<_>>>()?;

        Table::new(columns)
    }

    /// Parse a JSON string of records; see [`Table::from_json_records`].
    pub fn from_json_str(text: &str) -> Result<Table> {
        let root: JsonValue = serde_json::from_str(text)?;
        Table::from_json_records(&root)
    }
}

fn infer_json_type(cells: &[&JsonValue]) -> SemanticType {
    let present: Vec<&&JsonValue> = cells.iter().filter(|v| !v.is_null()).collect();
    if present.is_empty() {
        return SemanticType::Unknown;
    }
    if present.iter().all(|v| v.is_string()) {
        SemanticType::Text
    } else if present.iter().all(|v| v.is_i64()) {
        SemanticType::Integer
    } else if present.iter().all(|v| v.is_number()) {
        SemanticType::Floating
    } else if present.iter().all(|v| v.is_boolean()) {
        SemanticType::Boolean
    } else {
        SemanticType::Unknown
    }
}

fn json_column(name: &str, cells: &[&JsonValue]) -> Result<Column> {
    let dtype = infer_json_type(cells);
    let values = cells
        .iter()
        .map(|cell| match (dtype, cell) {
            (_, JsonValue::Null) => Value::Null,
            (SemanticType::Floating, JsonValue::Number(n)) => Value::from(n.as_f64()),
            (_, other) => json_to_value(other),
        })
        .collect();
    Column::new(name, dtype, values)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Float32Array, Int32Array, UInt64Array};
    use serde_json::json;

    #[test]
    fn record_batch_types_map_onto_semantic_tags() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("i", DataType::Int32, true),
            Field::new("f", DataType::Float32, true),
            Field::new("s", DataType::Utf8, true),
            Field::new("b", DataType::Boolean, true),
            Field::new("d", DataType::Date32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(1), None])),
                Arc::new(Float32Array::from(vec![Some(0.5), Some(f32::NAN)])),
                Arc::new(StringArray::from(vec![Some("a"), None])),
                Arc::new(BooleanArray::from(vec![Some(true), Some(false)])),
                Arc::new(Date32Array::from(vec![Some(0), None])),
            ],
        )
        .unwrap();

        let table = Table::from_record_batch(&batch).unwrap();
        let types: Vec<SemanticType> = table.columns().iter().map(Column::dtype).collect();
        assert_eq!(
            types,
            vec![
                SemanticType::Integer,
                SemanticType::Floating,
                SemanticType::Text,
                SemanticType::Boolean,
                SemanticType::Unknown,
            ]
        );
        assert_eq!(table.column("i").unwrap().null_count(), 1);
        assert_eq!(table.column("f").unwrap().null_count(), 1);
        assert_eq!(
            table.column("d").unwrap().values()[0],
            Value::Text("1970-01-01".into())
        );
    }

    #[test]
    fn table_converts_back_to_arrow() {
        let table = Table::new(vec![
            Column::integer("id", [Some(1), Some(2)]),
            Column::text("name", [Some("a"), None]),
        ])
        .unwrap();
        let batch = table.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Int64);
        assert_eq!(batch.column(1).null_count(), 1);
        assert_eq!(Table::from_record_batch(&batch).unwrap(), table);
        assert!(table.memory_size().unwrap() > 0);
    }

    #[test]
    fn pretty_string_marks_missing_cells() {
        let table = Table::new(vec![Column::floating("x", [Some(1.5), None])]).unwrap();
        let text = table.to_pretty_string().unwrap();
        assert!(text.contains("| x"));
        assert!(text.contains("1.5"));
        assert!(text.contains("null"));
    }

    #[test]
    fn large_unsigned_values_stay_present() {
        let batch = RecordBatch::try_from_iter(vec![(
            "u",
            Arc::new(UInt64Array::from(vec![Some(u64::MAX), Some(1), None])) as ArrayRef,
        )])
        .unwrap();
        let table = Table::from_record_batch(&batch).unwrap();
        let col = table.column("u").unwrap();
        assert_eq!(col.dtype(), SemanticType::Floating);
        assert_eq!(col.null_count(), 1);
        assert_eq!(col.numeric_values(), vec![u64::MAX as f64, 1.0]);

        let profile = crate::summary::profile_columns(&table);
        assert_eq!(profile.rows()[0].missing, 1);
    }

    #[test]
    fn json_records_infer_column_types() {
        let root = json!([
            { "id": 1, "score": 1.5, "name": "a", "flag": true },
            { "id": 2, "score": 2, "flag": false, "extra": [1, 2] },
        ]);
        let table = Table::from_json_records(&root).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("id").unwrap().dtype(), SemanticType::Integer);
        assert_eq!(table.column("score").unwrap().dtype(), SemanticType::Floating);
        assert_eq!(table.column("score").unwrap().values()[1], Value::Float(2.0));
        assert_eq!(table.column("name").unwrap().null_count(), 1);
        assert_eq!(table.column("flag").unwrap().dtype(), SemanticType::Boolean);
        assert_eq!(table.column("extra").unwrap().dtype(), SemanticType::Unknown);
    }

    #[test]
    fn json_rejects_non_array_input() {
        assert!(matches!(
            Table::from_json_records(&json!({"a": 1})),
            Err(EdaError::InvalidRecords(_))
        ));
        assert!(matches!(
            Table::from_json_str("[1, 2]"),
            Err(EdaError::InvalidRecords(_))
        ));
        assert!(matches!(Table::from_json_str("not json"), Err(EdaError::Json(_))));
    }
}
