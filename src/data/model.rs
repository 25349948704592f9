use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};

// ---------------------------------------------------------------------------
// SemanticType – the closed set of column type tags
// ---------------------------------------------------------------------------

/// Column type tag assigned when a [`Table`] is built.
///
/// Classification and the summarizers only ever look at this tag, never at
/// the physical type the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Text,
    Integer,
    Floating,
    Boolean,
    Unknown,
}

impl SemanticType {
    /// Integer and floating columns are numeric; everything else is not.
    pub fn is_numeric(self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Floating)
    }

    /// Whether a value may be stored in a column of this type.
    /// Missing markers fit anywhere.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (SemanticType::Unknown, _) => true,
            (SemanticType::Text, Value::Text(_)) => true,
            (SemanticType::Integer, Value::Integer(_)) => true,
            (SemanticType::Floating, Value::Float(_)) => true,
            (SemanticType::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Floating => "floating",
            SemanticType::Boolean => "boolean",
            SemanticType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
///
/// `Float(NaN)` counts as missing, same as `Null`: the two compare and hash
/// equal. Equality, ordering and hashing also fold `-0.0` into `0.0`, so
/// values can be counted in hash maps and sorted consistently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

fn canonical(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Variant rank used for ordering and hashing; every missing value ranks as `Null`.
fn rank(v: &Value) -> u8 {
    match v {
        _ if v.is_missing() => 0,
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Integer(_) => 2,
        Value::Float(_) => 3,
        Value::Text(_) => 4,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Text(a), Text(b)) => a.cmp(b),
            // both missing
            _ => Ordering::Equal,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        rank(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) if !f.is_nan() => canonical(*f).to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Float(_) | Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Value::Null, Value::Integer)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(x) if !x.is_nan() => Value::Float(x),
            _ => Value::Null,
        }
    }
}

impl From<Option<bool>> for Value {
    fn from(v: Option<bool>) -> Self {
        v.map_or(Value::Null, Value::Bool)
    }
}

// ---------------------------------------------------------------------------
// Column – a named, typed sequence of values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: SemanticType,
    values: Vec<Value>,
}

impl Column {
    /// Build a column, checking every value against `dtype`.
    pub fn new(name: impl Into<String>, dtype: SemanticType, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        if let Some((row, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !dtype.accepts(v))
        {
            return Err(EdaError::TypeMismatch {
                column: name,
                expected: dtype.to_string(),
                row,
                found: bad.kind().to_string(),
            });
        }
        Ok(Column {
            name,
            dtype,
            values,
        })
    }

    pub fn integer<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        Self::typed(name, SemanticType::Integer, values)
    }

    /// NaN inputs are stored as missing.
    pub fn floating<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self::typed(name, SemanticType::Floating, values)
    }

    pub fn boolean<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        Self::typed(name, SemanticType::Boolean, values)
    }

    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Column {
            name: name.into(),
            dtype: SemanticType::Text,
            values: values
                .into_iter()
                .map(|v| v.map_or(Value::Null, |s| Value::Text(s.into())))
                .collect(),
        }
    }

    fn typed<I, T>(name: impl Into<String>, dtype: SemanticType, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Column {
            name: name.into(),
            dtype,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> SemanticType {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Iterate over the non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Count of distinct non-missing values.
    pub fn cardinality(&self) -> usize {
        self.present().collect::<HashSet<_>>().len()
    }

    /// Non-missing values as `f64`, in row order. Empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.present().filter_map(Value::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Table – ordered, equal-length columns
// ---------------------------------------------------------------------------

/// An immutable table of named, typed, equal-length columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table. All columns must have the same length and distinct names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut seen: HashSet<&str> = HashSet::new();

        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(EdaError::DuplicateColumn(col.name().to_string()));
            }
            if col.len() != row_count {
                return Err(EdaError::LengthMismatch {
                    column: col.name().to_string(),
                    expected: row_count,
                    actual: col.len(),
                });
            }
        }

        Ok(Table { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// The cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    /// Keep only the given rows, in the given order.
    pub fn take(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                dtype: c.dtype,
                values: indices
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect(),
            })
            .collect();
        Table {
            columns,
            row_count: indices.iter().filter(|&&i| i < self.row_count).count(),
        }
    }
}
