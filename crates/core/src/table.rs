//! Columnar result tables
//!
//! Indicator output is a small table: named columns of equal length, one
//! row per raster layer (or per land-cover class and year). Tables are
//! created fresh per call and handed back to the caller; nothing here is
//! retained or shared.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// String view of the value, if it has one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Date view of the value, if it has one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

/// A named column
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    /// Numeric view of the column; non-numeric cells become NaN
    pub fn as_f64(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

/// A table of named columns with equal row counts.
///
/// Column order is part of the contract: statistics columns keep the
/// caller's requested order, and metadata columns sit where each
/// indicator places them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Number of rows (0 for a table with no columns)
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Append a column; its length must match the table's row count
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.nrows() {
            return Err(Error::ColumnLength {
                name,
                got: values.len(),
                expected: self.nrows(),
            });
        }
        self.columns.push(Column::new(name, values));
        Ok(())
    }

    /// Append a float column
    pub fn push_floats(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        self.push_column(name, values.into_iter().map(Value::from).collect())
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column by name or fail
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Value at (row, column name)
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Rewrite a column in place; `f` receives the row index and the
    /// current value
    pub fn map_column(
        &mut self,
        name: &str,
        mut f: impl FnMut(usize, &Value) -> Value,
    ) -> Result<()> {
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        for (row, value) in col.values.iter_mut().enumerate() {
            *value = f(row, value);
        }
        Ok(())
    }

    /// Move the named columns to the front of the table, in the given order
    pub fn move_front(&mut self, names: &[&str]) -> Result<()> {
        for &name in names.iter().rev() {
            let idx = self
                .columns
                .iter()
                .position(|c| c.name == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
            let col = self.columns.remove(idx);
            self.columns.insert(0, col);
        }
        Ok(())
    }

    /// Concatenate tables row-wise.
    ///
    /// All tables must share the same column names in the same order.
    pub fn vstack(tables: impl IntoIterator<Item = Table>) -> Result<Table> {
        let mut iter = tables.into_iter();
        let Some(mut out) = iter.next() else {
            return Ok(Table::new());
        };

        for table in iter {
            if table.names() != out.names() {
                return Err(Error::Other(format!(
                    "cannot concatenate tables with columns {:?} and {:?}",
                    out.names(),
                    table.names()
                )));
            }
            for (dst, src) in out.columns.iter_mut().zip(table.columns) {
                dst.values.extend(src.values);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new();
        t.push_floats("mean", vec![1.0, 2.0]).unwrap();
        t.push_column("name", vec![Value::from("a"), Value::from("b")])
            .unwrap();
        t
    }

    #[test]
    fn test_push_column_length_check() {
        let mut t = sample();
        let err = t.push_floats("bad", vec![1.0]).unwrap_err();
        assert!(format!("{err}").contains("1 rows"));
    }

    #[test]
    fn test_map_column_by_row() {
        let mut t = sample();
        let factors = [10.0, 2.0];
        t.map_column("mean", |row, v| {
            Value::Float(v.as_f64().unwrap() / factors[row])
        })
        .unwrap();

        assert_eq!(t.get(0, "mean"), Some(&Value::Float(0.1)));
        assert_eq!(t.get(1, "mean"), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_move_front() {
        let mut t = sample();
        t.move_front(&["name"]).unwrap();
        assert_eq!(t.names(), vec!["name", "mean"]);

        assert!(t.move_front(&["missing"]).is_err());
    }

    #[test]
    fn test_vstack() {
        let stacked = Table::vstack([sample(), sample()]).unwrap();
        assert_eq!(stacked.nrows(), 4);
        assert_eq!(stacked.names(), vec!["mean", "name"]);
    }

    #[test]
    fn test_vstack_mismatched_columns() {
        let mut other = Table::new();
        other.push_floats("sum", vec![1.0]).unwrap();
        assert!(Table::vstack([sample(), other]).is_err());
    }
}
