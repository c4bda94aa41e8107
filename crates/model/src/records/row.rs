use crate::{core::value::Value, records::record::Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn get(&self, index: usize) -> Value {
        self.values.get(index).cloned().unwrap_or(Value::Null)
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Row::new(iter.into_iter().collect())
    }
}

impl Record for Row {
    fn arity(&self) -> usize {
        self.values.len()
    }

    fn field(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_record_view() {
        let row: Row = vec![Value::from(1), Value::from("a"), Value::Null].into();
        assert_eq!(row.arity(), 3);
        assert_eq!(row.field(1), Some(&Value::from("a")));
        assert_eq!(row.field(3), None);
        assert_eq!(row.get(3), Value::Null);
    }

    #[test]
    fn test_row_push() {
        let mut row = Row::default();
        row.push(7);
        row.push(Option::<&str>::None);
        assert_eq!(row.values, vec![Value::Int(7), Value::Null]);
    }
}
