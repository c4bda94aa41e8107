use model::{core::value::Value, records::record::Record};

pub const COLUMN_DELIMITER: &str = "\t";
pub const ROW_DELIMITER: &str = "\n";

/// Renders records as the delimited text rows carried in a load body.
///
/// Values are written as-is: no quoting and no escaping of embedded
/// delimiters, so string fields must not contain tabs or newlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireRowEncoder;

impl WireRowEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_record<R: Record + ?Sized>(&self, record: &R) -> String {
        let mut row = String::new();
        for idx in 0..record.arity() {
            if idx > 0 {
                row.push_str(COLUMN_DELIMITER);
            }
            match record.field(idx) {
                Some(value) => row.push_str(&self.encode_value(value)),
                None => row.push_str(&self.encode_null()),
            }
        }
        row
    }

    pub fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.encode_null(),
            Value::String(s) => s.clone(),
            Value::Json(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => ryu::Buffer::new().format(*v).to_string(),
            Value::Uuid(v) => v.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        }
    }

    /// Null is an empty field.
    pub fn encode_null(&self) -> String {
        String::new()
    }
}

/// Joins wire rows into one load body.
pub fn join_rows(rows: &[String]) -> String {
    rows.join(ROW_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use model::records::row::Row;

    #[test]
    fn test_null_renders_empty() {
        let encoder = WireRowEncoder::new();
        let record = vec![Value::from(1), Value::from("a"), Value::Null];
        assert_eq!(encoder.encode_record(&record), "1\ta\t");
    }

    #[test]
    fn test_row_and_slice_encode_the_same() {
        let encoder = WireRowEncoder::new();
        let values = [Value::from(7u64), Value::from(false), Value::from(2.5)];
        let row: Row = values.to_vec().into();
        assert_eq!(encoder.encode_record(&row), "7\tfalse\t2.5");
        assert_eq!(encoder.encode_record(&values[..]), "7\tfalse\t2.5");
    }

    #[test]
    fn test_temporal_values() {
        let encoder = WireRowEncoder::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(encoder.encode_value(&Value::Date(date)), "2024-03-09");
        assert_eq!(encoder.encode_value(&Value::Timestamp(ts)), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_json_value_is_compact() {
        let encoder = WireRowEncoder::new();
        let value = Value::Json(serde_json::json!({"k": [1, 2]}));
        assert_eq!(encoder.encode_value(&value), r#"{"k":[1,2]}"#);
    }

    #[test]
    fn test_empty_record() {
        let encoder = WireRowEncoder::new();
        assert_eq!(encoder.encode_record(&Row::default()), "");
    }

    #[test]
    fn test_join_rows() {
        let rows = vec!["1\ta".to_string(), "2\tb".to_string()];
        assert_eq!(join_rows(&rows), "1\ta\n2\tb");
        assert_eq!(join_rows(&[]), "");
    }
}
