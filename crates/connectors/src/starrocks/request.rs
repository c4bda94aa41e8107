use crate::starrocks::{config::StreamLoadConfig, encoder::join_rows};
use model::core::identifiers::LoadLabel;

pub const LABEL_HEADER: &str = "label";
pub const COLUMNS_HEADER: &str = "columns";

/// One stream-load PUT, built from the buffered rows of a flush.
///
/// Built once per batch and re-sent unchanged on every attempt, label included.
#[derive(Clone)]
pub struct LoadRequest {
    pub url: String,
    pub username: String,
    pub password: String,
    pub label: LoadLabel,
    pub columns: String,
    pub body: String,
    pub row_count: usize,
}

impl LoadRequest {
    pub fn new(config: &StreamLoadConfig, label: LoadLabel, rows: &[String]) -> Self {
        Self {
            url: config.load_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            label,
            columns: config.columns_header(),
            body: join_rows(rows),
            row_count: rows.len(),
        }
    }
}

impl std::fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadRequest")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("label", &self.label)
            .field("columns", &self.columns)
            .field("row_count", &self.row_count)
            .field("body_bytes", &self.body.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_config() {
        let config = StreamLoadConfig::new(
            "fe:8030",
            "root",
            "pw",
            "db",
            "tbl",
            vec!["a".into(), "b".into(), "c".into()],
        );
        let rows = vec!["1\tx\t".to_string(), "2\ty\t".to_string()];
        let request = LoadRequest::new(&config, LoadLabel::from("batch-1"), &rows);

        assert_eq!(request.url, "http://fe:8030/api/db/tbl/_stream_load");
        assert_eq!(request.columns, "a,b,c");
        assert_eq!(request.body, "1\tx\t\n2\ty\t");
        assert_eq!(request.row_count, 2);
        assert_eq!(request.label.as_str(), "batch-1");
        assert!(!format!("{request:?}").contains("pw"));
    }
}
