use serde::{Deserialize, Deserializer, Serialize};

/// Decoded body of a stream-load response.
///
/// HTTP 200 only means the frontend handled the request; this body says
/// whether the rows actually landed. Unknown fields are ignored and every
/// field is optional so newer server versions still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamLoadResult {
    pub txn_id: Option<i64>,
    pub label: Option<String>,
    pub status: Option<String>,
    pub existing_job_status: Option<String>,
    pub message: Option<String>,
    pub number_total_rows: Option<u64>,
    pub number_loaded_rows: Option<u64>,
    pub number_filtered_rows: Option<u64>,
    pub number_unselected_rows: Option<u64>,
    pub load_bytes: Option<u64>,
    pub load_time_ms: Option<u64>,
    /// Servers send either one URL or a list.
    #[serde(
        rename = "ErrorURL",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub error_urls: Vec<String>,
}

impl StreamLoadResult {
    pub const STATUS_SUCCESS: &'static str = "Success";

    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(Self::STATUS_SUCCESS)
    }

    pub fn loaded_rows(&self) -> u64 {
        self.number_loaded_rows.unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls,
    })
}
