use crate::error::CliError;
use connectors::starrocks::{StreamLoadClient, transport::LoadTransport};
use engine_core::metrics::LoadMetricsSnapshot;
use model::{core::value::Value, records::row::Row};
use std::io::Read;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct InputOptions {
    pub delimiter: u8,
    pub has_header: bool,
}

pub fn parse_delimiter(raw: &str) -> Result<u8, CliError> {
    let raw = if raw == "\\t" { "\t" } else { raw };
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CliError::InvalidDelimiter(raw.to_string())),
    }
}

/// Feeds every input record through an opened client and closes it.
///
/// Empty input fields become nulls. On any failure the client is left as is
/// so its buffered rows can still be inspected.
pub fn load_rows<T: LoadTransport, R: Read>(
    client: &mut StreamLoadClient<T>,
    input: R,
    options: &InputOptions,
) -> Result<LoadMetricsSnapshot, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(input);

    let mut records = 0usize;
    for result in reader.records() {
        let record = result?;
        let row: Row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Value::Null
                } else {
                    Value::from(field)
                }
            })
            .collect();

        if let Err(err) = client.submit(&row) {
            error!(records, buffered = client.buffered_rows().len(), error = %err, "Aborting load");
            return Err(err.into());
        }
        records += 1;
    }

    client.close()?;
    info!(records, "Input exhausted");
    Ok(client.metrics().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::starrocks::{
        StreamLoadConfig, error::TransportError, request::LoadRequest, transport::LoadResponse,
    };
    use engine_core::metrics::MetricsRegistry;

    #[derive(Default)]
    struct RecordingTransport {
        bodies: Vec<String>,
    }

    impl LoadTransport for RecordingTransport {
        fn open(&mut self) -> Result<(), TransportError> {
            Ok(())
        }

        fn send(&mut self, request: &LoadRequest) -> Result<LoadResponse, TransportError> {
            self.bodies.push(request.body.clone());
            Ok(LoadResponse::new(
                200,
                format!(
                    r#"{{"Status":"Success","NumberLoadedRows":{}}}"#,
                    request.row_count
                ),
            ))
        }
    }

    fn client(batch_size: usize) -> StreamLoadClient<RecordingTransport> {
        let config = StreamLoadConfig::new(
            "fe:8030",
            "root",
            "",
            "db",
            "t",
            vec!["id".into(), "name".into()],
        )
        .with_batch_size(batch_size);
        let mut client =
            StreamLoadClient::with_transport(config, RecordingTransport::default()).unwrap();
        client.open(0, 1, &MetricsRegistry::new()).unwrap();
        client
    }

    #[test]
    fn test_load_rows_in_batches() {
        let mut client = client(2);
        let input = "id,name\n1,a\n2,\n3,c\n";
        let options = InputOptions {
            delimiter: b',',
            has_header: true,
        };

        let snapshot = load_rows(&mut client, input.as_bytes(), &options).unwrap();

        assert_eq!(client.transport().bodies, vec!["1\ta\n2\t", "3\tc"]);
        assert_eq!(snapshot.rows_sent, 3);
        assert_eq!(snapshot.rows_imported, 3);
    }

    #[test]
    fn test_load_without_header() {
        let mut client = client(10);
        let options = InputOptions {
            delimiter: b'|',
            has_header: false,
        };

        load_rows(&mut client, "7|x\n".as_bytes(), &options).unwrap();

        assert_eq!(client.transport().bodies, vec!["7\tx"]);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
