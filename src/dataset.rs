//! Dataset loading.
//!
//! The record collection is read once from a static file: either a JSON
//! array of records or a CSV export with the same camelCase headers.

use crate::error::{InsightError, Result};
use crate::models::Record;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Supported dataset encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(DatasetFormat::Json),
            Some("csv") => Ok(DatasetFormat::Csv),
            _ => Err(InsightError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load all records from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let format = DatasetFormat::from_path(path)?;
    debug!("Loading {:?} dataset from {}", format, path.display());

    let file = fs::File::open(path)?;
    let records = match format {
        DatasetFormat::Json => parse_json(BufReader::new(file))?,
        // csv::Reader buffers internally
        DatasetFormat::Csv => parse_csv(file)?,
    };

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a JSON array of records.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Record>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a CSV document with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: Record = row?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const JSON_DATA: &str = r#"[
        {"accountNumber": "ACC-1", "age": 30, "companyName": "Acme", "productType": "SaaS",
         "states": "CA", "sizeOfCompany": "Large", "numberOfApiCalls": 100},
        {"accountNumber": "ACC-2", "age": 40, "companyName": "Globex", "productType": "AI/ML",
         "states": "TX", "sizeOfCompany": "Small", "numberOfApiCalls": 7}
    ]"#;

    const CSV_DATA: &str = "accountNumber,age,companyName,productType,states,sizeOfCompany,numberOfApiCalls
ACC-1,30,Acme,SaaS,CA,Large,100
ACC-2, 40 ,Globex,AI/ML,TX,Small,7
";

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/mock-data.json")).unwrap(),
            DatasetFormat::Json
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("export.CSV")).unwrap(),
            DatasetFormat::Csv
        );
        assert!(matches!(
            DatasetFormat::from_path(Path::new("data.xlsx")),
            Err(InsightError::UnsupportedFormat { .. })
        ));
        assert!(DatasetFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.json", JSON_DATA);

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_name, "Acme");
        assert_eq!(records[1].product_type, "AI/ML");
    }

    #[test]
    fn test_load_csv_matches_json() {
        let dir = TempDir::new().unwrap();
        let json_path = write_file(&dir, "data.json", JSON_DATA);
        let csv_path = write_file(&dir, "data.csv", CSV_DATA);

        let from_json = load_records(&json_path).unwrap();
        let from_csv = load_records(&csv_path).unwrap();
        assert_eq!(from_json, from_csv);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let records = parse_json("[]".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_field_is_error() {
        let result = parse_json(r#"[{"accountNumber": "ACC-1", "age": 30}]"#.as_bytes());
        assert!(matches!(result, Err(InsightError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_records(Path::new("/nonexistent/insightboard/data.json"));
        assert!(matches!(result, Err(InsightError::Io(_))));
    }
}
