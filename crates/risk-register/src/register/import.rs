//! Offline risk collections from CSV exports.

use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{RiskId, RiskLevel, RiskRecord};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read risk export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid risk CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("risk {id} has unknown level '{label}'")]
    Level { id: RiskId, label: String },
}

#[derive(Debug, Deserialize)]
struct RiskRow {
    id: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    probability: u8,
    impact: u8,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    risk_level: Option<String>,
}

pub struct RiskCsvImporter;

impl RiskCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RiskRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without a level get one from the classifier; a present level is kept as is.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RiskRecord>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<RiskRow>() {
            let row = row?;
            let id = RiskId(row.id);
            let record = RiskRecord::new(id, row.title, row.probability, row.impact);

            let record = match row.risk_level {
                Some(label) => {
                    let level = RiskLevel::from_label(&label)
                        .ok_or(ImportError::Level { id, label })?;
                    record.with_reported_level(level)
                }
                None => record,
            };

            records.push(record);
        }

        Ok(records)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn derives_missing_levels() {
        let csv = "id,title,probability,impact,risk_level\n1,Flood,5,5,\n2,,1,2,\n";
        let records = RiskCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level(), RiskLevel::Critical);
        assert_eq!(records[1].level(), RiskLevel::Low);
        assert_eq!(records[1].display_title(), "Untitled");
    }

    #[test]
    fn keeps_reported_levels() {
        let csv = "id,title,probability,impact,risk_level\n4,Fraud,1,1,HIGH\n";
        let records = RiskCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records[0].level(), RiskLevel::High);
        assert!(!records[0].is_consistent());
    }

    #[test]
    fn level_column_is_optional() {
        let csv = "id,title,probability,impact\n9,Churn,3,4\n";
        let records = RiskCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records[0].level(), RiskLevel::High);
    }

    #[test]
    fn rejects_unknown_levels() {
        let csv = "id,title,probability,impact,risk_level\n4,Fraud,1,1,severe\n";
        let error = RiskCsvImporter::from_reader(Cursor::new(csv)).expect_err("bad level");
        match error {
            ImportError::Level { id, label } => {
                assert_eq!(id, RiskId(4));
                assert_eq!(label, "severe");
            }
            other => panic!("expected level error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = RiskCsvImporter::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, ImportError::Io(_)));
    }
}
