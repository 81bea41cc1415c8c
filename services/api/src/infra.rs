use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use risk_register::register::{
    ApiError, RiskApi, RiskId, RiskRecord, RiskSubmission,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only register backed by a CSV export.
#[derive(Debug, Default, Clone)]
pub(crate) struct OfflineRiskApi {
    records: Vec<RiskRecord>,
}

impl OfflineRiskApi {
    pub(crate) fn new(records: Vec<RiskRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RiskApi for OfflineRiskApi {
    async fn list_risks(&self) -> Result<Vec<RiskRecord>, ApiError> {
        Ok(self.records.clone())
    }

    async fn fetch_risk(&self, id: RiskId) -> Result<RiskRecord, ApiError> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Unavailable(format!("risk {id} is not in the export")))
    }

    async fn create_risk(&self, _submission: &RiskSubmission) -> Result<RiskRecord, ApiError> {
        Err(ApiError::Unavailable("offline exports are read-only".to_string()))
    }

    async fn delete_risk(&self, _id: RiskId) -> Result<(), ApiError> {
        Err(ApiError::Unavailable("offline exports are read-only".to_string()))
    }
}

pub(crate) fn parse_scale(raw: &str) -> Result<u8, String> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (1..=5).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside the 1-5 scale"))
    }
}

pub(crate) fn parse_risk_id(raw: &str) -> Result<RiskId, String> {
    raw.trim()
        .parse::<u64>()
        .map(RiskId)
        .map_err(|err| format!("failed to parse '{raw}' as a risk id ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_values_are_bounded() {
        assert_eq!(parse_scale(" 4 "), Ok(4));
        assert!(parse_scale("0").is_err());
        assert!(parse_scale("6").is_err());
        assert!(parse_scale("three").is_err());
    }

    #[test]
    fn risk_ids_parse() {
        assert_eq!(parse_risk_id("7"), Ok(RiskId(7)));
        assert!(parse_risk_id("-1").is_err());
    }

    #[tokio::test]
    async fn offline_register_is_read_only() {
        let api = OfflineRiskApi::new(vec![RiskRecord::new(RiskId(1), None, 2, 2)]);
        assert_eq!(api.list_risks().await.expect("list").len(), 1);
        assert!(api.fetch_risk(RiskId(1)).await.is_ok());
        assert!(matches!(
            api.delete_risk(RiskId(1)).await,
            Err(ApiError::Unavailable(_))
        ));
    }
}
