use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::register::client::{ApiError, RiskApi};
use crate::register::domain::{RiskId, RiskRecord, RiskSubmission};
use crate::register::surface::{
    DisplaySurface, FormSurface, Navigator, Notice, RegionContent, UserInteraction, View,
};

/// In-memory stand-in for the remote register that records every request.
#[derive(Default)]
pub(super) struct FakeApi {
    records: Mutex<Vec<RiskRecord>>,
    failure: Option<u16>,
    requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(super) fn with_records(records: Vec<RiskRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub(super) fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Self::default()
        }
    }

    pub(super) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests mutex").clone()
    }

    pub(super) fn stored_ids(&self) -> Vec<RiskId> {
        self.records
            .lock()
            .expect("records mutex")
            .iter()
            .map(|record| record.id)
            .collect()
    }

    fn log(&self, request: String) -> Result<(), ApiError> {
        self.requests.lock().expect("requests mutex").push(request.clone());
        match self.failure {
            Some(status) => Err(ApiError::Status {
                status,
                url: request,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RiskApi for FakeApi {
    async fn list_risks(&self) -> Result<Vec<RiskRecord>, ApiError> {
        self.log("GET /risks/".to_string())?;
        Ok(self.records.lock().expect("records mutex").clone())
    }

    async fn fetch_risk(&self, id: RiskId) -> Result<RiskRecord, ApiError> {
        self.log(format!("GET /risks/{id}"))?;
        self.records
            .lock()
            .expect("records mutex")
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                url: format!("/risks/{id}"),
            })
    }

    async fn create_risk(&self, submission: &RiskSubmission) -> Result<RiskRecord, ApiError> {
        self.log("POST /risks/".to_string())?;
        let mut guard = self.records.lock().expect("records mutex");
        let next = guard.iter().map(|record| record.id.0).max().unwrap_or(0) + 1;
        let record = RiskRecord::new(
            RiskId(next),
            Some(submission.title.clone()),
            submission.probability,
            submission.impact,
        );
        guard.push(record.clone());
        Ok(record)
    }

    async fn delete_risk(&self, id: RiskId) -> Result<(), ApiError> {
        self.log(format!("DELETE /risks/{id}"))?;
        let mut guard = self.records.lock().expect("records mutex");
        let before = guard.len();
        guard.retain(|record| record.id != id);
        if guard.len() == before {
            return Err(ApiError::Status {
                status: 404,
                url: format!("/risks/{id}"),
            });
        }
        Ok(())
    }
}

/// Page double covering every host surface.
pub(super) struct MemoryPage {
    regions: BTreeMap<String, Option<RegionContent>>,
    form: Option<BTreeMap<String, String>>,
    view: View,
    confirm_answer: bool,
    pub(super) prompts: Vec<String>,
    pub(super) notices: Vec<Notice>,
    pub(super) navigations: Vec<View>,
    pub(super) reloads: usize,
    pub(super) writes: usize,
}

impl MemoryPage {
    pub(super) fn on(view: View) -> Self {
        Self {
            regions: BTreeMap::new(),
            form: None,
            view,
            confirm_answer: true,
            prompts: Vec::new(),
            notices: Vec::new(),
            navigations: Vec::new(),
            reloads: 0,
            writes: 0,
        }
    }

    pub(super) fn with_regions(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self.regions.insert((*id).to_string(), None);
        }
        self
    }

    pub(super) fn with_form(mut self, fields: &[(&str, &str)]) -> Self {
        self.form = Some(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        );
        self
    }

    pub(super) fn declining(mut self) -> Self {
        self.confirm_answer = false;
        self
    }

    pub(super) fn set_field(&mut self, name: &str, value: &str) {
        if let Some(form) = self.form.as_mut() {
            form.insert(name.to_string(), value.to_string());
        }
    }

    pub(super) fn content(&self, id: &str) -> Option<&str> {
        self.regions
            .get(id)
            .and_then(|content| content.as_ref())
            .map(RegionContent::as_str)
    }
}

impl DisplaySurface for MemoryPage {
    fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    fn write_region(&mut self, id: &str, content: RegionContent) {
        if let Some(slot) = self.regions.get_mut(id) {
            *slot = Some(content);
            self.writes += 1;
        }
    }
}

impl FormSurface for MemoryPage {
    fn has_form(&self) -> bool {
        self.form.is_some()
    }

    fn input_names(&self) -> Vec<String> {
        self.form
            .as_ref()
            .map(|form| form.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn field_value(&self, name: &str) -> Option<String> {
        self.form.as_ref().and_then(|form| form.get(name).cloned())
    }
}

impl UserInteraction for MemoryPage {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl Navigator for MemoryPage {
    fn current_view(&self) -> View {
        self.view.clone()
    }

    fn navigate(&mut self, view: View) {
        self.navigations.push(view.clone());
        self.view = view;
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

pub(super) fn sample_records() -> Vec<RiskRecord> {
    vec![
        RiskRecord::new(RiskId(1), Some("Data centre outage".to_string()), 5, 5),
        RiskRecord::new(RiskId(2), Some("Supplier insolvency".to_string()), 3, 4),
        RiskRecord::new(RiskId(3), Some("Key staff turnover".to_string()), 2, 3),
        RiskRecord::new(RiskId(7), Some("Office flooding".to_string()), 1, 2),
    ]
}

pub(super) const FORM_FIELDS: [&str; 3] = ["title", "probability", "impact"];

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
