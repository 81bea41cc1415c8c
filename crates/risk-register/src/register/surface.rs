//! Contract between the register core and whatever page hosts it.
//!
//! Identifiers are injected through [`PageBindings`] so the core can be driven by a
//! browser bridge, a terminal, or an in-memory fake in tests.

use std::fmt;

use super::domain::RiskId;

/// Region and field identifiers the core reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBindings {
    pub total_region: String,
    pub critical_region: String,
    pub high_region: String,
    pub medium_region: String,
    pub low_region: Option<String>,
    pub preview_region: String,
    pub title_field: String,
    pub probability_field: String,
    pub impact_field: String,
}

impl Default for PageBindings {
    fn default() -> Self {
        Self {
            total_region: "total-risks".to_string(),
            critical_region: "critical-risks".to_string(),
            high_region: "high-risks".to_string(),
            medium_region: "medium-risks".to_string(),
            low_region: None,
            preview_region: "risk-preview".to_string(),
            title_field: "title".to_string(),
            probability_field: "probability".to_string(),
            impact_field: "impact".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Text(String),
    Html(String),
}

impl RegionContent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) | Self::Html(value) => value,
        }
    }
}

pub trait DisplaySurface {
    fn has_region(&self, id: &str) -> bool;
    fn write_region(&mut self, id: &str, content: RegionContent);
}

pub trait FormSurface {
    fn has_form(&self) -> bool;
    /// Names of every input-capable element inside the form.
    fn input_names(&self) -> Vec<String>;
    fn field_value(&self, name: &str) -> Option<String>;
}

/// Blocking prompts and alerts shown to the person driving the page.
pub trait UserInteraction {
    fn confirm(&mut self, prompt: &str) -> bool;
    fn notify(&mut self, notice: Notice);
}

pub trait Navigator {
    fn current_view(&self) -> View;
    fn navigate(&mut self, view: View);
    fn reload(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Detail(RiskId),
    Create,
    Other(String),
}

impl View {
    pub fn path(&self) -> String {
        match self {
            Self::List => "/risks".to_string(),
            Self::Detail(id) => format!("/risk/{id}"),
            Self::Create => "/add-risk".to_string(),
            Self::Other(path) => path.clone(),
        }
    }

    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/risks" => Self::List,
            "/add-risk" => Self::Create,
            _ => trimmed
                .strip_prefix("/risk/")
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(|id| Self::Detail(RiskId(id)))
                .unwrap_or_else(|| Self::Other(path.to_string())),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this risk?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DeleteSucceeded,
    DeleteFailed,
    EditUnavailable,
    Created(RiskId),
    CreateFailed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::DeleteSucceeded => "Risk deleted successfully".to_string(),
            Self::DeleteFailed => "Error deleting the risk".to_string(),
            Self::EditUnavailable => {
                "Editing is still in development. Redirecting to create a new risk.".to_string()
            }
            Self::Created(id) => format!("Risk {id} created"),
            Self::CreateFailed(reason) => format!("Error creating the risk: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_paths_round_trip_through_the_navigation_contract() {
        assert_eq!(View::from_path("/risks"), View::List);
        assert_eq!(View::from_path("/risks/"), View::List);
        assert_eq!(View::from_path("/risk/7"), View::Detail(RiskId(7)));
        assert_eq!(View::from_path("/add-risk"), View::Create);
        assert_eq!(View::from_path("/"), View::Other("/".to_string()));
        assert_eq!(
            View::from_path("/risk/abc"),
            View::Other("/risk/abc".to_string())
        );
        assert_eq!(View::Detail(RiskId(12)).path(), "/risk/12");
    }

    #[test]
    fn notices_are_distinct() {
        let messages = [
            Notice::DeleteSucceeded.message(),
            Notice::DeleteFailed.message(),
            Notice::EditUnavailable.message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
