use serde::Serialize;

use super::classifier::classify;
use super::domain::RiskLevel;

const LOW_ACTIONS: &[&str] = &[
    "Monitor the risk periodically",
    "Document it in the risk register",
    "Review in quarterly meetings",
    "Keep under observation",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Assign a specific owner",
    "Define an action plan with deadlines",
    "Monitor the risk monthly",
    "Establish control indicators (KPIs)",
    "Report in monthly team meetings",
    "Evaluate preventive controls",
];

const HIGH_ACTIONS: &[&str] = &[
    "Immediate mitigation plan required",
    "Assign dedicated resources and budget",
    "Weekly monitoring with executive reports",
    "Report directly to management and stakeholders",
    "Define clear escalation triggers",
    "Evaluate risk transfer (insurance)",
    "Develop a detailed contingency plan",
];

const CRITICAL_ACTIONS: &[&str] = &[
    "Immediate action required",
    "Escalate to the crisis committee or board",
    "Allocate an emergency budget",
    "Daily monitoring with executive reports",
    "Activate the contingency plan immediately",
    "Keep all stakeholders continuously informed",
    "Consider avoiding the risk entirely",
    "Hold daily follow-up meetings",
];

const HIGH_PROBABILITY_ACTIONS: &[&str] = &[
    "Implement immediate preventive controls",
    "Increase monitoring frequency",
    "Train the team on emergency procedures",
];

const HIGH_IMPACT_ACTIONS: &[&str] = &[
    "Develop a detailed contingency plan",
    "Identify alternative resources",
    "Establish crisis communications",
];

const WORST_CASE_ACTIONS: &[&str] = &[
    "Activate the crisis protocol immediately",
    "Notify authorities where applicable",
    "Assign a dedicated full-time team",
];

const ROOT_CAUSE_SCORE_ABOVE: f64 = 15.0;

/// Advice derived from a probability/impact pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub level: RiskLevel,
    pub score: f64,
    pub urgency: &'static str,
    pub general: Vec<&'static str>,
    pub specific: Vec<&'static str>,
}

impl RecommendationSet {
    pub fn for_inputs(probability: u8, impact: u8) -> Self {
        let classification = classify(f64::from(probability), f64::from(impact));
        let level = classification.level;

        let mut specific = Vec::new();
        if probability >= 4 {
            specific.extend_from_slice(HIGH_PROBABILITY_ACTIONS);
        }
        if impact >= 4 {
            specific.extend_from_slice(HIGH_IMPACT_ACTIONS);
        }
        if classification.score > ROOT_CAUSE_SCORE_ABOVE {
            specific.push("Run a complete root cause analysis");
        }
        if probability == 5 && impact == 5 {
            specific.extend_from_slice(WORST_CASE_ACTIONS);
        }

        Self {
            level,
            score: classification.score,
            urgency: urgency(level),
            general: general_actions(level).to_vec(),
            specific,
        }
    }

    /// How soon the risk should be reviewed again.
    pub fn follow_up(&self) -> &'static str {
        match self.level {
            RiskLevel::Low => "30 days",
            RiskLevel::Medium => "15 days",
            RiskLevel::High => "7 days",
            RiskLevel::Critical => "24 hours",
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.general.iter().chain(self.specific.iter()).copied()
    }
}

fn general_actions(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => LOW_ACTIONS,
        RiskLevel::Medium => MEDIUM_ACTIONS,
        RiskLevel::High => HIGH_ACTIONS,
        RiskLevel::Critical => CRITICAL_ACTIONS,
    }
}

fn urgency(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low urgency",
        RiskLevel::Medium => "Moderate urgency",
        RiskLevel::High => "High urgency",
        RiskLevel::Critical => "Critical urgency",
    }
}
