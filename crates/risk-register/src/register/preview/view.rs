use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use super::super::classifier::classify;
use super::super::domain::RiskLevel;
use super::super::surface::RegionContent;
use super::super::UNTITLED_PLACEHOLDER;

/// Substituted for an empty probability or impact field.
pub const DEFAULT_FIELD_VALUE: f64 = 3.0;

/// Form values after defaulting, ready for classification.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewInput {
    pub title: String,
    pub probability: f64,
    pub impact: f64,
}

impl PreviewInput {
    pub fn from_fields(title: Option<&str>, probability: Option<&str>, impact: Option<&str>) -> Self {
        let title = match title.map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => UNTITLED_PLACEHOLDER.to_string(),
        };

        Self {
            title,
            probability: numeric_field("probability", probability),
            impact: numeric_field("impact", impact),
        }
    }
}

fn numeric_field(name: &str, raw: Option<&str>) -> f64 {
    let value = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return DEFAULT_FIELD_VALUE,
    };

    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            debug!(field = name, value, "non-numeric preview input, using default");
            DEFAULT_FIELD_VALUE
        }
    }
}

/// View model for a single preview card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewView {
    pub title: String,
    pub probability: f64,
    pub impact: f64,
    pub score: f64,
    pub level: RiskLevel,
    pub level_class: &'static str,
}

impl PreviewView {
    pub fn build(input: &PreviewInput) -> Self {
        let classification = classify(input.probability, input.impact);
        Self {
            title: input.title.clone(),
            probability: input.probability,
            impact: input.impact,
            score: classification.score,
            level: classification.level,
            level_class: classification.level.css_class(),
        }
    }
}

pub trait PreviewRenderer {
    fn render(&self, view: &PreviewView) -> RegionContent;
}

/// Card fragment for HTML hosts. The title is escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPreviewRenderer;

impl PreviewRenderer for HtmlPreviewRenderer {
    fn render(&self, view: &PreviewView) -> RegionContent {
        let mut html = String::new();
        let class = view.level_class;

        let _ = writeln!(html, "<div class=\"risk-preview-card {class}\">");
        let _ = writeln!(html, "<h5>{}</h5>", escape_html(&view.title));
        let _ = writeln!(html, "<div class=\"d-flex justify-content-between\">");
        let _ = writeln!(html, "<span>Probability: {}/5</span>", view.probability);
        let _ = writeln!(html, "<span>Impact: {}/5</span>", view.impact);
        let _ = writeln!(html, "<span>Score: {}</span>", view.score);
        html.push_str("</div>\n");
        let _ = writeln!(
            html,
            "<div class=\"mt-2\"><span class=\"badge risk-badge {class}\">{}</span></div>",
            view.level
        );
        html.push_str("</div>");

        RegionContent::Html(html)
    }
}

/// One-line summary for terminals and logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPreviewRenderer;

impl PreviewRenderer for TextPreviewRenderer {
    fn render(&self, view: &PreviewView) -> RegionContent {
        RegionContent::Text(format!(
            "{} | probability {}/5 | impact {}/5 | score {} | {}",
            view.title, view.probability, view.impact, view.score, view.level
        ))
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_default_to_medium_untitled() {
        let input = PreviewInput::from_fields(Some(""), Some(""), None);
        let view = PreviewView::build(&input);

        assert_eq!(view.title, UNTITLED_PLACEHOLDER);
        assert_eq!(view.score, 9.0);
        assert_eq!(view.level, RiskLevel::Medium);
        assert_eq!(view.level_class, "medium");
    }

    #[test]
    fn explicit_zero_is_kept() {
        let input = PreviewInput::from_fields(Some("Flood"), Some("0"), Some("5"));
        let view = PreviewView::build(&input);
        assert_eq!(view.score, 0.0);
        assert_eq!(view.level, RiskLevel::Low);
    }

    #[test]
    fn garbage_numbers_fall_back_to_default() {
        let input = PreviewInput::from_fields(None, Some("lots"), Some("NaN"));
        assert_eq!(input.probability, DEFAULT_FIELD_VALUE);
        assert_eq!(input.impact, DEFAULT_FIELD_VALUE);
    }

    #[test]
    fn html_card_escapes_title_and_carries_level_class() {
        let input = PreviewInput::from_fields(Some("<script>x</script>"), Some("5"), Some("5"));
        let rendered = HtmlPreviewRenderer.render(&PreviewView::build(&input));

        let RegionContent::Html(html) = rendered else {
            panic!("expected html content");
        };
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("risk-preview-card critical"));
        assert!(html.contains("Score: 25"));
        assert!(html.contains(">CRITICAL</span>"));
    }

    #[test]
    fn text_summary_is_single_line() {
        let input = PreviewInput::from_fields(Some("Vendor lock-in"), Some("3"), Some("4"));
        let rendered = TextPreviewRenderer.render(&PreviewView::build(&input));
        assert_eq!(
            rendered,
            RegionContent::Text(
                "Vendor lock-in | probability 3/5 | impact 4/5 | score 12 | HIGH".to_string()
            )
        );
    }
}
