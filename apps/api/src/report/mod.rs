//! Downloadable evaluation report.
//!
//! `compose_report` lays out the fixed report structure; `to_markdown` is the
//! only renderer. Layout:
//! 1. Section Check
//! 2. Formatting & Presentation (fixed policy) or Budget Clarity + Timeline Inclusion (reference)
//! 3. Overall Score
//! 4. Recommendations

pub mod handlers;

use serde::Serialize;

use crate::evaluation::{EvaluationMode, EvaluationResult};

pub const REPORT_TITLE: &str = "Proposal Evaluation Report";
pub const REPORT_FILE_NAME: &str = "proposal_evaluation.md";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.heading));
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

pub fn compose_report(result: &EvaluationResult) -> ReportDocument {
    let mut sections = vec![ReportSection {
        heading: "Section Check".to_string(),
        lines: result
            .sections
            .iter()
            .map(|s| {
                let status = if s.present { "Present" } else { "Missing" };
                format!("- {}: {}", s.label, status)
            })
            .collect(),
    }];

    match result.mode {
        EvaluationMode::FixedPolicy => sections.push(formatting_section(result)),
        EvaluationMode::ReferenceDerived => sections.extend(content_sections(result)),
    }

    sections.push(ReportSection {
        heading: "Overall Score".to_string(),
        lines: vec![format_score(result)],
    });

    let recommendations = if result.recommendations.is_empty() {
        vec!["All criteria met. Great job!".to_string()]
    } else {
        result
            .recommendations
            .iter()
            .map(|r| format!("- {r}"))
            .collect()
    };
    sections.push(ReportSection {
        heading: "Recommendations".to_string(),
        lines: recommendations,
    });

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        sections,
    }
}

fn formatting_section(result: &EvaluationResult) -> ReportSection {
    let mut lines = Vec::new();
    if let Some(formatting) = &result.formatting {
        if !formatting.spelling_checked {
            lines.push("Spelling was not checked: no dictionary is configured.".to_string());
        } else if formatting.spelling_issues.is_empty() {
            lines.push("No major spelling issues detected.".to_string());
        } else {
            lines.push("Spelling Issues Detected:".to_string());
            lines.push(formatting.spelling_issues.join(", "));
        }

        let policy = &formatting.policy;
        if !formatting.fonts_checked {
            lines.push(format!(
                "Font style and size were not checked ({}, size {}): the upload carries no run formatting.",
                policy.font_family, policy.body_font_size_pt
            ));
        } else if formatting.font_ok && formatting.font_size_ok {
            lines.push(format!(
                "Font style and size meet organizational standards ({}, size {}).",
                policy.font_family, policy.body_font_size_pt
            ));
        } else {
            lines.push(format!(
                "Font style does not match standard ({}) or font size is not {} in body text.",
                policy.font_family, policy.body_font_size_pt
            ));
        }
    }
    ReportSection {
        heading: "Formatting & Presentation".to_string(),
        lines,
    }
}

fn content_sections(result: &EvaluationResult) -> Vec<ReportSection> {
    let Some(content) = result.content else {
        return Vec::new();
    };
    let budget = if content.budget_ok {
        "Budget is stated with explicit figures."
    } else {
        "Budget is missing or has no explicit figures."
    };
    let timeline = if content.timeline_ok {
        "Timeline or dated milestones included."
    } else {
        "No timeline, schedule, or dates found."
    };
    vec![
        ReportSection {
            heading: "Budget Clarity".to_string(),
            lines: vec![budget.to_string()],
        },
        ReportSection {
            heading: "Timeline Inclusion".to_string(),
            lines: vec![timeline.to_string()],
        },
    ]
}

/// Whole numbers for the fixed rubric, two decimals for the reference rubric.
fn format_score(result: &EvaluationResult) -> String {
    match result.mode {
        EvaluationMode::FixedPolicy => format!("{:.0}%", result.score),
        EvaluationMode::ReferenceDerived => format!("{:.2}%", result.score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::spelling::{DictionarySpellChecker, PermissiveSpellChecker};
    use crate::evaluation::{
        EvaluationStrategy, FixedPolicyEvaluator, Proposal, ReferenceEvaluator,
        RequiredSectionSet, StylePolicy,
    };
    use crate::models::document::{Paragraph, ParagraphStyle, Run};
    use crate::models::Document;

    fn headings(report: &ReportDocument) -> Vec<&str> {
        report.sections.iter().map(|s| s.heading.as_str()).collect()
    }

    #[test]
    fn test_fixed_policy_report_layout() {
        let style = StylePolicy::default();
        let checker = DictionarySpellChecker::from_words(["introduction"]);
        let result = FixedPolicyEvaluator::new(&style, &checker).evaluate(
            &Proposal::from_text("Introduction".into()),
            &RequiredSectionSet::new(["Introduction", "Budget"]).unwrap(),
        );
        let report = compose_report(&result);

        assert_eq!(
            headings(&report),
            vec![
                "Section Check",
                "Formatting & Presentation",
                "Overall Score",
                "Recommendations"
            ]
        );
        assert_eq!(
            report.sections[0].lines,
            vec!["- Introduction: Present", "- Budget: Missing"]
        );
        assert_eq!(
            report.sections[1].lines,
            vec![
                "No major spelling issues detected.",
                "Font style and size were not checked (Tenorite, size 11): the upload carries no run formatting.",
            ]
        );
        // 0.5*50 + 25 + 50
        assert_eq!(report.sections[2].lines, vec!["100%"]);
        assert_eq!(
            report.sections[3].lines,
            vec!["- Missing sections: Budget"]
        );
    }

    #[test]
    fn test_formatted_upload_reports_font_verdict() {
        let style = StylePolicy::default();
        let document = Document::new(vec![Paragraph {
            text: "Budget".to_string(),
            style: ParagraphStyle::Body,
            runs: vec![Run {
                text: "Budget".to_string(),
                font_name: Some("Tenorite".to_string()),
                font_size_pt: Some(11.0),
            }],
        }]);
        let result = FixedPolicyEvaluator::new(&style, &PermissiveSpellChecker).evaluate(
            &Proposal::from_document(document),
            &RequiredSectionSet::new(["Budget"]).unwrap(),
        );
        let report = compose_report(&result);
        assert_eq!(
            report.sections[1].lines,
            vec![
                "Spelling was not checked: no dictionary is configured.",
                "Font style and size meet organizational standards (Tenorite, size 11).",
            ]
        );
    }

    #[test]
    fn test_reference_report_layout() {
        let result = ReferenceEvaluator.evaluate(
            &Proposal::from_text("1. Scope\nTimeline: Q1".into()),
            &RequiredSectionSet::new(["1. Scope"]).unwrap(),
        );
        let report = compose_report(&result);
        assert_eq!(
            headings(&report),
            vec![
                "Section Check",
                "Budget Clarity",
                "Timeline Inclusion",
                "Overall Score",
                "Recommendations"
            ]
        );
        assert_eq!(report.sections[3].lines, vec!["66.67%"]);
    }

    #[test]
    fn test_markdown_rendering() {
        let report = ReportDocument {
            title: REPORT_TITLE.to_string(),
            sections: vec![ReportSection {
                heading: "Recommendations".to_string(),
                lines: vec!["All criteria met. Great job!".to_string()],
            }],
        };
        assert_eq!(
            report.to_markdown(),
            "# Proposal Evaluation Report\n\n## Recommendations\n\nAll criteria met. Great job!\n"
        );
    }
}
