//! Evaluation strategies.
//!
//! `FixedPolicyEvaluator` checks the organizational checklist per paragraph,
//! plus fonts and spelling. `ReferenceEvaluator` checks a mined checklist
//! against the flattened text, plus budget and timeline evidence. The two
//! rubrics round and weight differently and must stay separate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::evaluation::budget_timeline::{audit_content, ContentChecks};
use crate::evaluation::formatting::{audit_fonts, StylePolicy};
use crate::evaluation::scoring::{
    fixed_policy_total, flag_score, reference_percentage, section_percentage, spelling_score,
    ScoreBreakdown, SCORE_CEILING,
};
use crate::evaluation::sections::{
    match_by_paragraph, match_in_text, missing_labels, present_count, SectionPresence,
};
use crate::evaluation::spelling::{audit_spelling, SpellChecker};
use crate::evaluation::standards::RequiredSectionSet;
use crate::models::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    FixedPolicy,
    ReferenceDerived,
}

/// A proposal in both representations the auditors consume.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub document: Document,
    /// Flattened text; for structured uploads this is `document.flatten()`.
    pub text: String,
}

impl Proposal {
    pub fn from_document(document: Document) -> Self {
        let text = document.flatten();
        Self { document, text }
    }

    pub fn from_text(text: String) -> Self {
        Self {
            document: Document::from_plain_text(&text),
            text,
        }
    }
}

/// Fonts and spelling findings of a fixed-policy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingVerdict {
    pub font_ok: bool,
    pub font_size_ok: bool,
    /// False when no run carried explicit formatting (text and PDF uploads).
    pub fonts_checked: bool,
    pub spelling_issues: Vec<String>,
    pub unknown_token_count: usize,
    /// False when no dictionary was configured.
    pub spelling_checked: bool,
    pub policy: StylePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: Uuid,
    pub mode: EvaluationMode,
    pub sections: Vec<SectionPresence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentChecks>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
}

/// One scoring rubric. Implementations are pure over their inputs.
pub trait EvaluationStrategy {
    fn mode(&self) -> EvaluationMode;

    fn evaluate(&self, proposal: &Proposal, sections: &RequiredSectionSet) -> EvaluationResult;
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed-policy rubric
// ────────────────────────────────────────────────────────────────────────────

pub struct FixedPolicyEvaluator<'a> {
    pub style: &'a StylePolicy,
    pub spell_checker: &'a dyn SpellChecker,
}

impl<'a> FixedPolicyEvaluator<'a> {
    pub fn new(style: &'a StylePolicy, spell_checker: &'a dyn SpellChecker) -> Self {
        Self {
            style,
            spell_checker,
        }
    }
}

impl EvaluationStrategy for FixedPolicyEvaluator<'_> {
    fn mode(&self) -> EvaluationMode {
        EvaluationMode::FixedPolicy
    }

    fn evaluate(&self, proposal: &Proposal, sections: &RequiredSectionSet) -> EvaluationResult {
        debug_assert!(!sections.is_empty());
        let evaluation_id = Uuid::new_v4();
        let document = &proposal.document;

        let presence = match_by_paragraph(document, sections);
        let fonts = audit_fonts(document, self.style);
        let spelling = audit_spelling(&document.joined_text(), self.spell_checker);
        debug!(
            %evaluation_id,
            present = present_count(&presence),
            required = sections.len(),
            font_ok = fonts.font_ok,
            font_size_ok = fonts.font_size_ok,
            fonts_checked = fonts.runs_checked,
            unknown_tokens = spelling.unknown_count,
            spell_checker = self.spell_checker.backend(),
            "fixed-policy audits complete"
        );

        let section_pct = section_percentage(present_count(&presence), sections.len());
        let spelling_pts = spelling_score(spelling.unknown_count);
        let style_pts = flag_score(fonts.font_ok);
        let size_pts = flag_score(fonts.font_size_ok);
        let raw_total = fixed_policy_total(section_pct, spelling_pts, style_pts, size_pts);
        let score = raw_total.min(SCORE_CEILING);

        let formatting = FormattingVerdict {
            font_ok: fonts.font_ok,
            font_size_ok: fonts.font_size_ok,
            fonts_checked: fonts.runs_checked,
            spelling_issues: spelling.misspelled,
            unknown_token_count: spelling.unknown_count,
            spelling_checked: spelling.checked,
            policy: self.style.clone(),
        };
        let recommendations = fixed_policy_recommendations(&presence, &formatting);

        info!(%evaluation_id, score, raw_total, "fixed-policy evaluation complete");

        EvaluationResult {
            evaluation_id,
            mode: self.mode(),
            sections: presence,
            formatting: Some(formatting),
            content: None,
            score,
            breakdown: ScoreBreakdown::FixedPolicy {
                section_percentage: section_pct,
                spelling_score: spelling_pts,
                font_style_score: style_pts,
                font_size_score: size_pts,
                raw_total,
            },
            recommendations,
            evaluated_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reference-derived rubric
// ────────────────────────────────────────────────────────────────────────────

pub struct ReferenceEvaluator;

impl EvaluationStrategy for ReferenceEvaluator {
    fn mode(&self) -> EvaluationMode {
        EvaluationMode::ReferenceDerived
    }

    fn evaluate(&self, proposal: &Proposal, sections: &RequiredSectionSet) -> EvaluationResult {
        debug_assert!(!sections.is_empty());
        let evaluation_id = Uuid::new_v4();

        let presence = match_in_text(&proposal.text, sections);
        let content = audit_content(&proposal.text);
        let present = present_count(&presence);
        debug!(
            %evaluation_id,
            present,
            required = sections.len(),
            budget_ok = content.budget_ok,
            timeline_ok = content.timeline_ok,
            "reference audits complete"
        );

        let score = reference_percentage(
            present,
            sections.len(),
            content.budget_ok,
            content.timeline_ok,
        );
        let recommendations = reference_recommendations(&presence, &content);

        info!(%evaluation_id, score, "reference-derived evaluation complete");

        EvaluationResult {
            evaluation_id,
            mode: self.mode(),
            sections: presence,
            formatting: None,
            content: Some(content),
            score,
            breakdown: ScoreBreakdown::ReferenceDerived {
                present_sections: present,
                budget_ok: content.budget_ok,
                timeline_ok: content.timeline_ok,
                max_score: sections.len() + 2,
            },
            recommendations,
            evaluated_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

fn missing_sections_recommendation(presence: &[SectionPresence]) -> Option<String> {
    let missing = missing_labels(presence);
    (!missing.is_empty()).then(|| format!("Missing sections: {}", missing.join(", ")))
}

/// Order: missing sections, spelling, font family, font size.
fn fixed_policy_recommendations(
    presence: &[SectionPresence],
    formatting: &FormattingVerdict,
) -> Vec<String> {
    let mut recommendations: Vec<String> = missing_sections_recommendation(presence)
        .into_iter()
        .collect();
    if formatting.unknown_token_count > 0 {
        recommendations.push("Spelling issues found in the document.".to_string());
    }
    if !formatting.font_ok {
        recommendations.push(format!(
            "Document should use font '{}' throughout.",
            formatting.policy.font_family
        ));
    }
    if !formatting.font_size_ok {
        recommendations.push(format!(
            "Body text should use font size {}.",
            formatting.policy.body_font_size_pt
        ));
    }
    recommendations
}

/// Order: budget, timeline, missing sections.
fn reference_recommendations(presence: &[SectionPresence], content: &ContentChecks) -> Vec<String> {
    let mut recommendations = Vec::new();
    if !content.budget_ok {
        recommendations.push(
            "Budget is unclear: state the budget with explicit figures (e.g. $5,000 or an itemized cost breakdown)."
                .to_string(),
        );
    }
    if !content.timeline_ok {
        recommendations.push(
            "No timeline found: include a schedule, work plan, or dated milestones.".to_string(),
        );
    }
    recommendations.extend(missing_sections_recommendation(presence));
    recommendations
}
