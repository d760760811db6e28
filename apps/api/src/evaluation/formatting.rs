use serde::{Deserialize, Serialize};

use crate::models::Document;

/// House style a proposal's explicit run formatting must follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePolicy {
    /// Required font family for all text, compared ignoring case.
    pub font_family: String,
    /// Required size for non-heading text, in points.
    pub body_font_size_pt: f32,
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self {
            font_family: "Tenorite".to_string(),
            body_font_size_pt: 11.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontAudit {
    pub font_ok: bool,
    pub font_size_ok: bool,
    /// At least one run carried an explicit family or size. When false the
    /// two flags above are vacuously true.
    pub runs_checked: bool,
}

/// Checks every run against `policy`.
///
/// Runs without an explicit family or size inherit them and are never flagged.
/// Headings 1–3 are exempt from the size rule only.
pub fn audit_fonts(document: &Document, policy: &StylePolicy) -> FontAudit {
    let required_font = policy.font_family.to_lowercase();
    let mut audit = FontAudit {
        font_ok: true,
        font_size_ok: true,
        runs_checked: false,
    };

    for para in &document.paragraphs {
        for run in &para.runs {
            if run.font_name.is_some() || run.font_size_pt.is_some() {
                audit.runs_checked = true;
            }
            if let Some(name) = run.font_name.as_deref() {
                if name.to_lowercase() != required_font {
                    audit.font_ok = false;
                }
            }
            if let Some(size) = run.font_size_pt {
                if !para.style.is_heading() && (size - policy.body_font_size_pt).abs() > 0.01 {
                    audit.font_size_ok = false;
                }
            }
            if !audit.font_ok && !audit.font_size_ok {
                return audit;
            }
        }
    }

    audit
}
