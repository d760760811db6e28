//! Paragraph/run model of an extracted proposal.
//!
//! Produced by the document model provider (a JSON-serialized `Document`) or
//! synthesized from plain extracted text. Read-only for the whole evaluation.

use serde::{Deserialize, Serialize};

/// Role of a paragraph within the document's style hierarchy.
///
/// Word style names ("Heading 1", "Normal", ...) are accepted as aliases so a
/// provider can forward `para.style.name` untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    #[serde(alias = "Heading 1", alias = "heading_1")]
    Heading1,
    #[serde(alias = "Heading 2", alias = "heading_2")]
    Heading2,
    #[serde(alias = "Heading 3", alias = "heading_3")]
    Heading3,
    #[serde(alias = "Normal", alias = "Body Text")]
    Body,
    #[default]
    Other,
}

impl ParagraphStyle {
    /// Heading levels 1–3 are exempt from the body font-size rule.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            ParagraphStyle::Heading1 | ParagraphStyle::Heading2 | ParagraphStyle::Heading3
        )
    }
}

/// A styled fragment of paragraph text.
///
/// `None` for either attribute means the value is inherited from the style or
/// theme and carries no opinion about policy compliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub font_size_pt: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: ParagraphStyle,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Builds a paragraph with no runs, i.e. fully inherited styling.
    pub fn plain(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            style,
            runs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Wraps extracted plain text: one body paragraph per line, no runs.
    pub fn from_plain_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| Paragraph::plain(line, ParagraphStyle::Body))
                .collect(),
        )
    }

    /// Concatenates paragraph texts, each terminated by a newline.
    pub fn flatten(&self) -> String {
        let mut text = String::with_capacity(
            self.paragraphs.iter().map(|p| p.text.len() + 1).sum(),
        );
        for para in &self.paragraphs {
            text.push_str(&para.text);
            text.push('\n');
        }
        text
    }

    /// Paragraph texts joined by newlines, without a trailing terminator.
    pub fn joined_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_plain_text_one_body_paragraph_per_line() {
        let doc = Document::from_plain_text("Introduction\nSome body text");
        assert_eq!(doc.paragraphs.len(), 2);
        assert!(doc
            .paragraphs
            .iter()
            .all(|p| p.style == ParagraphStyle::Body && p.runs.is_empty()));
    }

    #[test]
    fn test_flatten_terminates_every_paragraph() {
        let doc = Document::from_plain_text("a\nb");
        assert_eq!(doc.flatten(), "a\nb\n");
        assert_eq!(doc.joined_text(), "a\nb");
    }

    #[test]
    fn test_heading_roles() {
        assert!(ParagraphStyle::Heading1.is_heading());
        assert!(ParagraphStyle::Heading3.is_heading());
        assert!(!ParagraphStyle::Body.is_heading());
        assert!(!ParagraphStyle::Other.is_heading());
    }

    #[test]
    fn test_deserialize_word_style_names() {
        let json = r#"{
            "paragraphs": [
                {"text": "Budget", "style": "Heading 1"},
                {"text": "Costs", "style": "Normal",
                 "runs": [{"text": "Costs", "font_name": "Tenorite", "font_size_pt": 11.0}]},
                {"text": "x", "style": "heading_2"}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.paragraphs[0].style, ParagraphStyle::Heading1);
        assert_eq!(doc.paragraphs[1].style, ParagraphStyle::Body);
        assert_eq!(doc.paragraphs[2].style, ParagraphStyle::Heading2);
        assert_eq!(doc.paragraphs[1].runs[0].font_size_pt, Some(11.0));
    }

    #[test]
    fn test_missing_fields_default_to_no_opinion() {
        let doc: Document =
            serde_json::from_str(r#"{"paragraphs": [{"runs": [{"text": "hi"}]}]}"#).unwrap();
        let para = &doc.paragraphs[0];
        assert_eq!(para.style, ParagraphStyle::Other);
        assert_eq!(para.runs[0].font_name, None);
        assert_eq!(para.runs[0].font_size_pt, None);
    }
}
