//! View models and formatting shared by every view.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};

use crate::model::{AnswerResult, DocumentEntry};

/// One rendered row of the document table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    pub name: String,
    /// e.g. `"2.0 KB"`.
    pub size_label: String,
    /// Modification time in local time.
    pub modified_label: String,
}

impl DocumentRow {
    pub fn from_entry(entry: &DocumentEntry, datetime_format: &str) -> Self {
        Self {
            name: entry.name.clone(),
            size_label: format_size_kb(entry.size_bytes),
            modified_label: format_modified(entry.modified_at_epoch_seconds, datetime_format),
        }
    }
}

/// Size in KB with one decimal, ties rounded away from zero.
#[allow(clippy::cast_precision_loss)]
pub fn format_size_kb(bytes: u64) -> String {
    let tenths = (bytes as f64 / 1024.0 * 10.0).round();
    format!("{:.1} KB", tenths / 10.0)
}

/// Epoch seconds as local time. Falls back to RFC 3339 when the format
/// string is invalid and to the raw number when the timestamp is out of range.
pub fn format_modified(epoch_seconds: i64, datetime_format: &str) -> String {
    let Some(local) = Local.timestamp_opt(epoch_seconds, 0).single() else {
        return epoch_seconds.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", local.format(datetime_format)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// Score fixed to three decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.3}")
}

/// Canonical structured layout of an answer.
///
/// Header (article), metadata (source, page), optional summary, excerpt
/// block, optional score. Sections whose field the backend omitted are
/// left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCard {
    pub article: String,
    pub source: String,
    pub page: Option<String>,
    pub summary: Option<String>,
    pub excerpt: String,
    pub score: Option<String>,
}

impl From<&AnswerResult> for AnswerCard {
    fn from(answer: &AnswerResult) -> Self {
        Self {
            article: answer.articulo.clone(),
            source: answer.fuente.clone(),
            page: answer.pagina.as_ref().map(ToString::to_string),
            summary: answer
                .respuesta
                .as_ref()
                .filter(|s| !s.trim().is_empty())
                .cloned(),
            excerpt: answer.fragmento_original.clone(),
            score: answer.score.map(format_score),
        }
    }
}

impl AnswerCard {
    /// The metadata line, e.g. `"Source: Contract A · Page 4"`.
    pub fn metadata_line(&self) -> String {
        match &self.page {
            Some(page) => format!("Source: {} · Page {page}", self.source),
            None => format!("Source: {}", self.source),
        }
    }

    /// Plain-text rendering, one section per line.
    pub fn plain_text(&self) -> String {
        let mut out = format!("{}\n{}\n", self.article, self.metadata_line());
        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "Summary: {summary}");
        }
        let _ = writeln!(out, "Excerpt:\n{}", self.excerpt);
        if let Some(score) = &self.score {
            let _ = writeln!(out, "Score: {score}");
        }
        out
    }
}

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// CSS class of the entry.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "usuario",
            Self::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    Text(String),
    Answer(AnswerCard),
}

/// One message of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub body: EntryBody,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            body: EntryBody::Text(text.into()),
        }
    }

    pub fn bot(card: AnswerCard) -> Self {
        Self {
            role: Role::Bot,
            body: EntryBody::Answer(card),
        }
    }

    pub fn plain_text(&self) -> String {
        match &self.body {
            EntryBody::Text(text) => text.clone(),
            EntryBody::Answer(card) => card.plain_text(),
        }
    }
}
