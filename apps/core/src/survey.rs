//! Survey CSV aggregation.
//!
//! Reads a Google Forms style export. Two columns are understood, both
//! optional:
//! - `Rate your overall mood (1–5)`: averaged and bucketed into 5 bins
//! - `What are you struggling with lately?`: reduced to keyword frequencies
//!
//! Drawing the histogram or word cloud is left to the caller.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::brain::{KeywordExtractor, KeywordResult};
use crate::chat::markdown::cell;
use crate::error::AppError;

pub const MOOD_COLUMN: &str = "Rate your overall mood (1–5)";
pub const STRUGGLE_COLUMN: &str = "What are you struggling with lately?";
pub const PREVIEW_ROWS: usize = 5;

/// En dash and hyphen are treated alike when matching headers
fn normalize_header(header: &str) -> String {
    header.trim().replace('\u{2013}', "-").to_lowercase()
}

/// Mood score statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    pub average: f64,
    /// Counts for scores 1..=5
    pub distribution: [usize; 5],
    pub responses: usize,
    /// Cells that were blank, non-numeric or outside 1..=5
    pub skipped: usize,
}

/// Aggregated view of one survey export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub headers: Vec<String>,
    pub row_count: usize,
    /// First rows, as read
    pub preview: Vec<Vec<String>>,
    /// `None` only when the mood column is absent
    pub mood: Option<MoodStats>,
    /// Word-cloud input; `None` when the column is absent
    pub concerns: Option<Vec<KeywordResult>>,
}

impl SurveySummary {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        info!("Reading survey file: {:?}", path);
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::Survey("survey file has no header row".to_string()));
        }

        let find = |name: &str| {
            let wanted = normalize_header(name);
            headers.iter().position(|h| normalize_header(h) == wanted)
        };
        let mood_col = find(MOOD_COLUMN);
        let struggle_col = find(STRUGGLE_COLUMN);

        let mut row_count = 0;
        let mut preview = Vec::new();
        let mut mood_sum = 0.0;
        let mut distribution = [0usize; 5];
        let mut mood_responses = 0;
        let mut mood_skipped = 0;
        let mut answers: Vec<String> = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            row_count += 1;
            if preview.len() < PREVIEW_ROWS {
                preview.push(record.iter().map(|f| f.to_string()).collect());
            }

            if let Some(col) = mood_col {
                match record.get(col).and_then(|v| v.parse::<f64>().ok()) {
                    Some(score) if (1.0..=5.0).contains(&score) => {
                        mood_sum += score;
                        mood_responses += 1;
                        let bin = (score.round() as usize).clamp(1, 5) - 1;
                        distribution[bin] += 1;
                    }
                    _ => mood_skipped += 1,
                }
            }

            if let Some(col) = struggle_col {
                if let Some(answer) = record.get(col).filter(|a| !a.is_empty()) {
                    answers.push(answer.to_string());
                }
            }
        }

        if mood_skipped > 0 {
            warn!("Skipped {} unusable mood cells", mood_skipped);
        }

        let mood = mood_col.map(|_| MoodStats {
            average: if mood_responses > 0 {
                mood_sum / mood_responses as f64
            } else {
                0.0
            },
            distribution,
            responses: mood_responses,
            skipped: mood_skipped,
        });

        let concerns = struggle_col.map(|_| KeywordExtractor::new().extract(&answers));

        info!(
            "Survey parsed: {} rows, mood column: {}, struggle column: {}",
            row_count,
            mood_col.is_some(),
            struggle_col.is_some()
        );

        Ok(Self {
            headers,
            row_count,
            preview,
            mood,
            concerns,
        })
    }

    /// Escaped cells, padded or cut to the header width
    fn preview_cells(&self, row: &[String]) -> Vec<String> {
        (0..self.headers.len())
            .map(|i| row.get(i).map(|c| cell(c)).unwrap_or_default())
            .collect()
    }

    /// Markdown summary for the chat surface
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## \u{1f4ca} Survey Data Analysis\n\n");
        let _ = writeln!(out, "Responses: {}\n", self.row_count);

        if !self.preview.is_empty() {
            out.push_str("### \u{1f4dd} Survey Preview\n");
            let headers: Vec<String> = self.headers.iter().map(|h| cell(h)).collect();
            let _ = writeln!(out, "| {} |", headers.join(" | "));
            let _ = writeln!(out, "|{}", "---|".repeat(self.headers.len()));
            for row in &self.preview {
                let _ = writeln!(out, "| {} |", self.preview_cells(row).join(" | "));
            }
            out.push('\n');
        }

        match &self.mood {
            Some(mood) if mood.responses == 0 => {
                let _ = writeln!(
                    out,
                    "**\u{1f324}\u{fe0f} Average Mood Score:** no valid scores ({} skipped)\n",
                    mood.skipped
                );
            }
            Some(mood) => {
                let _ = writeln!(out, "**\u{1f324}\u{fe0f} Average Mood Score:** {:.2}\n", mood.average);
                out.push_str("### Mood Score Distribution\n");
                for (i, count) in mood.distribution.iter().enumerate() {
                    let _ = writeln!(out, "- {}: {} {}", i + 1, "#".repeat(*count), count);
                }
                out.push('\n');
            }
            None => {}
        }

        if let Some(concerns) = &self.concerns {
            out.push_str("### \u{1f9e0} Common Concerns\n");
            if concerns.is_empty() {
                out.push_str("No answers yet.\n");
            }
            for keyword in concerns.iter().take(15) {
                let _ = writeln!(out, "- {} ({})", keyword.keyword, keyword.frequency);
            }
        }

        out
    }
}
