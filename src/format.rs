//! Display helpers shared by the history list, detail view and result view.

use std::sync::OnceLock;

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{FormatItem, well_known::Rfc3339},
    macros::format_description,
};

/// en-US medium date with a two-digit 12-hour clock, e.g. `Mar 5, 2024, 02:07 PM`.
const DISPLAY_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
);
const NAIVE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");

/// Qualitative bucket for a 0–100 score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// 80 and above.
    Excellent,
    /// 60 to 79.
    Good,
    /// Below 60.
    NeedsImprovement,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    /// One-line verdict shown under the overall score.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! This call implemented key sales principles effectively.",
            Self::Good => "Good foundation. Several opportunities to refine the approach.",
            Self::NeedsImprovement => "Multiple areas for improvement have been identified.",
        }
    }
}

/// Render a score as a percentage label.
pub fn format_score(score: u8) -> String {
    format!("{score}%")
}

/// Local UTC offset, resolved once.
///
/// `time` refuses to read the local offset once other threads exist, so
/// `main` calls this before the UI spawns any workers.
pub fn local_offset() -> UtcOffset {
    static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Format a server timestamp for display in the local offset.
///
/// Unparseable input comes back unchanged so the row still shows something.
pub fn format_display_date(raw: &str) -> String {
    format_display_date_in(raw, local_offset())
}

/// Format a server timestamp for display in a fixed offset.
pub fn format_display_date_in(raw: &str, offset: UtcOffset) -> String {
    parse_timestamp(raw)
        .and_then(|at| at.to_offset(offset).format(DISPLAY_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Parse RFC 3339 timestamps, treating offset-less ones as UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(at);
    }
    let normalized = trimmed.replacen(' ', "T", 1);
    PrimitiveDateTime::parse(&normalized, NAIVE_FORMAT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Who is speaking on a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    Customer,
    Agent,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Agent => "Agent",
        }
    }
}

/// One speaker turn of a call transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

const CUSTOMER_PREFIX: &str = "John:";
const AGENT_PREFIX: &str = "Lauren:";

/// Split a transcript into speaker turns.
///
/// The backend labels the customer `John:` and the agent `Lauren:`. Lines
/// without a label are attributed to the agent.
pub fn parse_transcript(transcript: &str) -> Vec<TranscriptLine> {
    if transcript.is_empty() {
        return Vec::new();
    }
    transcript
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix(CUSTOMER_PREFIX) {
                TranscriptLine {
                    speaker: Speaker::Customer,
                    text: rest.trim().to_string(),
                }
            } else {
                TranscriptLine {
                    speaker: Speaker::Agent,
                    text: trimmed
                        .strip_prefix(AGENT_PREFIX)
                        .unwrap_or(trimmed)
                        .trim()
                        .to_string(),
                }
            }
        })
        .collect()
}
