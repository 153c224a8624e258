//! Payload types carried by the chat stream

use serde::{Deserialize, Serialize};

/// Maximum characters shown per part-number badge
pub const PART_BADGE_WIDTH: usize = 14;

/// Structured search result that replaces an assistant reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    /// The query the backend searched for
    pub query: String,
    /// Number of matching work orders found
    #[serde(default)]
    pub total_found: u64,
    /// Average similarity across matches, 0.0..=1.0
    #[serde(default)]
    pub avg_similarity: f64,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
}

impl CardData {
    pub fn avg_similarity_percent(&self) -> u32 {
        to_percent(self.avg_similarity)
    }
}

/// A single work order row. Every field is optional display data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkOrder {
    pub work_order_id: Option<String>,
    pub technician: Option<String>,
    pub similarity: Option<f64>,
    pub created_date: Option<String>,
    pub completed_date: Option<String>,
    pub description: Option<String>,
    /// Free text, usually comma separated
    pub part_numbers: Option<String>,
}

impl WorkOrder {
    /// Similarity as a whole percentage (clamped to 0..=100)
    pub fn similarity_percent(&self) -> Option<u32> {
        self.similarity.map(to_percent)
    }

    /// Split the free-text part list into display badges
    ///
    /// Keeps at most `max` badges, each truncated to [`PART_BADGE_WIDTH`]
    /// characters. When parts are dropped a trailing `+N` badge is added.
    pub fn part_number_badges(&self, max: usize) -> Vec<String> {
        let Some(raw) = self.part_numbers.as_deref() else {
            return Vec::new();
        };

        let parts: Vec<&str> = raw
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut badges: Vec<String> = parts
            .iter()
            .take(max)
            .map(|p| truncate_badge(p))
            .collect();

        if parts.len() > max {
            badges.push(format!("+{}", parts.len() - max));
        }
        badges
    }
}

/// Format a 0..=1 score as a percentage label, e.g. `0.75` -> `"75%"`
pub fn percent_label(score: f64) -> String {
    format!("{}%", to_percent(score))
}

fn to_percent(score: f64) -> u32 {
    if score.is_nan() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn truncate_badge(part: &str) -> String {
    if part.chars().count() <= PART_BADGE_WIDTH {
        return part.to_string();
    }
    let mut out: String = part.chars().take(PART_BADGE_WIDTH - 1).collect();
    out.push('…');
    out
}
