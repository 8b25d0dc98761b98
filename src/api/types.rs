//! Domain payloads produced by the generation API, plus the parsing rules
//! that turn raw response fields into display-ready values.

use serde::Deserialize;

/// Result of the keyword stage: candidate keywords plus the fresh session id
/// that correlates every later request of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBatch {
    pub session_id: String,
    pub keywords: Vec<String>,
}

/// Result of the content stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    /// Backend-assigned record id for the artifact
    pub content_id: String,
    pub content: String,
    pub seo_score: SeoScore,
    /// Raw SEO factor strings as reported by the backend
    pub factors: Vec<String>,
}

/// Derived display metric for a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeoScore {
    /// Score percentage as reported by the backend (0-100)
    pub percentage: u32,
    pub word_count: usize,
    /// How many SEO factors mention keyword frequency
    pub keyword_occurrences: usize,
}

impl SeoScore {
    /// One-line summary for footers and CLI output
    pub fn summary(&self) -> String {
        format!(
            "SEO {}% | {} words | keyword frequency x{}",
            self.percentage, self.word_count, self.keyword_occurrences
        )
    }

    /// Render the score as a fixed-width bar
    pub fn score_bar(&self, width: usize) -> String {
        let pct = f64::from(self.percentage.min(100));
        let filled = ((pct / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        let empty = width - filled;
        format!("{}{}", "█".repeat(filled), "░".repeat(empty))
    }
}

/// Response of the health probe endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Server-side timestamp, ISO 8601
    #[serde(default)]
    pub time: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Aggregate counters from the dashboard endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub contents: u64,
    #[serde(default)]
    pub avg_score: f64,
}

/// A prior keyword-research session, as listed by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub seed: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub time: String,
}

/// A previously generated artifact, as listed by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub seo_score: u32,
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default)]
    pub words: usize,
    #[serde(default)]
    pub time: String,
}

/// Recent-activity summary from the dashboard endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub recent_contents: Vec<ContentRecord>,
}

/// Split a topic blob into selectable outline segments.
///
/// The topic stage returns one unstructured document, not a list; segments
/// are delimited by blank lines. Whitespace-only segments are dropped, so a
/// blob with trailing separators yields no empty entries.
pub fn split_topic_segments(blob: &str) -> Vec<String> {
    blob.split("\n\n")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Count the SEO factors that mention keyword frequency, case-insensitively.
/// No matching factor is a valid outcome, not an error.
pub fn keyword_frequency_occurrences(factors: &[String]) -> usize {
    factors
        .iter()
        .filter(|factor| factor.to_lowercase().contains("keyword frequency"))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_topic_segments_ordered() {
        assert_eq!(split_topic_segments("A\n\nB\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_topic_segments_drops_blanks() {
        let segments = split_topic_segments("First outline\n\n\n\nSecond outline\n\n");
        assert_eq!(segments, vec!["First outline", "Second outline"]);

        let segments = split_topic_segments("Only one\n\n   \n\n");
        assert_eq!(segments, vec!["Only one"]);
    }

    #[test]
    fn test_split_topic_segments_empty_blob() {
        assert!(split_topic_segments("").is_empty());
        assert!(split_topic_segments("\n\n\n\n").is_empty());
    }

    #[test]
    fn test_keyword_frequency_occurrences() {
        let factors = vec![
            "Keyword Frequency: 3".to_string(),
            "Readability: Good".to_string(),
        ];
        assert_eq!(keyword_frequency_occurrences(&factors), 1);
        assert_eq!(keyword_frequency_occurrences(&[]), 0);
    }

    #[test]
    fn test_keyword_frequency_case_insensitive() {
        let factors = vec![
            "good KEYWORD FREQUENCY".to_string(),
            "keyword frequency ok".to_string(),
            "keyword density".to_string(),
        ];
        assert_eq!(keyword_frequency_occurrences(&factors), 2);
    }

    #[test]
    fn test_score_bar_bounds() {
        let score = SeoScore {
            percentage: 0,
            word_count: 0,
            keyword_occurrences: 0,
        };
        assert_eq!(score.score_bar(10), "░░░░░░░░░░");

        let score = SeoScore {
            percentage: 100,
            word_count: 0,
            keyword_occurrences: 0,
        };
        assert_eq!(score.score_bar(10), "██████████");

        // Values above 100 are clamped rather than overflowing the bar
        let score = SeoScore {
            percentage: 250,
            word_count: 0,
            keyword_occurrences: 0,
        };
        assert_eq!(score.score_bar(10), "██████████");
    }

    #[test]
    fn test_summary_format() {
        let score = SeoScore {
            percentage: 85,
            word_count: 120,
            keyword_occurrences: 1,
        };
        assert_eq!(score.summary(), "SEO 85% | 120 words | keyword frequency x1");
    }
}
