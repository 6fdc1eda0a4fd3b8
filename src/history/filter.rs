use time::UtcOffset;

use crate::format::{format_display_date_in, local_offset};
use crate::model::AnalysisSummary;

/// Summaries whose id or displayed date contain `query`, case-insensitively.
///
/// Dates are matched in their rendered form, so typing `mar 5` finds a row
/// showing `Mar 5, 2024, ...`. A blank query keeps every row. Order is
/// preserved.
pub fn filter_summaries<'a>(
    summaries: &'a [AnalysisSummary],
    query: &str,
) -> Vec<&'a AnalysisSummary> {
    filter_summaries_in(summaries, query, local_offset())
}

/// [`filter_summaries`] with the date rendered in a fixed offset.
pub fn filter_summaries_in<'a>(
    summaries: &'a [AnalysisSummary],
    query: &str,
    offset: UtcOffset,
) -> Vec<&'a AnalysisSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return summaries.iter().collect();
    }
    summaries
        .iter()
        .filter(|summary| matches(summary, &needle, offset))
        .collect()
}

fn matches(summary: &AnalysisSummary, needle: &str, offset: UtcOffset) -> bool {
    summary.id.to_lowercase().contains(needle)
        || format_display_date_in(&summary.created_at, offset)
            .to_lowercase()
            .contains(needle)
}

/// Search text and page cursor of the history list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the query. The page always returns to 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Jump to `page` if it lies within `1..=total_pages`.
    ///
    /// Out-of-range requests are refused rather than clamped.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page == 0 || page > total_pages {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.page.saturating_add(1), total_pages)
    }

    pub fn previous_page(&mut self, total_pages: usize) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.go_to_page(self.page - 1, total_pages)
    }

    /// Back to page 1, keeping the query. Used when the rows are replaced.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, created_at: &str) -> AnalysisSummary {
        AnalysisSummary {
            id: id.into(),
            overall_score: 70,
            created_at: created_at.into(),
        }
    }

    fn sample() -> Vec<AnalysisSummary> {
        vec![
            summary("call-A1", "2024-03-05T14:07:00Z"),
            summary("call-b2", "2024-04-11T09:30:00Z"),
            summary("zz-9", "2024-03-20T18:00:00Z"),
        ]
    }

    fn ids(rows: &[&AnalysisSummary]) -> Vec<String> {
        rows.iter().map(|row| row.id.clone()).collect()
    }

    #[test]
    fn blank_query_keeps_everything_in_order() {
        let rows = sample();
        assert_eq!(ids(&filter_summaries_in(&rows, "", UtcOffset::UTC)), ["call-A1", "call-b2", "zz-9"]);
        assert_eq!(filter_summaries_in(&rows, "   ", UtcOffset::UTC).len(), 3);
    }

    #[test]
    fn id_match_ignores_case() {
        let rows = sample();
        assert_eq!(ids(&filter_summaries_in(&rows, "CALL-a", UtcOffset::UTC)), ["call-A1"]);
        assert_eq!(ids(&filter_summaries_in(&rows, "call", UtcOffset::UTC)), ["call-A1", "call-b2"]);
    }

    #[test]
    fn matches_displayed_date_not_raw_timestamp() {
        let rows = sample();
        assert_eq!(ids(&filter_summaries_in(&rows, "mar", UtcOffset::UTC)), ["call-A1", "zz-9"]);
        assert_eq!(ids(&filter_summaries_in(&rows, "09:30 am", UtcOffset::UTC)), ["call-b2"]);
        assert!(filter_summaries_in(&rows, "2024-03", UtcOffset::UTC).is_empty());
    }

    #[test]
    fn every_match_contains_the_query() {
        let rows = sample();
        for query in ["a", "2024", "pm", "9", "Apr"] {
            let needle = query.to_lowercase();
            for row in filter_summaries_in(&rows, query, UtcOffset::UTC) {
                let date = format_display_date_in(&row.created_at, UtcOffset::UTC).to_lowercase();
                assert!(row.id.to_lowercase().contains(&needle) || date.contains(&needle));
            }
        }
    }

    #[test]
    fn changing_query_resets_page() {
        let mut state = FilterState::default();
        assert!(state.go_to_page(4, 6));
        state.set_query("call");
        assert_eq!(state.page(), 1);
        assert!(state.go_to_page(3, 6));
        state.set_query("call");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn reset_page_keeps_query() {
        let mut state = FilterState::default();
        state.set_query("mar");
        assert!(state.go_to_page(3, 4));
        state.reset_page();
        assert_eq!(state.page(), 1);
        assert_eq!(state.query(), "mar");
    }

    #[test]
    fn navigation_is_refused_at_bounds() {
        let mut state = FilterState::default();
        assert!(!state.previous_page(3));
        assert!(state.next_page(3));
        assert!(state.next_page(3));
        assert!(!state.next_page(3));
        assert_eq!(state.page(), 3);
        assert!(!state.go_to_page(0, 3));
        assert!(!state.go_to_page(4, 3));
        assert_eq!(state.page(), 3);
    }
}
