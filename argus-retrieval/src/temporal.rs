//! Temporal decay weighting for ranked candidates.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

static RECENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(recent|today|yesterday|this\s+(week|month)|last\s+(day|week|month|few\s+days))\b")
        .unwrap()
});

/// Whether the query text implies a recency intent.
pub fn query_implies_recency(query: &str) -> bool {
    RECENT.is_match(query)
}

/// Multiplicative recency weight in `[0.2, 1.5]`.
///
/// Unknown timestamp is neutral (1.0). A recency-flavored query halves the
/// decay horizon; content at most 2 days old gets a 1.2 freshness bump
/// before clamping. `now` is injected so tests stay deterministic.
pub fn temporal_weight(
    published_at: Option<DateTime<Utc>>,
    query: &str,
    default_recent_days: u32,
    now: DateTime<Utc>,
) -> f64 {
    let Some(ts) = published_at else {
        return 1.0;
    };
    let days = (now - ts).num_seconds() as f64 / 86_400.0;
    let horizon_scale = if query_implies_recency(query) { 0.5 } else { 1.0 };
    let horizon = (f64::from(default_recent_days) * horizon_scale).max(3.0);
    let boost = if days <= 2.0 { 1.2 } else { 1.0 };
    ((-days / horizon).exp() * boost).clamp(0.2, 1.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn unknown_timestamp_is_neutral() {
        let w = temporal_weight(None, "anything", 30, Utc::now());
        assert!((w - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fresh_outranks_month_old() {
        let now = Utc::now();
        let fresh = temporal_weight(Some(now), "query", 30, now);
        let old = temporal_weight(Some(now - Duration::days(30)), "query", 30, now);
        assert!(fresh > old);
    }

    #[test]
    fn two_day_old_content_gets_the_freshness_bump() {
        let now = Utc::now();
        let day_old = temporal_weight(Some(now - Duration::days(1)), "query", 30, now);
        let week_old = temporal_weight(Some(now - Duration::days(7)), "query", 30, now);
        assert!(day_old > 1.0);
        assert!(day_old > week_old);
    }

    #[test]
    fn recency_query_decays_faster() {
        let now = Utc::now();
        let ts = Some(now - Duration::days(20));
        let plain = temporal_weight(ts, "acme breach", 30, now);
        let recent = temporal_weight(ts, "recent acme breach", 30, now);
        assert!(recent < plain);
    }

    #[test]
    fn recency_patterns_match() {
        assert!(query_implies_recency("what happened this week"));
        assert!(query_implies_recency("TODAY's incidents"));
        assert!(query_implies_recency("last few days of activity"));
        assert!(!query_implies_recency("history of the acme breach"));
    }
}
