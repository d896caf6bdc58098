//! Response aggregation and statistics.
//!
//! [`summarize`] turns a snapshot of responses into everything the dashboard
//! shows. It is a pure function of its input and the supplied `now`: it never
//! mutates the responses and returns identical results for identical inputs.

use crate::i18n::{format_timestamp, Language, Msg};
use crate::models::{Favorite, Reaction, SurveyResponse};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Width of the "recent responses" window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// How many responses chose a given favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteCount {
    pub favorite: Favorite,
    pub count: usize,
}

/// Summary statistics for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Set when there are no responses; every other field is then zero/empty.
    pub no_data: bool,
    pub total_responses: usize,
    /// Mean satisfaction, one decimal.
    pub avg_satisfaction: Option<f64>,
    /// Mean age over responses that gave one, one decimal.
    pub avg_age: Option<f64>,
    /// Responses created within the last seven days, boundary included.
    #[serde(rename = "last7Days")]
    pub last_7_days: usize,
    /// Responses carrying each reaction. Unused reactions are absent.
    pub reaction_counts: BTreeMap<Reaction, usize>,
    /// Distinct favorites, most frequent first; ties keep first-seen order.
    pub favorite_counts: Vec<FavoriteCount>,
    /// Count of ratings 1 through 5.
    pub satisfaction_histogram: [usize; 5],
    /// Creation time of the newest response, formatted for display.
    pub latest_response: Option<String>,
}

impl DashboardStats {
    /// The "no data" result.
    pub fn empty() -> Self {
        Self {
            no_data: true,
            total_responses: 0,
            avg_satisfaction: None,
            avg_age: None,
            last_7_days: 0,
            reaction_counts: BTreeMap::new(),
            favorite_counts: Vec::new(),
            satisfaction_histogram: [0; 5],
            latest_response: None,
        }
    }

    /// Average satisfaction rounded to whole stars.
    pub fn star_count(&self) -> usize {
        self.avg_satisfaction
            .map(|avg| avg.round().clamp(0.0, 5.0) as usize)
            .unwrap_or(0)
    }
}

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute dashboard statistics for `responses` as of `now`.
///
/// `responses` is expected newest-first; its head is reported as the latest
/// response.
pub fn summarize(responses: &[SurveyResponse], now: DateTime<Utc>, lang: Language) -> DashboardStats {
    let Some(latest) = responses.first() else {
        return DashboardStats::empty();
    };

    let total = responses.len();

    let satisfaction_sum: u64 = responses
        .iter()
        .map(|r| r.satisfaction.value() as u64)
        .sum();
    let avg_satisfaction = round1(satisfaction_sum as f64 / total as f64);

    let ages: Vec<u64> = responses.iter().filter_map(|r| r.age).map(u64::from).collect();
    let avg_age = if ages.is_empty() {
        None
    } else {
        Some(round1(ages.iter().sum::<u64>() as f64 / ages.len() as f64))
    };

    let window = Duration::days(RECENT_WINDOW_DAYS);
    let last_7_days = responses
        .iter()
        .filter(|r| now.signed_duration_since(r.created_at) <= window)
        .count();

    let mut reaction_counts: BTreeMap<Reaction, usize> = BTreeMap::new();
    let mut satisfaction_histogram = [0usize; 5];
    let mut favorite_counts: Vec<FavoriteCount> = Vec::new();

    for response in responses {
        for reaction in &response.reactions {
            *reaction_counts.entry(*reaction).or_default() += 1;
        }

        let bucket = response.satisfaction.value() as usize - 1;
        if let Some(slot) = satisfaction_histogram.get_mut(bucket) {
            *slot += 1;
        }

        match favorite_counts
            .iter_mut()
            .find(|fc| fc.favorite == response.favorite)
        {
            Some(fc) => fc.count += 1,
            None => favorite_counts.push(FavoriteCount {
                favorite: response.favorite.clone(),
                count: 1,
            }),
        }
    }

    favorite_counts.sort_by_key(|fc| std::cmp::Reverse(fc.count));

    DashboardStats {
        no_data: false,
        total_responses: total,
        avg_satisfaction: Some(avg_satisfaction),
        avg_age,
        last_7_days,
        reaction_counts,
        favorite_counts,
        satisfaction_histogram,
        latest_response: Some(format_timestamp(&latest.created_at, lang)),
    }
}

/// One-line text summary of the statistics.
pub fn generate_summary_text(stats: &DashboardStats, lang: Language) -> String {
    if stats.no_data {
        return Msg::NoDataTitle.text(lang).to_string();
    }

    let mut parts = vec![
        format!("{}: {}", Msg::TotalResponses.text(lang), stats.total_responses),
        format!("{}: {}", Msg::Last7Days.text(lang), stats.last_7_days),
    ];
    if let Some(avg) = stats.avg_satisfaction {
        parts.push(format!("{}: {:.1}/5", Msg::Satisfaction.text(lang), avg));
    }
    if let Some(age) = stats.avg_age {
        parts.push(format!("{}: {:.1}", Msg::AverageAge.text(lang), age));
    }

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Satisfaction};
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 18, 0, 0).unwrap()
    }

    fn create_test_response(id: u64, satisfaction: u8, age: Option<u8>) -> SurveyResponse {
        SurveyResponse {
            id,
            name: format!("user{}", id),
            age,
            satisfaction: Satisfaction::try_from(satisfaction).unwrap(),
            favorite: Favorite::Category(Category::UiDesign),
            notes: String::new(),
            created_at: now(),
            reactions: BTreeSet::new(),
        }
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let stats = summarize(&[], now(), Language::En);
        assert!(stats.no_data);
        assert_eq!(stats, DashboardStats::empty());
        assert_eq!(stats.avg_satisfaction, None);
        assert_eq!(stats.star_count(), 0);
    }

    #[test]
    fn test_avg_satisfaction_rounded() {
        let responses = vec![
            create_test_response(1, 5, None),
            create_test_response(2, 4, None),
            create_test_response(3, 4, None),
        ];
        let stats = summarize(&responses, now(), Language::En);

        // 13 / 3 = 4.333...
        assert_eq!(stats.avg_satisfaction, Some(4.3));
        assert_eq!(stats.star_count(), 4);
        assert!(!stats.no_data);
    }

    #[test]
    fn test_avg_satisfaction_within_bounds() {
        for rating in 1..=5 {
            let responses: Vec<_> = (0..7).map(|i| create_test_response(i, rating, None)).collect();
            let avg = summarize(&responses, now(), Language::En).avg_satisfaction.unwrap();
            assert_eq!(avg, rating as f64);
            assert!((1.0..=5.0).contains(&avg));
        }
    }

    #[test]
    fn test_avg_age_excludes_absent() {
        let responses = vec![
            create_test_response(1, 3, Some(20)),
            create_test_response(2, 3, None),
            create_test_response(3, 3, Some(30)),
        ];
        let stats = summarize(&responses, now(), Language::En);
        assert_eq!(stats.avg_age, Some(25.0));
    }

    #[test]
    fn test_avg_age_none_without_ages() {
        let responses = vec![create_test_response(1, 3, None)];
        assert_eq!(summarize(&responses, now(), Language::En).avg_age, None);
    }

    #[test]
    fn test_avg_age_counts_zero() {
        let responses = vec![create_test_response(1, 3, Some(0))];
        assert_eq!(summarize(&responses, now(), Language::En).avg_age, Some(0.0));
    }

    #[test]
    fn test_last_7_days_inclusive_boundary() {
        let mut today = create_test_response(1, 5, None);
        today.created_at = now();
        let mut eight_days = create_test_response(2, 5, None);
        eight_days.created_at = now() - Duration::days(8);
        let mut seven_days = create_test_response(3, 5, None);
        seven_days.created_at = now() - Duration::days(7);

        let stats = summarize(&[today, eight_days, seven_days], now(), Language::En);
        assert_eq!(stats.last_7_days, 2);
    }

    #[test]
    fn test_reaction_counts_omit_unused() {
        let mut a = create_test_response(1, 5, None);
        a.reactions.insert(Reaction::ThumbsUp);
        let mut b = create_test_response(2, 5, None);
        b.reactions.insert(Reaction::ThumbsUp);
        b.reactions.insert(Reaction::Heart);
        let c = create_test_response(3, 5, None);

        let stats = summarize(&[a, b, c], now(), Language::En);
        let expected: BTreeMap<Reaction, usize> =
            [(Reaction::ThumbsUp, 2), (Reaction::Heart, 1)].into_iter().collect();
        assert_eq!(stats.reaction_counts, expected);
        assert!(!stats.reaction_counts.contains_key(&Reaction::Clap));
    }

    #[test]
    fn test_histogram_and_favorites() {
        let mut responses = vec![
            create_test_response(1, 1, None),
            create_test_response(2, 5, None),
            create_test_response(3, 5, None),
            create_test_response(4, 3, None),
        ];
        responses[0].favorite = Favorite::FreeText("Docs".to_string());
        responses[1].favorite = Favorite::Category(Category::Content);
        responses[3].favorite = Favorite::Category(Category::Content);

        let stats = summarize(&responses, now(), Language::En);
        assert_eq!(stats.satisfaction_histogram, [1, 0, 1, 0, 2]);
        assert_eq!(
            stats.favorite_counts,
            vec![
                FavoriteCount {
                    favorite: Favorite::Category(Category::Content),
                    count: 2
                },
                FavoriteCount {
                    favorite: Favorite::FreeText("Docs".to_string()),
                    count: 1
                },
                FavoriteCount {
                    favorite: Favorite::Category(Category::UiDesign),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_latest_response_is_head() {
        let mut newest = create_test_response(2, 4, None);
        newest.created_at = now() - Duration::hours(1);
        let mut older = create_test_response(1, 4, None);
        older.created_at = now() - Duration::days(3);

        let stats = summarize(&[newest.clone(), older], now(), Language::Es);
        assert_eq!(
            stats.latest_response,
            Some(format_timestamp(&newest.created_at, Language::Es))
        );
    }

    #[test]
    fn test_summarize_is_idempotent_and_pure() {
        let mut a = create_test_response(1, 2, Some(40));
        a.reactions.insert(Reaction::Clap);
        let responses = vec![a, create_test_response(2, 4, Some(22))];
        let before = responses.clone();

        let first = summarize(&responses, now(), Language::En);
        let second = summarize(&responses, now(), Language::En);
        assert_eq!(first, second);
        assert_eq!(responses, before);
    }

    #[test]
    fn test_generate_summary_text() {
        let responses = vec![create_test_response(1, 4, Some(30))];
        let stats = summarize(&responses, now(), Language::En);
        let text = generate_summary_text(&stats, Language::En);
        assert!(text.contains("Total Responses: 1"));
        assert!(text.contains("4.0/5"));
        assert!(text.contains("30.0"));

        let empty = generate_summary_text(&DashboardStats::empty(), Language::Es);
        assert_eq!(empty, "No hay datos para mostrar");
    }

    #[test]
    fn test_stats_json_field_names() {
        let stats = summarize(&[create_test_response(1, 4, None)], now(), Language::En);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalResponses"], 1);
        assert_eq!(json["last7Days"], 1);
        assert_eq!(json["avgAge"], serde_json::Value::Null);
    }
}
