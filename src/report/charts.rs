//! Chart data for the dashboard.
//!
//! The dashboard shows three category distributions: satisfaction ratings as
//! a bar chart, favorite aspects as a donut, and reactions as a polar-area
//! chart. [`chart_specs`] derives their data from [`DashboardStats`];
//! [`render_chart`] draws a spec as horizontal text bars.

use crate::analysis::DashboardStats;
use crate::i18n::{Language, Msg};
use crate::store::Theme;

/// Visual form of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Donut,
    PolarArea,
}

/// Labels and values for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl ChartSpec {
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }
}

/// Builds the dashboard charts. Returns nothing when there is no data.
pub fn chart_specs(stats: &DashboardStats, lang: Language) -> Vec<ChartSpec> {
    if stats.no_data {
        return Vec::new();
    }

    let satisfaction = ChartSpec {
        kind: ChartKind::Bar,
        title: Msg::SatisfactionChart.text(lang).to_string(),
        labels: (1..=5).map(|n| format!("{} ⭐", n)).collect(),
        values: stats.satisfaction_histogram.to_vec(),
    };

    let favorites = ChartSpec {
        kind: ChartKind::Donut,
        title: Msg::FavoritesChart.text(lang).to_string(),
        labels: stats
            .favorite_counts
            .iter()
            .map(|fc| fc.favorite.label(lang))
            .collect(),
        values: stats.favorite_counts.iter().map(|fc| fc.count).collect(),
    };

    let reactions = ChartSpec {
        kind: ChartKind::PolarArea,
        title: Msg::ReactionsChart.text(lang).to_string(),
        labels: stats
            .reaction_counts
            .keys()
            .map(|r| r.emoji().to_string())
            .collect(),
        values: stats.reaction_counts.values().copied().collect(),
    };

    vec![satisfaction, favorites, reactions]
}

fn bar_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "█",
        Theme::Dark => "▓",
    }
}

/// Draws a chart as one text bar per label, scaled to `width` columns.
pub fn render_chart(spec: &ChartSpec, width: usize, theme: Theme) -> String {
    let mut out = String::new();
    out.push_str(&spec.title);
    out.push('\n');

    if spec.values.is_empty() {
        out.push_str("  —\n");
        return out;
    }

    let max = spec.values.iter().copied().max().unwrap_or(0);
    let total = spec.total();
    let label_width = spec
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in spec.labels.iter().zip(&spec.values) {
        let len = if max == 0 { 0 } else { value * width / max };
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "  {}{} {} {}",
            label,
            " ".repeat(pad),
            bar_glyph(theme).repeat(len),
            value
        ));
        if spec.kind == ChartKind::Donut && total > 0 {
            out.push_str(&format!(" ({:.0}%)", *value as f64 * 100.0 / total as f64));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;
    use crate::models::{Category, Favorite, Reaction, Satisfaction, SurveyResponse};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn response(id: u64, satisfaction: u8, favorite: Favorite) -> SurveyResponse {
        SurveyResponse {
            id,
            name: "x".to_string(),
            age: None,
            satisfaction: Satisfaction::try_from(satisfaction).unwrap(),
            favorite,
            notes: String::new(),
            created_at: Utc::now(),
            reactions: BTreeSet::new(),
        }
    }

    #[test]
    fn test_no_charts_without_data() {
        assert!(chart_specs(&DashboardStats::empty(), Language::En).is_empty());
    }

    #[test]
    fn test_chart_specs() {
        let mut a = response(1, 5, Favorite::Category(Category::Performance));
        a.reactions.insert(Reaction::Heart);
        let b = response(2, 2, Favorite::Category(Category::Performance));
        let stats = summarize(&[a, b], Utc::now(), Language::Es);

        let charts = chart_specs(&stats, Language::Es);
        assert_eq!(charts.len(), 3);

        assert_eq!(charts[0].kind, ChartKind::Bar);
        assert_eq!(charts[0].title, "Distribución de Satisfacción");
        assert_eq!(charts[0].values, vec![0, 1, 0, 0, 1]);

        assert_eq!(charts[1].kind, ChartKind::Donut);
        assert_eq!(charts[1].labels, vec!["Performance"]);
        assert_eq!(charts[1].values, vec![2]);

        assert_eq!(charts[2].kind, ChartKind::PolarArea);
        assert_eq!(charts[2].labels, vec!["❤️"]);
        assert_eq!(charts[2].values, vec![1]);
    }

    #[test]
    fn test_render_chart_scales_bars() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            title: "T".to_string(),
            labels: vec!["a".to_string(), "bb".to_string()],
            values: vec![4, 2],
        };
        let out = render_chart(&spec, 8, Theme::Light);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], format!("  a  {} 4", "█".repeat(8)));
        assert_eq!(lines[2], format!("  bb {} 2", "█".repeat(4)));
    }

    #[test]
    fn test_render_donut_shows_share_and_dark_glyph() {
        let spec = ChartSpec {
            kind: ChartKind::Donut,
            title: "Fav".to_string(),
            labels: vec!["x".to_string(), "y".to_string()],
            values: vec![3, 1],
        };
        let out = render_chart(&spec, 4, Theme::Dark);
        assert!(out.contains("(75%)"));
        assert!(out.contains("(25%)"));
        assert!(out.contains("▓"));
        assert!(!out.contains("█"));
    }

    #[test]
    fn test_render_empty_chart() {
        let spec = ChartSpec {
            kind: ChartKind::PolarArea,
            title: "R".to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        };
        assert_eq!(render_chart(&spec, 10, Theme::Light), "R\n  —\n");
    }
}
