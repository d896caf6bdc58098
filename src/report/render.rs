//! Terminal rendering of the response list and the dashboard.

use super::charts::{chart_specs, render_chart};
use crate::analysis::DashboardStats;
use crate::i18n::{format_timestamp, Language, Msg};
use crate::models::{stars, Reaction, SurveyResponse};
use crate::store::Theme;

/// Render a single response as a list entry.
pub fn render_response(response: &SurveyResponse, lang: Language) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "#{}  {} • {}  {}\n",
        response.id,
        response.name,
        response.age_label(),
        response.satisfaction.stars()
    ));
    out.push_str(&format!(
        "   🕒 {}\n",
        format_timestamp(&response.created_at, lang)
    ));
    out.push_str(&format!("   🏷️  {}\n", response.favorite.label(lang)));

    if !response.notes.is_empty() {
        out.push_str(&format!("   💬 {}\n", response.notes));
    }

    let reactions: Vec<String> = Reaction::ALL
        .iter()
        .map(|r| {
            if response.reactions.contains(r) {
                format!("[{} 1]", r.emoji())
            } else {
                r.emoji().to_string()
            }
        })
        .collect();
    out.push_str(&format!("   {}\n", reactions.join("  ")));

    out
}

/// Render the response list, newest first, at most `limit` entries.
pub fn render_response_list(
    responses: &[SurveyResponse],
    lang: Language,
    limit: Option<usize>,
) -> String {
    let mut out = format!(
        "{} ({})\n\n",
        Msg::RecentResponses.text(lang),
        responses.len()
    );

    if responses.is_empty() {
        out.push_str(Msg::NoResponsesYet.text(lang));
        out.push('\n');
        return out;
    }

    let shown = limit.unwrap_or(responses.len());
    for response in responses.iter().take(shown) {
        out.push_str(&render_response(response, lang));
        out.push('\n');
    }

    if shown < responses.len() {
        out.push_str(&format!("… +{}\n", responses.len() - shown));
    }

    out
}

/// Render the stat cards and, optionally, the charts.
pub fn render_dashboard(
    stats: &DashboardStats,
    lang: Language,
    theme: Theme,
    chart_width: usize,
    show_charts: bool,
) -> String {
    let mut out = format!("📊 {}\n\n", Msg::DashboardTitle.text(lang));

    if stats.no_data {
        out.push_str(&format!("   {}\n", Msg::NoDataTitle.text(lang)));
        out.push_str(&format!("   {}\n", Msg::NoDataHint.text(lang)));
        return out;
    }

    out.push_str(&format!(
        "   {}: {}  ({}: {})\n",
        Msg::TotalResponses.text(lang),
        stats.total_responses,
        Msg::Last7Days.text(lang),
        stats.last_7_days
    ));
    out.push_str(&format!(
        "   {}: {}/5  {}\n",
        Msg::Satisfaction.text(lang),
        stats
            .avg_satisfaction
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "—".to_string()),
        stars(stats.star_count())
    ));
    out.push_str(&format!(
        "   {}: {} {}\n",
        Msg::AverageAge.text(lang),
        stats
            .avg_age
            .map(|age| format!("{:.1}", age))
            .unwrap_or_else(|| "—".to_string()),
        Msg::Years.text(lang)
    ));
    out.push_str(&format!(
        "   {}: {}\n",
        Msg::LatestResponse.text(lang),
        stats.latest_response.as_deref().unwrap_or("—")
    ));

    if show_charts {
        for chart in chart_specs(stats, lang) {
            out.push('\n');
            out.push_str(&render_chart(&chart, chart_width, theme));
        }
    }

    out
}
