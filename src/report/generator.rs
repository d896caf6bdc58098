//! Markdown dashboard report generation.
//!
//! This module renders the dashboard statistics, charts and response list
//! as a standalone Markdown document.

use super::charts::{chart_specs, render_chart};
use crate::analysis::DashboardStats;
use crate::i18n::{format_timestamp, Language, Msg};
use crate::models::{stars, SurveyResponse};
use crate::store::Theme;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Metadata about the report.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Where the responses were read from.
    pub store_path: String,
    /// Report language.
    pub language: Language,
    /// Chart bar width in columns.
    pub chart_width: usize,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(
    responses: &[SurveyResponse],
    stats: &DashboardStats,
    metadata: &ReportMetadata,
) -> String {
    let lang = metadata.language;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", Msg::SurveyTitle.text(lang)));
    output.push_str(&generate_metadata_section(metadata));
    output.push_str(&generate_summary_section(stats, lang));
    output.push_str(&generate_charts_section(stats, metadata));
    output.push_str(&generate_responses_section(responses, lang));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Store:** `{}`\n", metadata.store_path));
    section.push_str(&format!("- **Language:** {}\n", metadata.language));
    section.push('\n');

    section
}

fn generate_summary_section(stats: &DashboardStats, lang: Language) -> String {
    let mut section = format!("## {}\n\n", Msg::DashboardTitle.text(lang));

    if stats.no_data {
        section.push_str(&format!(
            "**{}**\n\n{}\n\n",
            Msg::NoDataTitle.text(lang),
            Msg::NoDataHint.text(lang)
        ));
        return section;
    }

    let dash = || "—".to_string();
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n",
        Msg::TotalResponses.text(lang),
        Msg::Last7Days.text(lang),
        Msg::Satisfaction.text(lang),
        Msg::AverageAge.text(lang),
        Msg::LatestResponse.text(lang),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {}/5 {} | {} | {} |\n\n",
        stats.total_responses,
        stats.last_7_days,
        stats
            .avg_satisfaction
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(dash),
        stars(stats.star_count()),
        stats
            .avg_age
            .map(|age| format!("{:.1}", age))
            .unwrap_or_else(dash),
        stats.latest_response.clone().unwrap_or_else(dash),
    ));

    section
}

fn generate_charts_section(stats: &DashboardStats, metadata: &ReportMetadata) -> String {
    let charts = chart_specs(stats, metadata.language);
    if charts.is_empty() {
        return String::new();
    }

    let mut section = String::from("## Charts\n\n");
    for chart in &charts {
        section.push_str("```text\n");
        section.push_str(&render_chart(chart, metadata.chart_width, Theme::Light));
        section.push_str("```\n\n");
    }

    section
}

fn generate_responses_section(responses: &[SurveyResponse], lang: Language) -> String {
    let mut section = format!(
        "## {} ({})\n\n",
        Msg::RecentResponses.text(lang),
        responses.len()
    );

    if responses.is_empty() {
        section.push_str(Msg::NoResponsesYet.text(lang));
        section.push_str("\n\n");
        return section;
    }

    for response in responses {
        section.push_str(&format!(
            "### {} • {} {}\n\n",
            response.name,
            response.age_label(),
            response.satisfaction.stars()
        ));
        section.push_str(&format!(
            "*{} | {}*\n\n",
            format_timestamp(&response.created_at, lang),
            response.favorite.label(lang)
        ));
        if !response.notes.is_empty() {
            section.push_str(&format!("> {}\n\n", response.notes));
        }
        if !response.reactions.is_empty() {
            let emojis: Vec<&str> = response.reactions.iter().map(|r| r.emoji()).collect();
            section.push_str(&format!("{}\n\n", emojis.join(" ")));
        }
    }

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by YoSurvey*\n".to_string()
}

/// Write the Markdown report to a file.
pub fn write_report(
    responses: &[SurveyResponse],
    stats: &DashboardStats,
    metadata: &ReportMetadata,
    path: &Path,
) -> Result<()> {
    let content = generate_markdown_report(responses, stats, metadata);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
