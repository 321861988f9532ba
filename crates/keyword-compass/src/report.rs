//! Report rendering: an aligned-column text summary for terminals and a
//! JSON serialization of the full result bundle for export.

use anyhow::Result;
use std::fmt::Write;

use keyword_compass_core::cluster::SimilarKeyword;
use keyword_compass_core::models::AnalysisReport;

/// Render the full analysis as human-readable text.
///
/// `top` caps the number of scored keywords shown; clusters, ideas, and
/// insights are always shown in full.
pub fn render_text(report: &AnalysisReport, top: usize) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "Keyword Compass — Analysis");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "  Keywords:    {}", summary.total);
    let _ = writeln!(
        out,
        "  Categories:  {} high / {} medium / {} low",
        summary.high, summary.medium, summary.low
    );
    let _ = writeln!(out, "  Quick wins:  {}", summary.quick_wins);
    let _ = writeln!(out, "  High volume: {}", summary.high_volume);
    let _ = writeln!(out, "  High CPC:    {}", summary.high_cpc);

    if !report.scored.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:<40} {:>8} {:>6} {:>6} {:>8} {:<8}",
            "KEYWORD", "VOLUME", "DIFF", "CPC", "SCORE", "BAND"
        );
        let _ = writeln!(out, "  {}", "-".repeat(80));
        for scored in report.scored.iter().take(top) {
            let _ = writeln!(
                out,
                "  {:<40} {:>8} {:>6.0} {:>6.2} {:>8.2} {:<8}",
                truncate(&scored.record.keyword, 40),
                scored.record.volume,
                scored.record.difficulty,
                scored.record.cpc,
                scored.opportunity,
                scored.category.as_str()
            );
        }
        if report.scored.len() > top {
            let _ = writeln!(out, "  ... and {} more", report.scored.len() - top);
        }
    }

    if !report.clusters.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Topic clusters:");
        for cluster in &report.clusters {
            let _ = writeln!(
                out,
                "  - {} ({} keywords, avg opportunity {:.2})",
                cluster.label,
                cluster.keywords.len(),
                cluster.avg_opportunity
            );
        }
    }

    if !report.ideas.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Content ideas:");
        for idea in &report.ideas {
            let _ = writeln!(
                out,
                "  - [{:.2}] {} ({})",
                idea.combined_score,
                idea.title,
                idea.content_type.as_str()
            );
            let _ = writeln!(
                out,
                "      primary: {} | volume {} | difficulty {:.0}",
                idea.primary_keywords.join(", "),
                idea.total_volume,
                idea.avg_difficulty
            );
        }
    }

    if !report.insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Insights:");
        for insight in &report.insights {
            let _ = writeln!(out, "  - {insight}");
        }
    }

    out
}

/// Serialize the full report as pretty JSON.
pub fn render_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a similar-keyword ranking as text.
pub fn render_similar(target: &str, similar: &[SimilarKeyword]) -> String {
    let mut out = String::new();
    if similar.is_empty() {
        let _ = writeln!(out, "No keywords similar to \"{target}\" found.");
        return out;
    }
    let _ = writeln!(out, "Keywords similar to \"{target}\":");
    for entry in similar {
        let _ = writeln!(out, "  {:>6.3}  {}", entry.similarity, entry.keyword);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
