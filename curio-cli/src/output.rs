use colored::*;
use curio::models::{EmptyReason, RetrievalOutcome, RetrievalResult, RetrievalStrategy, StandardRecord};
use serde_json::json;
use std::collections::BTreeMap;

use crate::utils::truncate;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn score() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

pub fn output_error(error_msg: &str, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "message": error_msg,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(error_msg));
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_score(score: Option<f32>) -> ColoredString {
    match score {
        Some(score) => format!("{:.3}", score).color(CliColors::score()),
        None => "-".color(CliColors::muted()),
    }
}

pub fn format_strategy(strategy: &RetrievalStrategy) -> ColoredString {
    strategy.as_str().color(CliColors::accent()).bold()
}

pub fn describe_empty(reason: &EmptyReason) -> String {
    match reason {
        EmptyReason::NoCandidates => "no matching documents".to_string(),
        EmptyReason::UpstreamFailure(detail) => format!("upstream failure: {}", detail),
    }
}

pub fn print_standards(records: &[StandardRecord]) {
    if records.is_empty() {
        println!("{}", format_info("No standards found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Found {} standards:", records.len()))
    );
    println!();

    println!(
        "{:<7} {:<28} {:<20} {}",
        "Score".color(CliColors::muted()).bold(),
        "Standard".color(CliColors::muted()).bold(),
        "Source".color(CliColors::muted()).bold(),
        "Description".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(96).color(CliColors::muted()));

    for record in records {
        println!(
            "{:<7} {:<28} {:<20} {}",
            format_score(record.score),
            truncate(&record.standard_id, 28).color(CliColors::accent()),
            truncate(&record.source, 20),
            truncate(&record.description, 60).color(CliColors::primary())
        );
        if let Some(explanation) = &record.relevance_explanation {
            println!("        {}", explanation.color(CliColors::muted()));
        }
        if let Some(relevance) = &record.student_group_relevance {
            println!("        {} {}", "group:".color(CliColors::muted()), relevance);
        }
        if !record.resource_url.is_empty() {
            println!("        {}", record.resource_url.underline());
        }
    }
}

pub fn print_result(rank: usize, result: &RetrievalResult) {
    println!(
        "{:>2}. {} {}",
        rank,
        format_score(Some(result.score)),
        truncate(&result.content, 80).color(CliColors::primary())
    );
    println!("    {}", result.relevance_explanation.color(CliColors::muted()));
    if let Some(relevance) = &result.student_group_relevance {
        println!("    {} {}", "group:".color(CliColors::muted()), relevance);
    }
    if let Some(resource_type) = &result.external_resource_type {
        println!("    {} {}", "resource:".color(CliColors::muted()), resource_type);
    }
}

pub fn print_outcome(strategy: RetrievalStrategy, outcome: &RetrievalOutcome) {
    match outcome {
        RetrievalOutcome::Found { results } => {
            println!(
                "{}",
                format_info(&format!("{} returned {} results:", strategy, results.len()))
            );
            println!();
            for (i, result) in results.iter().enumerate() {
                print_result(i + 1, result);
            }
        }
        RetrievalOutcome::Empty { reason } => {
            println!(
                "{}",
                format_warning(&format!("{} returned nothing: {}", strategy, describe_empty(reason)))
            );
        }
    }
}

pub fn print_comparison(outcomes: &BTreeMap<RetrievalStrategy, RetrievalOutcome>) {
    println!(
        "{:<26} {:<8} {:<7} {}",
        "Strategy".color(CliColors::muted()).bold(),
        "Results".color(CliColors::muted()).bold(),
        "Top".color(CliColors::muted()).bold(),
        "Top result".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(96).color(CliColors::muted()));

    for (strategy, outcome) in outcomes {
        match outcome.results().first() {
            Some(top) => println!(
                "{:<26} {:<8} {:<7} {}",
                format_strategy(strategy),
                outcome.len(),
                format_score(Some(top.score)),
                truncate(&top.content, 50)
            ),
            None => println!(
                "{:<26} {:<8} {:<7} {}",
                format_strategy(strategy),
                0,
                format_score(None),
                outcome
                    .empty_reason()
                    .map(describe_empty)
                    .unwrap_or_default()
                    .color(CliColors::warning())
            ),
        }
    }
}

pub fn print_strategies() {
    for strategy in RetrievalStrategy::ALL {
        println!(
            "{:<26} {}",
            format_strategy(&strategy),
            strategy.description()
        );
    }
}
