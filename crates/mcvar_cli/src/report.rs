//! Report rendering.
//!
//! The table format is a stable text contract: every monetary value is
//! printed as `$` followed by the amount with two decimals and thousands
//! separators, e.g. `$1,234.56` or `$-10.00`.

use clap::ValueEnum;
use mcvar_engine::mc::SimulationParameters;
use mcvar_risk::RiskReport;
use serde::Serialize;

use crate::Result;

const RULE_WIDTH: usize = 40;

/// Output format for the results report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Table,
    /// JSON document
    Json,
}

/// Formats `amount` as currency with two decimals and thousands separators.
///
/// ```
/// use mcvar_cli::report::format_currency;
///
/// assert_eq!(format_currency(1234567.891), "$1,234,567.89");
/// assert_eq!(format_currency(-10.0), "$-10.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{}", sign, grouped, frac_part)
}

/// Formats a percentile level as an ordinal, e.g. `5th`, `1st`, `2.5th`.
pub fn ordinal(level: f64) -> String {
    if level.fract() != 0.0 {
        return format!("{}th", level);
    }
    let n = level as i64;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Renders the text results report.
pub fn render_table(report: &RiskReport) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let floor_label = format!("{} Percentile Floor:", ordinal(report.confidence_level()));
    let var_label = format!("Value at Risk ({}%):", report.confidence());
    let var = format_currency(report.value_at_risk());

    let mut out = String::new();
    out.push_str(&format!("{}\nRESULTS REPORT\n{}\n", heavy, heavy));
    out.push_str(&format!(
        "{:<22}{}\n",
        "Start Price:",
        format_currency(report.initial_price())
    ));
    out.push_str(&format!(
        "{:<22}{}\n",
        "Expected Future Price:",
        format_currency(report.mean_final_price())
    ));
    out.push_str(&format!(
        "{:<22}{}\n",
        "Minimum Final Price:",
        format_currency(report.min_final_price())
    ));
    out.push_str(&format!(
        "{:<22}{}\n",
        "Maximum Final Price:",
        format_currency(report.max_final_price())
    ));
    out.push_str(&format!(
        "{:<22}{}\n",
        floor_label,
        format_currency(report.percentile_floor())
    ));
    out.push_str(&format!("{}\n", light));
    out.push_str(&format!("{:<22}{}\n", var_label, var));
    out.push_str(&format!(
        "(You are {}% confident you won't lose more than {})\n",
        report.confidence(),
        var
    ));
    out.push_str(&format!("{}\n", heavy));
    out
}

/// JSON document describing a run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Parameters the paths were generated from
    pub parameters: &'a SimulationParameters,
    /// Number of time steps
    pub steps: usize,
    /// Seed used for the random source
    pub seed: u64,
    /// Risk statistics
    pub report: &'a RiskReport,
}

/// Renders the JSON results report.
pub fn render_json(params: &SimulationParameters, seed: u64, report: &RiskReport) -> Result<String> {
    let doc = JsonReport {
        parameters: params,
        steps: params.n_steps(),
        seed,
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcvar_risk::RiskAnalyzer;

    fn sample_report() -> RiskReport {
        RiskAnalyzer::new(50.0)
            .unwrap()
            .analyze(100.0, &[80.0, 90.0, 1_250.5])
            .unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.555), "$5.55");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(100.0), "$100.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(5.0), "5th");
        assert_eq!(ordinal(1.0), "1st");
        assert_eq!(ordinal(2.0), "2nd");
        assert_eq!(ordinal(3.0), "3rd");
        assert_eq!(ordinal(11.0), "11th");
        assert_eq!(ordinal(21.0), "21st");
        assert_eq!(ordinal(2.5), "2.5th");
    }

    #[test]
    fn test_render_table_lines() {
        let text = render_table(&sample_report());

        assert!(text.contains("RESULTS REPORT"));
        assert!(text.contains("Start Price:          $100.00\n"));
        assert!(text.contains("Expected Future Price:$473.50\n"));
        assert!(text.contains("Maximum Final Price:  $1,250.50\n"));
        assert!(text.contains("50th Percentile Floor:$90.00\n"));
        assert!(text.contains("Value at Risk (50%):  $10.00\n"));
        assert!(text.contains("won't lose more than $10.00"));
    }

    #[test]
    fn test_render_table_negative_var() {
        let report = RiskAnalyzer::default().analyze(100.0, &[120.0]).unwrap();
        let text = render_table(&report);

        assert!(text.contains("5th Percentile Floor: $120.00\n"));
        assert!(text.contains("Value at Risk (95%):  $-20.00\n"));
    }

    #[test]
    fn test_render_json() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 3);
        let json = render_json(&params, 42, &sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["seed"], 42);
        assert_eq!(value["steps"], 252);
        assert_eq!(value["parameters"]["path_count"], 3);
        assert_eq!(value["report"]["value_at_risk"], 10.0);
        assert_eq!(value["report"]["percentile_floor"], 90.0);
    }
}
