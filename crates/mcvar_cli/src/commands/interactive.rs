//! Interactive command implementation
//!
//! Prompts for the five simulation parameters, then runs the pipeline.
//! A non-numeric answer aborts the run.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use super::simulate::{execute, RunOptions, RunOutcome};
use crate::config::McvarConfig;
use crate::input::{InteractivePrompt, ParameterSource};
use crate::Result;

/// Run the interactive prompt against `reader`, writing prompts and the
/// report to `writer`.
pub fn run<R: BufRead, W: Write>(
    config: &McvarConfig,
    options: &RunOptions,
    reader: R,
    mut writer: W,
) -> Result<RunOutcome> {
    info!("Starting interactive run...");

    let params = {
        let mut prompt = InteractivePrompt::new(reader, &mut writer, config.simulation);
        prompt.acquire().map_err(|e| {
            warn!("Parameter entry aborted: {}", e);
            e
        })?
    };

    execute(&params, options, &mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use std::io::Cursor;

    #[test]
    fn test_interactive_run() {
        let config = McvarConfig {
            seed: Some(3),
            ..McvarConfig::default()
        };
        let mut out = Vec::new();
        let outcome = run(
            &config,
            &RunOptions::from_config(&config),
            Cursor::new("200\n0.05\n0.3\n0.5\n40\n"),
            &mut out,
        )
        .unwrap();

        assert_eq!(outcome.matrix.n_paths(), 40);
        assert_eq!(outcome.matrix.n_steps(), 126);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Current Stock Price ($): "));
        assert!(text.contains("Start Price:          $200.00"));
    }

    #[test]
    fn test_interactive_parse_failure_aborts() {
        let config = McvarConfig::default();
        let mut out = Vec::new();
        let err = run(
            &config,
            &RunOptions::from_config(&config),
            Cursor::new("abc\n"),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, CliError::InputParse { .. }));
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("RESULTS REPORT"));
    }

    #[test]
    fn test_interactive_rejects_invalid_domain() {
        let config = McvarConfig::default();
        let err = run(
            &config,
            &RunOptions::from_config(&config),
            Cursor::new("0\n0.1\n0.2\n1\n10\n"),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Simulation(_)));
    }
}
