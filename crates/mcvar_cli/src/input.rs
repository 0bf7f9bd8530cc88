//! Parameter acquisition.
//!
//! A [`ParameterSource`] yields the [`SimulationParameters`] for one run.
//! Fixed values and interactive prompts are interchangeable sources.

use std::io::{BufRead, Write};

use mcvar_engine::mc::SimulationParameters;

use crate::{CliError, Result};

/// Produces the parameters for a simulation run.
pub trait ParameterSource {
    /// Acquires parameters. Values are not validated here.
    fn acquire(&mut self) -> Result<SimulationParameters>;
}

/// Source returning a fixed parameter set.
#[derive(Clone, Copy, Debug)]
pub struct FixedParameters(pub SimulationParameters);

impl ParameterSource for FixedParameters {
    fn acquire(&mut self) -> Result<SimulationParameters> {
        Ok(self.0)
    }
}

/// Source that prompts for five values in order: price, drift, volatility,
/// horizon and path count.
///
/// The steps-per-year convention comes from `template`. The first
/// non-numeric answer aborts with [`CliError::InputParse`]; there is no
/// retry loop.
pub struct InteractivePrompt<R, W> {
    reader: R,
    writer: W,
    template: SimulationParameters,
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    /// Creates a prompt reading from `reader` and writing prompts to `writer`.
    pub fn new(reader: R, writer: W, template: SimulationParameters) -> Self {
        Self {
            reader,
            writer,
            template,
        }
    }

    fn read_line(&mut self, prompt: &str, field: &'static str) -> Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed(field));
        }
        Ok(line.trim().to_string())
    }

    fn read_f64(&mut self, prompt: &str, field: &'static str) -> Result<f64> {
        let input = self.read_line(prompt, field)?;
        input
            .parse::<f64>()
            .map_err(|_| CliError::InputParse { field, input })
    }

    fn read_usize(&mut self, prompt: &str, field: &'static str) -> Result<usize> {
        let input = self.read_line(prompt, field)?;
        input
            .parse::<usize>()
            .map_err(|_| CliError::InputParse { field, input })
    }
}

impl<R: BufRead, W: Write> ParameterSource for InteractivePrompt<R, W> {
    fn acquire(&mut self) -> Result<SimulationParameters> {
        writeln!(self.writer, "--- MONTE CARLO SIMULATOR ---")?;
        writeln!(self.writer, "Please enter the simulation parameters:")?;

        let initial_price = self.read_f64("Current Stock Price ($): ", "initial price")?;
        let annual_drift = self.read_f64(
            "Expected Annual Return (e.g., 0.10 for 10%): ",
            "annual drift",
        )?;
        let annual_volatility = self.read_f64(
            "Annual Volatility (e.g., 0.20 for 20%): ",
            "annual volatility",
        )?;
        let horizon_years = self.read_f64("Time Horizon (Years): ", "horizon")?;
        let path_count = self.read_usize(
            "Number of Simulations (Recommended: 1000-5000): ",
            "path count",
        )?;

        Ok(SimulationParameters {
            initial_price,
            annual_drift,
            annual_volatility,
            horizon_years,
            path_count,
            ..self.template
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> InteractivePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        InteractivePrompt::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            SimulationParameters::default(),
        )
    }

    #[test]
    fn test_reads_five_values_in_order() {
        let mut source = prompt("150\n0.07\n0.25\n2\n3000\n");
        let params = source.acquire().unwrap();

        assert_eq!(params.initial_price, 150.0);
        assert_eq!(params.annual_drift, 0.07);
        assert_eq!(params.annual_volatility, 0.25);
        assert_eq!(params.horizon_years, 2.0);
        assert_eq!(params.path_count, 3000);
        assert_eq!(params.steps_per_year, 252);

        let transcript = String::from_utf8(source.writer).unwrap();
        let price_at = transcript.find("Current Stock Price").unwrap();
        let paths_at = transcript.find("Number of Simulations").unwrap();
        assert!(price_at < paths_at);
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let params = prompt("  100 \n0.1\n0.2\n1\n 10\n").acquire().unwrap();
        assert_eq!(params.initial_price, 100.0);
        assert_eq!(params.path_count, 10);
    }

    #[test]
    fn test_non_numeric_aborts() {
        let err = prompt("100\nten percent\n0.2\n1\n10\n").acquire().unwrap_err();
        match err {
            CliError::InputParse { field, input } => {
                assert_eq!(field, "annual drift");
                assert_eq!(input, "ten percent");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_fractional_path_count_is_parse_failure() {
        let err = prompt("100\n0.1\n0.2\n1\n12.5\n").acquire().unwrap_err();
        assert!(matches!(err, CliError::InputParse { field: "path count", .. }));
    }

    #[test]
    fn test_closed_input() {
        let err = prompt("100\n0.1\n").acquire().unwrap_err();
        assert!(matches!(err, CliError::InputClosed("annual volatility")));
    }

    #[test]
    fn test_out_of_domain_values_pass_through_unvalidated() {
        // Validation belongs to the engine; the prompt must not coerce.
        let params = prompt("-5\n0.1\n-0.2\n1\n0\n").acquire().unwrap();
        assert_eq!(params.initial_price, -5.0);
        assert_eq!(params.annual_volatility, -0.2);
        assert_eq!(params.path_count, 0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_fixed_parameters() {
        let fixed = SimulationParameters::new(10.0, 0.0, 0.1, 1.0, 5);
        assert_eq!(FixedParameters(fixed).acquire().unwrap(), fixed);
    }
}
