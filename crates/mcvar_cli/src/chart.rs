//! Terminal charts: a path preview and the terminal price histogram.

use mcvar_risk::TerminalHistogram;

use crate::report::format_currency;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: usize = 40;

/// Renders one sparkline per path, sampled at `width` evenly spaced steps.
///
/// All lines share a single vertical scale so paths are comparable.
pub fn render_path_preview(paths: &[Vec<f64>], total_paths: usize, width: usize) -> String {
    let mut out = format!(
        "Monte Carlo Paths (First {}/{})\n",
        paths.len(),
        total_paths
    );
    if paths.is_empty() || width == 0 {
        return out;
    }

    let lo = paths
        .iter()
        .flatten()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let hi = paths
        .iter()
        .flatten()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    for path in paths {
        let line: String = sample_indices(path.len(), width)
            .map(|i| {
                let level = if span > 0.0 {
                    ((path[i] - lo) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize
                } else {
                    0
                };
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!(
        "scale: {} .. {}\n",
        format_currency(lo),
        format_currency(hi)
    ));
    out
}

/// Evenly spaced indices over `0..len`, always including both ends.
fn sample_indices(len: usize, width: usize) -> impl Iterator<Item = usize> {
    let count = width.min(len);
    (0..count).map(move |k| {
        if count == 1 {
            0
        } else {
            k * (len - 1) / (count - 1)
        }
    })
}

/// Renders the histogram with the bin holding `floor` marked.
pub fn render_histogram(histogram: &TerminalHistogram, floor: f64, floor_label: &str) -> String {
    let mut out = String::from("Distribution of Final Prices\n");
    let peak = histogram.counts().iter().copied().max().unwrap_or(0).max(1);
    let floor_bin = histogram.bin_index(floor);

    for (idx, &count) in histogram.counts().iter().enumerate() {
        let (start, end) = histogram.bin_edges(idx);
        let bar = "█".repeat(count * BAR_WIDTH / peak);
        let marker = if floor_bin == Some(idx) {
            format!("  <-- {}: {}", floor_label, format_currency(floor))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:>12} - {:>12} |{:<width$} {}{}\n",
            format_currency(start),
            format_currency(end),
            bar,
            count,
            marker,
            width = BAR_WIDTH
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_indices_cover_ends() {
        let idx: Vec<usize> = sample_indices(253, 5).collect();
        assert_eq!(idx, vec![0, 63, 126, 189, 252]);

        let idx: Vec<usize> = sample_indices(3, 60).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_path_preview() {
        let paths = vec![vec![100.0, 110.0, 120.0], vec![100.0, 90.0, 80.0]];
        let text = render_path_preview(&paths, 1_000, 60);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Monte Carlo Paths (First 2/1000)");
        assert_eq!(lines[1], "▅▆█");
        assert_eq!(lines[2], "▅▃▁");
        assert_eq!(lines[3], "scale: $80.00 .. $120.00");
    }

    #[test]
    fn test_path_preview_flat() {
        let paths = vec![vec![50.0; 4]];
        let text = render_path_preview(&paths, 1, 10);
        assert!(text.contains("▁▁▁▁"));
    }

    #[test]
    fn test_histogram_marks_floor() {
        let values = [1.0, 2.0, 2.0, 3.0, 4.0];
        let hist = TerminalHistogram::new(&values, 3).unwrap();
        let text = render_histogram(&hist, 2.2, "5th percentile");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("<-- 5th percentile: $2.20"));
        assert!(!lines[1].contains("<--"));
        assert!(!lines[3].contains("<--"));
    }
}
