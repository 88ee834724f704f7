//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use ebpack_core::PackReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }

    fn summary_lines(report: &PackReport) -> Vec<String> {
        let mut lines = vec![
            format!("  Files added:      {}", Self::format_number(report.files_added)),
            format!("  Total size:       {}", humanize_bytes(report.bytes_written)),
        ];

        if report.bytes_compressed > 0 {
            lines.push(format!(
                "  Archive size:     {}",
                humanize_bytes(report.bytes_compressed)
            ));
            lines.push(format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.files_skipped > 0 {
            lines.push(format!("  Files skipped:    {}", report.files_skipped));
        }
        if report.directories_pruned > 0 {
            lines.push(format!("  Dirs pruned:      {}", report.directories_pruned));
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = format!("Created {} with files at root", output_path.display());
        if self.use_colors {
            self.term
                .write_line(&format!("{} {headline}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(&headline)?;
        }

        for line in Self::summary_lines(report) {
            self.term.write_line(&line)?;
        }

        if self.verbose {
            self.term
                .write_line(&format!("  Duration:         {:?}", report.duration))?;
            self.term.write_line("")?;
            for entry in &report.entries {
                self.term.write_line(&format!("  + {entry}"))?;
            }
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_summary_lines_minimal() {
        let report = PackReport::default();
        let lines = HumanFormatter::summary_lines(&report);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Files added"));
        assert!(lines[1].contains("0 B"));
    }

    #[test]
    fn test_summary_lines_full() {
        let report = PackReport {
            files_added: 1200,
            files_skipped: 2,
            directories_pruned: 1,
            bytes_written: 4096,
            bytes_compressed: 1024,
            ..Default::default()
        };
        let lines = HumanFormatter::summary_lines(&report);
        assert!(lines.iter().any(|l| l.contains("1,200")));
        assert!(lines.iter().any(|l| l.contains("Archive size:     1.0 KB")));
        assert!(lines.iter().any(|l| l.contains("75.0%")));
        assert!(lines.iter().any(|l| l.contains("Files skipped:    2")));
        assert!(lines.iter().any(|l| l.contains("Dirs pruned:      1")));
    }
}
