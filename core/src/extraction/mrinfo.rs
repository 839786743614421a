//! Parsers for the text output of the imaging info tool (`mrinfo`)
//!
//! Both parsers are best-effort scrapes over free-form tool output: any line
//! that does not look like what they expect is skipped, and missing data
//! yields empty values rather than errors.

/// Parsed diffusion shell data
///
/// Two parallel ordered sequences: index *i* of each describes the same
/// diffusion shell. No cross-validation of the lengths is performed; a
/// mismatch is representable and left to the caller to judge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellTable {
    /// b-value per shell, in order of appearance
    pub b_values: Vec<String>,
    /// Volume count per shell, in order of appearance
    pub shell_sizes: Vec<String>,
}

impl ShellTable {
    /// Returns true when no shell data was parsed
    pub fn is_empty(&self) -> bool {
        self.b_values.is_empty() && self.shell_sizes.is_empty()
    }
}

/// Extracts the trailing axis count from a "Dimensions:" line
///
/// Scans lines in order and stops at the first one containing the literal
/// substring "Dimensions:". Takes everything after the last ':', splits on
/// the 'x' delimiter, takes the last segment and strips every non-digit
/// character from it.
///
/// Example: `"  Dimensions:        128 x 128 x 33 x 100"` yields `"100"`.
/// Returns the empty string when no such line exists or no digits remain.
pub fn extract_axis_count(info_text: &str) -> String {
    for line in info_text.lines() {
        if line.contains("Dimensions:") {
            let after_colon = line.rsplit(':').next().unwrap_or("");
            let last_segment = after_colon.trim().split('x').next_back().unwrap_or("");
            return last_segment
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
        }
    }
    String::new()
}

/// Extracts the two-line b-value / shell-size table from shell-analysis output
///
/// Filters the text to lines whose first character is an ASCII digit
/// (tested on the raw line, before any trimming), in order of appearance.
/// The first qualifying line is whitespace-tokenized as the b-value sequence
/// and the second as the shell-size sequence; further qualifying lines are
/// ignored. Fewer than two such lines yields an empty table.
pub fn extract_shell_table(info_text: &str) -> ShellTable {
    let mut qualifying = info_text
        .lines()
        .filter(|line| line.chars().next().map_or(false, |c| c.is_ascii_digit()));

    let (Some(b_line), Some(size_line)) = (qualifying.next(), qualifying.next()) else {
        return ShellTable::default();
    };

    ShellTable {
        b_values: b_line.split_whitespace().map(str::to_string).collect(),
        shell_sizes: size_line.split_whitespace().map(str::to_string).collect(),
    }
}
