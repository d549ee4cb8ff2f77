// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use colored::Colorize;
use serde_json::Value;
use std::fmt;

/// Structural comparison of decoded output against a fixture.
///
/// Object key order is not significant; array order is.
pub fn compare_json(actual: &Value, expected: &Value) -> ComparisonResult {
    let mut differences = Vec::new();
    compare_recursive(actual, expected, "$", &mut differences);

    if differences.is_empty() {
        ComparisonResult::Match
    } else {
        ComparisonResult::Mismatch { differences }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    ValueMismatch {
        path: String,
        expected: Value,
        actual: Value,
    },
    MissingField {
        path: String,
    },
    ExtraField {
        path: String,
    },
    ArrayLengthMismatch {
        path: String,
        expected_len: usize,
        actual_len: usize,
    },
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Difference::ValueMismatch { path, .. }
            | Difference::MissingField { path }
            | Difference::ExtraField { path }
            | Difference::ArrayLengthMismatch { path, .. } => path,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::ValueMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{}: {} {}",
                path.bright_white(),
                format!("- {}", actual).red(),
                format!("+ {}", expected).green()
            ),
            Difference::MissingField { path } => {
                write!(f, "{}: {}", path.bright_white(), "missing".green())
            }
            Difference::ExtraField { path } => {
                write!(f, "{}: {}", path.bright_white(), "unexpected".red())
            }
            Difference::ArrayLengthMismatch {
                path,
                expected_len,
                actual_len,
            } => write!(
                f,
                "{}: {} {}",
                path.bright_white(),
                format!("- {} items", actual_len).red(),
                format!("+ {} items", expected_len).green()
            ),
        }
    }
}

fn compare_recursive(actual: &Value, expected: &Value, path: &str, differences: &mut Vec<Difference>) {
    match (actual, expected) {
        (Value::Object(actual_obj), Value::Object(expected_obj)) => {
            for (key, expected_val) in expected_obj {
                let current_path = format!("{}.{}", path, key);
                match actual_obj.get(key) {
                    Some(actual_val) => {
                        compare_recursive(actual_val, expected_val, &current_path, differences)
                    }
                    None => differences.push(Difference::MissingField { path: current_path }),
                }
            }
            for key in actual_obj.keys().filter(|key| !expected_obj.contains_key(*key)) {
                differences.push(Difference::ExtraField {
                    path: format!("{}.{}", path, key),
                });
            }
        }
        (Value::Array(actual_arr), Value::Array(expected_arr)) => {
            if actual_arr.len() != expected_arr.len() {
                differences.push(Difference::ArrayLengthMismatch {
                    path: path.to_string(),
                    expected_len: expected_arr.len(),
                    actual_len: actual_arr.len(),
                });
            }
            for (i, (actual_val, expected_val)) in actual_arr.iter().zip(expected_arr).enumerate() {
                compare_recursive(actual_val, expected_val, &format!("{}[{}]", path, i), differences);
            }
        }
        (actual_val, expected_val) => {
            if actual_val != expected_val {
                differences.push(Difference::ValueMismatch {
                    path: path.to_string(),
                    expected: expected_val.clone(),
                    actual: actual_val.clone(),
                });
            }
        }
    }
}

#[derive(Debug)]
pub enum ComparisonResult {
    Match,
    Mismatch { differences: Vec<Difference> },
}

impl ComparisonResult {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonResult::Match)
    }

    pub fn differences(&self) -> &[Difference] {
        match self {
            ComparisonResult::Match => &[],
            ComparisonResult::Mismatch { differences } => differences,
        }
    }

    /// Colored report, one line per difference.
    pub fn format_diff(&self, label: &str) -> String {
        let differences = self.differences();
        if differences.is_empty() {
            return String::new();
        }

        let mut output = vec![
            "=".repeat(80).bright_white().to_string(),
            format!("{} {}", "DECODE MISMATCH".bright_yellow().bold(), label),
            "=".repeat(80).bright_white().to_string(),
        ];
        output.extend(differences.iter().map(|diff| format!("  {}", diff)));
        output.push(format!(
            "{} {}",
            "Total differences:".bright_cyan().bold(),
            differences.len().to_string().bright_white()
        ));
        output.join("\n")
    }
}
