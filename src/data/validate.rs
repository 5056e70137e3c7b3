//! Build-file validation: collect every problem in one pass instead of dying
//! on the first, so authors can fix a whole file at once. Lookup failures are
//! errors; suspicious-but-runnable configurations are warnings.

use std::collections::HashSet;
use std::fmt;

use crate::combat::attack::dual_wield_penalty;
use crate::data::build::{load_build_file, BuildEntry};
use crate::data::loader::resolve_weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate a build file on disk. Read/parse failures become a single error
/// diagnostic so the caller has one reporting path.
pub fn validate_build_file(path: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let file = match load_build_file(path) {
        Ok(file) => file,
        Err(err) => {
            report.push(ValidationSeverity::Error, path, err.to_string());
            return report;
        }
    };
    validate_entries(&file.builds, &mut report);
    report
}

/// Validate parsed entries. Separated from the file wrapper for tests and
/// for callers that already hold a `BuildFile`.
pub fn validate_entries(entries: &[BuildEntry], report: &mut ValidationReport) {
    if entries.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            "builds",
            "file contains no builds",
        );
    }

    let mut seen_labels: HashSet<String> = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let context = format!("builds[{index}] '{}'", entry.display_label());

        if !seen_labels.insert(entry.display_label().to_string()) {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "duplicate label; comparison rows will be ambiguous",
            );
        }

        match resolve_weapon(&entry.weapon) {
            Ok(weapon) => {
                if entry.config.progression.is_dual_wield()
                    && dual_wield_penalty(entry.config.toon_size, weapon.size).is_none()
                {
                    report.push(
                        ValidationSeverity::Info,
                        context.clone(),
                        format!(
                            "{} character cannot dual-wield a {} weapon; build will report zero damage",
                            entry.config.toon_size.as_str(),
                            weapon.size.as_str()
                        ),
                    );
                }
            }
            Err(err) => {
                report.push(ValidationSeverity::Error, context.clone(), err.to_string());
            }
        }

        if entry.config.target_ac <= 1 {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                format!(
                    "target AC {} is at or below the natural-20 floor; only misses on a 1",
                    entry.config.target_ac
                ),
            );
        }

        if let Some(cap) = entry.config.attack_bonus_cap {
            if cap < entry.config.attack_bonus {
                report.push(
                    ValidationSeverity::Warning,
                    context,
                    format!(
                        "attack bonus cap {cap} is below the baseline attack bonus {}",
                        entry.config.attack_bonus
                    ),
                );
            }
        }
    }
}
