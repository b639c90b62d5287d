use crate::curve_files::{parse_curve_bank_bytes, CurveBank};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveValidationSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for CurveValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveValidationSeverity::Info => write!(f, "info"),
            CurveValidationSeverity::Warning => write!(f, "warning"),
            CurveValidationSeverity::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CurveValidationEvent {
    pub severity: CurveValidationSeverity,
    pub path: PathBuf,
    pub message: String,
}

pub struct CurveValidator;

impl CurveValidator {
    /// Validate the curve bank at `path` and return any validation events.
    pub fn validate_path(path: &Path) -> Vec<CurveValidationEvent> {
        if !path.exists() {
            return vec![Self::event(
                path,
                CurveValidationSeverity::Warning,
                "File not found (it may have been removed).",
            )];
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                return vec![Self::event(
                    path,
                    CurveValidationSeverity::Error,
                    format!("Failed to read curve bank: {err}"),
                )];
            }
        };
        let key_hint = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("curve_bank");
        let source_label = path.display().to_string();
        match parse_curve_bank_bytes(&bytes, key_hint, &source_label) {
            Ok(bank) => Self::bank_success_events(path, &bank),
            Err(err) => {
                vec![Self::event(path, CurveValidationSeverity::Error, format!("{err}"))]
            }
        }
    }

    fn bank_success_events(path: &Path, bank: &CurveBank) -> Vec<CurveValidationEvent> {
        let mut events = Vec::new();
        if bank.is_empty() {
            events.push(Self::event(
                path,
                CurveValidationSeverity::Warning,
                format!("Curve bank '{}' does not define any curves.", bank.name),
            ));
        }
        for (key, curve) in bank.iter() {
            if curve.max_time() > 1.0 {
                events.push(Self::event(
                    path,
                    CurveValidationSeverity::Warning,
                    format!("Curve '{key}' has keyframes past time 1.0; curves sample over [0, 1]."),
                ));
            }
        }
        let summary = Self::bank_summary(bank);
        events.push(Self::event(
            path,
            CurveValidationSeverity::Info,
            format!("Curve bank '{}' OK: {summary}", bank.name),
        ));
        events
    }

    fn bank_summary(bank: &CurveBank) -> String {
        let mut segments = Vec::new();
        for (key, curve) in bank.iter() {
            segments.push(format!("{key} {} ({} keys)", curve.kind_str(), curve.keyframe_count()));
        }
        if segments.is_empty() {
            "no curves authored".to_string()
        } else {
            segments.join(", ")
        }
    }

    fn event(
        path: &Path,
        severity: CurveValidationSeverity,
        message: impl Into<String>,
    ) -> CurveValidationEvent {
        CurveValidationEvent { severity, path: path.to_path_buf(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_display_formats() {
        assert_eq!(CurveValidationSeverity::Info.to_string(), "info");
        assert_eq!(CurveValidationSeverity::Warning.to_string(), "warning");
        assert_eq!(CurveValidationSeverity::Error.to_string(), "error");
    }

    #[test]
    fn validator_reports_missing_file() {
        let events = CurveValidator::validate_path(Path::new("foo/bar.json"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, CurveValidationSeverity::Warning);
        assert!(events[0].message.contains("not found"));
    }
}
