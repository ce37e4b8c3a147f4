//! Reflectivity data ingest and validation.
//!
//! Data files are plain text, four whitespace-separated columns per row:
//! `Q R dR dQ` (momentum transfer in Å^-1, reflectivity, 1-sigma uncertainty,
//! 1-sigma Q resolution). Lines starting with `#` and blank lines are
//! skipped.
//!
//! Design goals:
//! - **Strict file handling** (missing/unreadable files are clear errors)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no instrument or model logic here

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DatasetStats;
use crate::error::AppError;

/// One reflectivity observation.
#[derive(Debug, Clone, Copy)]
pub struct ReflPoint {
    /// Momentum transfer (Å^-1).
    pub q: f64,
    /// Reflectivity.
    pub r: f64,
    /// 1-sigma uncertainty on `r`.
    pub dr: f64,
    /// 1-sigma Q resolution.
    pub dq: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: usable points + row errors + counters.
#[derive(Debug, Clone)]
pub struct ReflData {
    pub path: PathBuf,
    pub points: Vec<ReflPoint>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl ReflData {
    pub fn stats(&self) -> DatasetStats {
        let mut q_min = f64::INFINITY;
        let mut q_max = f64::NEG_INFINITY;
        let mut r_min = f64::INFINITY;
        let mut r_max = f64::NEG_INFINITY;
        for p in &self.points {
            q_min = q_min.min(p.q);
            q_max = q_max.max(p.q);
            r_min = r_min.min(p.r);
            r_max = r_max.max(p.r);
        }
        DatasetStats {
            n_points: self.points.len(),
            q_min,
            q_max,
            r_min,
            r_max,
        }
    }
}

/// Load a four-column reflectivity file.
pub fn load_reflectivity(path: &Path) -> Result<ReflData, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open reflectivity data '{}': {e}",
            path.display()
        ))
    })?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows_read += 1;

        match parse_row(trimmed) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if points.is_empty() {
        return Err(AppError::no_data(format!(
            "No usable rows in '{}' ({} rows read, {} rejected).",
            path.display(),
            rows_read,
            row_errors.len()
        )));
    }

    Ok(ReflData {
        path: path.to_path_buf(),
        points,
        row_errors,
        rows_read,
    })
}

fn parse_row(row: &str) -> Result<ReflPoint, String> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(format!("Expected 4 columns (Q R dR dQ), got {}.", fields.len()));
    }

    let mut values = [0.0f64; 4];
    for (i, field) in fields.iter().enumerate() {
        values[i] = field
            .parse::<f64>()
            .map_err(|_| format!("Column {} is not a number: '{field}'.", i + 1))?;
        if !values[i].is_finite() {
            return Err(format!("Column {} is not finite: '{field}'.", i + 1));
        }
    }

    let [q, r, dr, dq] = values;
    if q <= 0.0 {
        return Err(format!("Q must be positive, got {q}."));
    }
    if dr < 0.0 || dq < 0.0 {
        return Err("Uncertainties dR and dQ must be non-negative.".to_string());
    }

    Ok(ReflPoint { q, r, dr, dq })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nrb-ingest-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_points_and_skips_comments() {
        let path = write_temp(
            "ok.dat",
            "# Q R dR dQ\n\
             0.010 0.95 0.01 0.0005\n\
             \n\
             0.020 0.40 0.01 0.0005\n",
        );
        let data = load_reflectivity(&path).unwrap();
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.rows_read, 2);
        assert!(data.row_errors.is_empty());

        let stats = data.stats();
        assert_eq!(stats.n_points, 2);
        assert!((stats.q_min - 0.010).abs() < 1e-12);
        assert!((stats.q_max - 0.020).abs() < 1e-12);

        fs::remove_file(path).ok();
    }

    #[test]
    fn bad_rows_are_recorded_with_line_numbers() {
        let path = write_temp(
            "bad.dat",
            "0.010 0.95 0.01 0.0005\n\
             0.011 not-a-number 0.01 0.0005\n\
             0.012 0.90\n\
             -0.013 0.90 0.01 0.0005\n\
             0.014 0.85 0.01 0.0005\n",
        );
        let data = load_reflectivity(&path).unwrap();
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.row_errors.len(), 3);
        assert_eq!(data.row_errors[0].line, 2);
        assert_eq!(data.row_errors[1].line, 3);
        assert_eq!(data.row_errors[2].line, 4);

        fs::remove_file(path).ok();
    }

    #[test]
    fn empty_file_is_a_no_data_error() {
        let path = write_temp("empty.dat", "# only a header\n");
        let err = load_reflectivity(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let err = load_reflectivity(Path::new("/nonexistent/nrb.dat")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}
