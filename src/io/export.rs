//! Export profile grids to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ProfileTrace;
use crate::error::AppError;

/// Write SLD depth profiles to a CSV file, one row per grid point.
pub fn write_profile_csv(path: &Path, traces: &[ProfileTrace]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create profile CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "contrast,z_angstrom,rho_1e-6_per_angstrom2")
        .map_err(|e| AppError::usage(format!("Failed to write profile CSV header: {e}")))?;

    for trace in traces {
        for (z, rho) in trace.z.iter().zip(trace.rho.iter()) {
            writeln!(
                file,
                "{},{z:.4},{rho:.6}",
                trace.contrast.display_name().to_lowercase()
            )
            .map_err(|e| AppError::usage(format!("Failed to write profile CSV row: {e}")))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contrast;
    use std::fs;

    #[test]
    fn csv_has_one_row_per_grid_point() {
        let path = std::env::temp_dir().join(format!("nrb-export-{}.csv", std::process::id()));
        let trace = ProfileTrace {
            contrast: Contrast::D2o,
            z: vec![0.0, 0.5, 1.0],
            rho: vec![2.069, 2.1, 6.34],
        };
        write_profile_csv(&path, &[trace]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "contrast,z_angstrom,rho_1e-6_per_angstrom2");
        assert!(lines[1].starts_with("d2o,0.0000,2.069000"));

        fs::remove_file(path).ok();
    }
}
