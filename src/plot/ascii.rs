//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each contrast draws its SLD depth profile with its own marker character
//! (`*` for D2O, `+` for H2O); the header names the axes and ranges.

use crate::domain::ProfileTrace;

/// Render SLD depth profiles for one or more contrasts.
pub fn render_profile_plot(traces: &[ProfileTrace], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (z_min, z_max) = z_range(traces).unwrap_or((0.0, 150.0));
    let (rho_min, rho_max) = rho_range(traces).unwrap_or((0.0, 1.0));
    let (rho_min, rho_max) = pad_range(rho_min, rho_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for trace in traces {
        let points: Vec<(f64, f64)> = trace
            .z
            .iter()
            .zip(trace.rho.iter())
            .map(|(&z, &rho)| (z, rho))
            .collect();
        draw_curve(
            &mut grid,
            &points,
            z_min,
            z_max,
            rho_min,
            rho_max,
            trace.contrast.plot_char(),
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Profile: z=[{z_min:.1}, {z_max:.1}] Å | rho=[{rho_min:.2}, {rho_max:.2}] 1e-6/Å²"
    ));
    for trace in traces {
        out.push_str(&format!(
            " | {}={}",
            trace.contrast.plot_char(),
            trace.contrast.display_name()
        ));
    }
    out.push('\n');

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn z_range(traces: &[ProfileTrace]) -> Option<(f64, f64)> {
    let mut min_z = f64::INFINITY;
    let mut max_z = f64::NEG_INFINITY;
    for trace in traces {
        for &z in &trace.z {
            min_z = min_z.min(z);
            max_z = max_z.max(z);
        }
    }
    if min_z.is_finite() && max_z.is_finite() && max_z > min_z {
        Some((min_z, max_z))
    } else {
        None
    }
}

fn rho_range(traces: &[ProfileTrace]) -> Option<(f64, f64)> {
    let mut min_r = f64::INFINITY;
    let mut max_r = f64::NEG_INFINITY;
    for trace in traces {
        for &rho in &trace.rho {
            min_r = min_r.min(rho);
            max_r = max_r.max(rho);
        }
    }
    if min_r.is_finite() && max_r.is_finite() && max_r > min_r {
        Some((min_r, max_r))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(z: f64, z_min: f64, z_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((z - z_min) / (z_max - z_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(rho: f64, rho_min: f64, rho_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((rho - rho_min) / (rho_max - rho_min)).clamp(0.0, 1.0);
    // top row is the maximum
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    z_min: f64,
    z_max: f64,
    rho_min: f64,
    rho_max: f64,
    marker: char,
) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(z, rho) in points {
        let x = map_x(z, z_min, z_max, width);
        let y = map_y(rho, rho_min, rho_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, marker);
        } else {
            grid[y][x] = marker;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, marker: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = marker;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contrast;

    #[test]
    fn plot_has_header_and_requested_rows() {
        let trace = ProfileTrace {
            contrast: Contrast::D2o,
            z: (0..20).map(|i| i as f64).collect(),
            rho: (0..20).map(|i| (i as f64 / 19.0) * 6.0).collect(),
        };
        let txt = render_profile_plot(&[trace], 40, 10);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("Profile: z=[0.0, 19.0]"));
        assert!(lines[0].contains("*=D2O"));
        assert!(txt.contains('*'));
    }

    #[test]
    fn both_markers_appear_for_two_traces() {
        let d2o = ProfileTrace {
            contrast: Contrast::D2o,
            z: vec![0.0, 10.0, 20.0],
            rho: vec![2.0, 4.0, 6.0],
        };
        let h2o = ProfileTrace {
            contrast: Contrast::H2o,
            z: vec![0.0, 10.0, 20.0],
            rho: vec![2.0, 0.0, -0.5],
        };
        let txt = render_profile_plot(&[d2o, h2o], 30, 8);
        assert!(txt.contains('*'));
        assert!(txt.contains('+'));
    }

    #[test]
    fn degenerate_traces_fall_back_to_default_ranges() {
        let txt = render_profile_plot(&[], 30, 8);
        assert!(txt.starts_with("Profile: z=[0.0, 150.0]"));
    }
}
