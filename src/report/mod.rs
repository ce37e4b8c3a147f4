//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model modules stay clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CheckOutcome, ModelSettings};
use crate::fit::FitProblem;
use crate::params::Parameter;
use crate::sample::{Layer, Stack};

/// Format the full problem summary (metadata + per-experiment sections).
pub fn format_problem_summary(problem: &FitProblem, settings: &ModelSettings) -> String {
    let mut out = String::new();

    out.push_str("=== nrb - Neutron Reflectometry Co-Refinement ===\n");
    out.push_str(&format!("Problem: {}\n", problem.name()));
    out.push_str(&format!(
        "Profile grid: {} steps x {} Å = {} Å\n",
        settings.dimension,
        settings.stepsize,
        settings.profile_thickness()
    ));
    out.push_str(&format!(
        "Interfaces: {}\n",
        if settings.step_interfaces {
            "microslabbed"
        } else {
            "Nevot-Croce"
        }
    ));

    for experiment in problem.experiments() {
        let stats = experiment.probe.stats();
        out.push_str(&format!(
            "\n[{}] {}\n",
            experiment.contrast.display_name(),
            experiment.probe.data.path.display()
        ));
        out.push_str(&format!(
            "Points: n={} | Q=[{:.4}, {:.4}] 1/Å | R=[{:.3e}, {:.3e}]\n",
            stats.n_points, stats.q_min, stats.q_max, stats.r_min, stats.r_max
        ));
        if !experiment.probe.data.row_errors.is_empty() {
            out.push_str(&format!(
                "Rejected rows: {} (first at line {})\n",
                experiment.probe.data.row_errors.len(),
                experiment.probe.data.row_errors[0].line
            ));
        }
        if let Some(edge) = &experiment.probe.critical {
            out.push_str(&format!(
                "Critical edge: Qc={:.5} 1/Å, oversampled [{:.5}, {:.5}] with {} points\n",
                edge.qc,
                edge.q_lo,
                edge.q_hi,
                edge.points.len()
            ));
        }
        out.push_str(&format_stack_table(&experiment.sample));
    }

    out
}

/// Format a stack as a substrate-first table.
pub fn format_stack_table(stack: &Stack) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>12} {:>12} {:>12}\n",
        "layer", "rho", "thickness", "interface"
    ));
    out.push_str(&format!(
        "{:-<16} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", ""
    ));

    for layer in stack.layers() {
        let rho = match layer {
            Layer::Slab(slab) => format!("{:>12.4}", slab.material.rho.value()),
            Layer::Functional(_) => format!("{:>12}", "profile"),
        };
        out.push_str(&format!(
            "{:<16} {rho} {:>12.3} {:>12.3}\n",
            truncate(&layer.label(), 16),
            layer.thickness().value(),
            layer.interface().value(),
        ));
    }

    out
}

/// Format the fittable parameter table: name, value, range.
pub fn format_parameter_table(params: &[Parameter]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<32} {:>14} {:>14} {:>14}\n",
        "parameter", "value", "lower", "upper"
    ));
    out.push_str(&format!(
        "{:-<32} {:-<14} {:-<14} {:-<14}\n",
        "", "", "", ""
    ));

    for p in params {
        let (lo, hi) = match p.bounds() {
            Some((lo, hi)) => (format!("{lo:>14.6}"), format!("{hi:>14.6}")),
            None => (format!("{:>14}", "fixed"), format!("{:>14}", "fixed")),
        };
        out.push_str(&format!(
            "{:<32} {:>14.6} {lo} {hi}\n",
            truncate(&p.name(), 32),
            p.value()
        ));
    }

    out
}

/// Format check outcomes, one line each.
pub fn format_check_report(outcomes: &[CheckOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let mark = if outcome.passed { "ok  " } else { "FAIL" };
        out.push_str(&format!("{mark} {:<26} {}\n", outcome.name, outcome.detail));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
