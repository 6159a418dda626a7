use regex::Regex;
use time::Duration;

use crate::models::{PROFILE_COLUMNS, ProfileReport, Task};

#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.whole_nanoseconds();
    let magnitude = nanos.unsigned_abs();
    if magnitude >= 1_000_000_000 {
        format!("{:.3}s", duration.as_seconds_f64())
    } else if magnitude >= 1_000_000 {
        format!("{:.3}ms", nanos as f64 / 1e6)
    } else if magnitude >= 1_000 {
        format!("{:.3}us", nanos as f64 / 1e3)
    } else {
        format!("{nanos}ns")
    }
}

/// One line per task, indented by depth, followed by that task's messages.
/// With a filter only tasks whose label matches are listed.
#[must_use]
pub fn render_task_tree(root: &Task, filter: Option<&Regex>) -> String {
    let mut lines = Vec::new();

    for (depth, task) in root.walk() {
        if filter.is_some_and(|pattern| !pattern.is_match(&task.label)) {
            continue;
        }

        let indent = "  ".repeat(depth);
        let mut line = format!(
            "{indent}{} count={} total={} active={}",
            task.label,
            task.count,
            format_duration(task.total_duration()),
            format_duration(task.active_duration())
        );
        if let Some(error) = &task.error {
            line.push_str(&format!(" error={error:?}"));
        }
        lines.push(line);

        for message in task.messages() {
            lines.push(format!("{indent}  [{}] {}", message.kind, message.text));
        }
    }

    lines.join("\n")
}

#[must_use]
pub fn render_profile_table(report: &ProfileReport, limit: Option<usize>) -> String {
    let unit = report.unit.map(|unit| unit.as_str()).unwrap_or_default();
    let rows = report.rows();
    let shown = limit.map_or(rows.len(), |limit| limit.min(rows.len()));

    let mut lines = vec![
        format!(
            "{} (unit={}, rows={})",
            report.label,
            if unit.is_empty() { "?" } else { unit },
            rows.len()
        ),
        format!(
            "{:>10} {:>7} {:>7} {:>10} {:>7}  {}",
            PROFILE_COLUMNS[0],
            PROFILE_COLUMNS[1],
            PROFILE_COLUMNS[2],
            PROFILE_COLUMNS[3],
            PROFILE_COLUMNS[4],
            PROFILE_COLUMNS[5]
        ),
    ];

    for row in &rows[..shown] {
        lines.push(format!(
            "{:>10} {:>6.2}% {:>6.2}% {:>10} {:>6.2}%  {}",
            format!("{:.2}{unit}", row.flat),
            row.flat_percent,
            row.sum_percent,
            format!("{:.2}{unit}", row.cum),
            row.cum_percent,
            row.function
        ));
    }
    if shown < rows.len() {
        lines.push(format!("... {} more row(s)", rows.len() - shown));
    }

    for error in report.error_lines() {
        lines.push(format!("error: {error}"));
    }
    if !report.image.is_empty() {
        lines.push(format!("image: {} byte(s)", report.image.len()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::format_duration;

    #[test]
    fn durations_pick_the_largest_fitting_unit() {
        assert_eq!(format_duration(Duration::nanoseconds(450)), "450ns");
        assert_eq!(format_duration(Duration::nanoseconds(900_000)), "900.000us");
        assert_eq!(format_duration(Duration::milliseconds(12)), "12.000ms");
        assert_eq!(format_duration(Duration::milliseconds(1_500)), "1.500s");
        assert_eq!(format_duration(Duration::nanoseconds(-2_000)), "-2.000us");
    }
}
