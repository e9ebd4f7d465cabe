use colorful::{Colorful, RGB};

use crate::models::ScanReport;

fn primary() -> RGB {
    RGB::new(79, 70, 229) // Indigo
}
fn success() -> RGB {
    RGB::new(16, 185, 129) // Emerald
}
fn warning() -> RGB {
    RGB::new(245, 158, 11) // Amber
}
fn danger() -> RGB {
    RGB::new(231, 76, 60) // Red
}
fn subtle() -> RGB {
    RGB::new(107, 114, 128) // Gray
}

/// Renders the end-of-scan summary shown on the terminal.
pub fn render_summary(report: &ScanReport) -> String {
    let mut lines = Vec::new();

    let header = if report.dry_run {
        "📋 Scan summary (dry run, nothing was changed)"
    } else {
        "📋 Scan summary"
    };
    lines.push(format!("\n  {header}"));

    let (Some(id), Some(title)) = (&report.thread_id, &report.thread_title) else {
        lines.push(format!("     └─ {}", "No active self-promotion thread".color(subtle())));
        return lines.join("\n");
    };

    lines.push(format!("     ├─ 🧵 Thread: {} ({})", title.as_str().color(primary()), id));
    lines.push(format!(
        "     ├─ 💬 Top-level comments: {}",
        report.top_level_comments.to_string().color(primary())
    ));
    lines.push(format!(
        "     ├─ 🤝 Contributors: {}",
        report.contributors.to_string().color(success())
    ));

    if !report.enforcing {
        lines.push(format!("     └─ {}", "Below activation threshold, not enforcing".color(subtle())));
        return lines.join("\n");
    }

    lines.push(format!("     ├─ ⚠️  Warned: {}", report.warned.to_string().color(warning())));
    lines.push(format!("     ├─ 🧹 Cleaned up: {}", report.cleaned_up.to_string().color(success())));
    lines.push(format!("     ├─ 🗑️  Removed: {}", report.removed.to_string().color(danger())));
    lines.push(format!("     └─ 💤 Untouched: {}", report.untouched.to_string().color(subtle())));
    lines.join("\n")
}

pub fn print_summary(report: &ScanReport) {
    println!("{}", render_summary(report));
}
