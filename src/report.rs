use chrono::Local;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::types::graph::{Account, FolloweeReport, LookupOutcome};

/// Render the analyzer's output as the final text report.
pub fn render(origin: &Account, reports: &[FolloweeReport]) -> String {
    let mut not_following: Vec<&FolloweeReport> = Vec::new();
    let mut failed: Vec<&FolloweeReport> = Vec::new();
    for report in reports {
        match &report.outcome {
            LookupOutcome::NotFollowingBack => not_following.push(report),
            LookupOutcome::LookupFailed(_) => failed.push(report),
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "Unmutual connections report for @{}", origin.handle);
    let _ = writeln!(
        out,
        "Generated {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);

    if not_following.is_empty() && failed.is_empty() {
        let _ = writeln!(out, "Everyone you follow follows you back.");
        return out;
    }

    if !not_following.is_empty() {
        let _ = writeln!(out, "Not following you back:");
        for report in &not_following {
            let _ = writeln!(out, "  @{} ({})", report.account.handle, display_name(&report.account));
        }
        let _ = writeln!(out);
    }

    if !failed.is_empty() {
        let _ = writeln!(out, "Lookups that failed (reciprocity unknown):");
        for report in &failed {
            if let LookupOutcome::LookupFailed(reason) = &report.outcome {
                let _ = writeln!(out, "  @{}: {}", report.account.handle, reason);
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "{} not following back, {} lookups failed",
        not_following.len(),
        failed.len()
    );
    out
}

/// Write the rendered report to a timestamped file in `out_dir` and return
/// its path.
pub fn write_report(
    out_dir: &Path,
    origin: &Account,
    reports: &[FolloweeReport],
) -> std::io::Result<PathBuf> {
    let file_name = format!(
        "unmutual_report_{}.txt",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let path = out_dir.join(file_name);
    std::fs::write(&path, render(origin, reports))?;
    Ok(path)
}

fn display_name(account: &Account) -> &str {
    if account.display_name.is_empty() {
        &account.handle
    } else {
        &account.display_name
    }
}
