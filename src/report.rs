use crate::js::JsOutcome;
use crate::pipeline::PatchReport;
use std::time::Duration;

/// Exit status when the run finished but the translation script could not be patched.
pub const JS_MISMATCH_EXIT: u8 = 2;

pub fn exit_status(report: &PatchReport) -> u8 {
    match report.js {
        JsOutcome::Patched => 0,
        JsOutcome::PatternMismatch(_) => JS_MISMATCH_EXIT,
    }
}

pub fn print_completion(report: &PatchReport) {
    info!(
        "{}",
        t!(
            summary,
            copied = report.copied,
            patched = report.patched_html,
            skipped = report.already_patched.len()
        )
    );

    println!("\n{}\n", t!(done_banner));

    if report.has_already_patched() {
        for path in &report.already_patched {
            debug!("already patched: {}", path.display());
        }
        warn!("{}", t!(already_patched_warning));
    }

    if let JsOutcome::PatternMismatch(_) = report.js {
        warn!("{}", t!(js_failed_warning));
    }
}

/// Keeps a double-clicked console window open long enough to be read.
pub async fn hold(wait: Duration) {
    if wait.is_zero() {
        return;
    }
    info!("{}", t!(closing_in, secs = wait.as_secs()));
    tokio::time::sleep(wait).await;
}
