use crate::generate::GenerationClient;
use crate::prompt;
use crate::wire::GenerationRequest;

pub const OFFLINE: &str = "System Offline. Monitoring disabled.";
pub const INTERRUPTED: &str = "Connection Interrupted.";
pub const UNKNOWN: &str = "Status Unknown";

/// One-line status report for `lines`. Never fails; faults map to fixed strings.
pub async fn summarize(client: &GenerationClient, lines: &[String]) -> String {
    let req = GenerationRequest::text(prompt::log_summary_instruction(lines));
    match client.complete(&req).await {
        None => OFFLINE.to_string(),
        Some(Ok(text)) if text.trim().is_empty() => UNKNOWN.to_string(),
        Some(Ok(text)) => text.trim().to_string(),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "log summary failed");
            INTERRUPTED.to_string()
        }
    }
}
