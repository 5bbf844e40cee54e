use colored::Colorize;
use reqwest::StatusCode;

use crate::client::ApiError;

/// Format an error for CLI display with contextual help messages.
pub fn display_error(err: &anyhow::Error) {
    eprintln!("  {} {}", "ERROR".red().bold(), err);
    // Print cause chain
    for cause in err.chain().skip(1) {
        eprintln!("        {} {cause}", "caused by:".dimmed());
    }

    if let Some(hint) = hint(err) {
        eprintln!("        {hint}");
    }
}

/// Follow-up advice for API failures found anywhere in the cause chain.
pub(crate) fn hint(err: &anyhow::Error) -> Option<String> {
    let api = err.chain().find_map(|e| e.downcast_ref::<ApiError>())?;

    if api.is_connect() {
        return Some(format!(
            "Cannot reach the YouGile API. Check base_url: {}",
            "yougile config show".dimmed()
        ));
    }
    if api.is_rejected_key() {
        return Some(format!(
            "The API key was rejected. Log in again: {}",
            "yougile auth login --email <email>".dimmed()
        ));
    }
    if matches!(
        api.status(),
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    ) {
        return Some("Check the email and password for this account.".to_string());
    }
    None
}
