use looplist_infrastructure::logging;

use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

/// Notices queued since the last call, oldest first
pub async fn take_notifications(state: &AppState) -> Result<Vec<String>, CommandError> {
    Ok(state.services.feedback.drain().await)
}

/// Log files in the active log directory; empty before the logger starts
pub async fn get_log_files() -> Result<Vec<String>, CommandError> {
    let Some(log_dir) = logging::get_log_dir() else {
        return Ok(Vec::new());
    };

    let files = logging::list_log_files(&log_dir)
        .map_err(|e| CommandError::infrastructure(format!("Failed to list log files: {e}")))?;
    Ok(files
        .into_iter()
        .map(|path| path.display().to_string())
        .collect())
}
