use crate::error::BackendError;

pub const UNREACHABLE_MESSAGE: &str = "Could not reach the backend. Is the backend reachable?";

/// User-facing text for a failed backend call. Validation details are
/// kept verbatim, one per line.
pub fn format_error(error: &BackendError) -> String {
    match error {
        BackendError::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
        BackendError::Validation { message, errors } | BackendError::Conflict { message, errors } => {
            if errors.is_empty() {
                message.clone()
            } else {
                let details: Vec<String> = errors.iter().map(|e| format!("- {}", e)).collect();
                format!("{}:\n{}", message, details.join("\n"))
            }
        }
        BackendError::NotFound(message) => message.clone(),
        BackendError::Server { message, .. } => message.clone(),
        BackendError::Decode(detail) => format!("Unexpected response from backend: {}", detail),
    }
}
