//! One-line status messages for operations without a resource to show.

use std::fmt;

/// Outcome line for imports, exports and similar bulk actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(
            OperationStatus::success("Exported 2 bottle(s)").to_string(),
            "Success: Exported 2 bottle(s)\n"
        );
        assert!(OperationStatus::failure("nothing to import")
            .to_string()
            .starts_with("Error:"));
    }
}
