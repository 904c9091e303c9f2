use thiserror::Error;

/// Why an aspect selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selected {0} aspects instead of 3")]
    WrongCount(usize),
    #[error("aspect \"{0}\" selected more than once")]
    Duplicate(&'static str),
}

/// Everything that can go wrong during one submission. All variants are
/// recoverable and rendered inline on the page; none terminate the process.
#[derive(Debug, Error)]
pub enum CritiqueError {
    #[error("Please select exactly 3 aspects for the critique.")]
    Selection(#[from] SelectionError),

    #[error("File not uploaded")]
    MissingFile,

    #[error("Unsupported image type \"{0}\". Please upload a JPEG or PNG photo.")]
    UnsupportedImageType(String),

    #[error("An error occurred: {0}")]
    External(String),
}

impl CritiqueError {
    /// Selection-count problems render as a warning (the sidebar already
    /// nags about it); everything else renders as an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, CritiqueError::Selection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_errors_keep_the_underlying_message() {
        let err = CritiqueError::External("rate limit exceeded".to_string());
        let text = err.to_string();
        assert!(text.contains("An error occurred"));
        assert!(text.contains("rate limit exceeded"));
    }

    #[test]
    fn selection_errors_render_the_fixed_instruction() {
        let err = CritiqueError::from(SelectionError::WrongCount(2));
        assert_eq!(
            err.to_string(),
            "Please select exactly 3 aspects for the critique."
        );
        assert!(err.is_warning());
    }

    #[test]
    fn missing_file_matches_the_original_wording() {
        assert_eq!(CritiqueError::MissingFile.to_string(), "File not uploaded");
        assert!(!CritiqueError::MissingFile.is_warning());
    }
}
