#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CutError {
    /// Malformed demand table or parameters. Raised before any profile runs.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A required length plus its cutting gap exceeds every candidate stock
    /// length.
    #[error(
        "profile {profile_code}: piece of length {length} plus cutting gap {cutting_gap} exceeds the longest candidate stock length {longest_stock}"
    )]
    InfeasibleItem {
        profile_code: String,
        length: f64,
        cutting_gap: f64,
        longest_stock: f64,
    },

    #[error("no candidate stock lengths to evaluate")]
    NoCandidate,
}

pub type Result<T> = std::result::Result<T, CutError>;
