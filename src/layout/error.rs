#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("duplicate match id: {0}")]
    DuplicateMatchId(String),
    #[error("expected exactly 1 final (match with no winner destination), got {0}")]
    RootCount(usize),
    #[error("bracket size must be a power of two >= 2, got {0}")]
    BracketSize(usize),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
