/// Convenience result type used across termfx.
pub type TermfxResult<T> = Result<T, TermfxError>;

/// Errors returned by engine and configuration APIs.
#[derive(thiserror::Error, Debug)]
pub enum TermfxError {
    /// Invalid effect options or engine parameters.
    #[error("config error: {0}")]
    Config(String),

    /// Engine state broke a contract, e.g. a dangling path or scene handle.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A backend could not address or draw a cell.
    #[error("render error: {0}")]
    Render(String),

    /// Terminal or file I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TermfxError {
    /// Build a [`TermfxError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TermfxError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build a [`TermfxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
