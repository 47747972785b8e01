/// Convenience alias used across the crate.
pub type CountdownResult<T> = Result<T, CountdownError>;

/// Errors surfaced at the fallible edges of the widget: configuration, animation descriptions and
/// rendering. The timing core itself never produces these.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// Invalid configuration or out-of-contract input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed animation description.
    #[error("animation error: {0}")]
    Animation(String),

    /// SVG construction, rasterization or image encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountdownError {
    /// Build a [`CountdownError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CountdownError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`CountdownError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CountdownError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
