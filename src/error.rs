use thiserror::Error;

/// Errors raised while building an optimizer.
///
/// Everything that happens after construction is modelled as data:
/// infeasible particles simply carry no fitness for that step.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// The shape has no dimensions.
    #[error("shape must have at least 1 dimension")]
    InvalidShape,

    /// The evaluation pool could not be spawned.
    #[error("could not build evaluation pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SwarmError>;

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SwarmError::InvalidShape.to_string(),
            "shape must have at least 1 dimension"
        );
    }
}
