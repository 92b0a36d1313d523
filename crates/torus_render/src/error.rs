//! Render error types

use std::fmt;

use crate::params::ValidationError;

/// Error type for frame rendering
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A sampled point landed exactly on the viewer plane (z == 0)
    DivideByZero { theta: f64, phi: f64 },
    /// The frame parameters failed validation
    InvalidParams(Vec<ValidationError>),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DivideByZero { theta, phi } => write!(
                f,
                "Render error: sample at theta={}, phi={} has zero depth",
                theta, phi
            ),
            RenderError::InvalidParams(errors) => {
                write!(f, "Render error: invalid parameters")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::DivideByZero { .. } => None,
            RenderError::InvalidParams(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}

impl From<Vec<ValidationError>> for RenderError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RenderError::InvalidParams(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_divide_by_zero_display() {
        let err = RenderError::DivideByZero { theta: 0.0, phi: 1.5 };
        let msg = format!("{}", err);
        assert!(msg.contains("zero depth"));
        assert!(msg.contains("phi=1.5"));
    }

    #[test]
    fn test_invalid_params_lists_every_error() {
        let err: RenderError = vec![
            ValidationError::MaxCodeOutOfRange(16),
            ValidationError::EmptyRaster { width: 0, height: 0 },
        ]
        .into();
        let msg = format!("{}", err);
        assert!(msg.contains("max_code"));
        assert!(msg.contains("0x0"));
    }

    #[test]
    fn test_error_source() {
        let err = RenderError::DivideByZero { theta: 0.0, phi: 0.0 };
        assert!(err.source().is_none());

        let err = RenderError::InvalidParams(vec![ValidationError::MaxCodeOutOfRange(0)]);
        assert!(err.source().is_some());
    }
}
