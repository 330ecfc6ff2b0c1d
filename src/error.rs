//! Scene construction error types.
//!
//! Only construction-time code is fallible: reading and validating
//! `assets/tree.toml` and turning palette entries into colours.  The per-frame
//! animation path is total and never returns these.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use particle_tree::error::SceneResult;
//!
//! fn build() -> SceneResult<()> {
//!     let config = load_scene_config_from("assets/tree.toml")?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```
use std::fmt;

/// Top-level error enum for scene construction.
#[derive(Debug)]
pub enum SceneError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::SceneConfig`].
    ConfigParse {
        /// Path that was parsed.
        path: String,
        /// Parser message (includes line/column).
        message: String,
    },

    /// A numeric parameter is outside the range the generators can work with.
    InvalidParameter {
        /// Config key as written in `assets/tree.toml`, e.g. `foliage_scatter_radius`.
        name: String,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// A palette entry is not a `#RRGGBB` / `#RRGGBBAA` hex string.
    InvalidColor {
        /// The rejected string.
        value: String,
    },

    /// A family palette is empty or its weights cannot form a distribution.
    InvalidPalette {
        /// Family whose palette was rejected.
        family: &'static str,
        /// Reason reported by the weighted sampler.
        reason: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::ConfigRead { path, source } => {
                write!(f, "failed to read '{}': {}", path, source)
            }
            SceneError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            SceneError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(
                f,
                "parameter '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
            SceneError::InvalidColor { value } => {
                write!(f, "'{}' is not a hex colour", value)
            }
            SceneError::InvalidPalette { family, reason } => {
                write!(f, "palette for {} is unusable: {}", family, reason)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `SceneError` as the error type.
pub type SceneResult<T> = Result<T, SceneError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: impl Into<String>, value: f32) -> SceneResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidParameter {
            name: name.into(),
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `min <= max` and both are strictly positive.
pub fn require_range(name: &str, min: f32, max: f32) -> SceneResult<()> {
    require_positive(format!("{name}_min"), min)?;
    require_positive(format!("{name}_max"), max)?;
    if min > max {
        return Err(SceneError::InvalidParameter {
            name: format!("{name}_min"),
            value: min,
            expected: "<= the matching _max",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepts_small_values() {
        assert!(require_positive("x", 1e-6).is_ok());
    }

    #[test]
    fn positive_rejects_zero_nan_and_infinity() {
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f32::NAN).is_err());
        assert!(require_positive("x", f32::INFINITY).is_err());
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = require_range("foliage_scale", 0.5, 0.1).unwrap_err();
        assert!(
            err.to_string().contains("foliage_scale_min"),
            "message should name the offending key: {err}"
        );
    }

    #[test]
    fn range_accepts_degenerate_equal_bounds() {
        assert!(require_range("halo_speed", 1.0, 1.0).is_ok());
    }
}
