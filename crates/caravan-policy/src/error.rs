//! Error types for the `caravan-policy` crate.
//!
//! Classification and filtering are total functions and never fail; errors
//! only arise at the configuration boundary, when loading or validating a
//! policy config.

use caravan_types::TechTier;

/// Errors that can occur while loading or validating policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read policy config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse policy config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The relationship bracket bounds do not strictly ascend with tier.
    #[error("bracket floor for {tier:?} is {bound}, not above the previous floor {previous}")]
    NonMonotonicBrackets {
        /// The tier whose lower bound is out of order.
        tier: TechTier,
        /// The offending lower bound.
        bound: i32,
        /// The lower bound of the preceding tier.
        previous: i32,
    },
}

impl From<serde_yml::Error> for PolicyError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
