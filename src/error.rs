//! Unified error hierarchy for planrs
//!
//! Every violation is raised synchronously at the point it occurs:
//! step construction, append, or build. Nothing is deferred to the
//! codec boundary, and no error is retryable; the caller fixes the
//! plan and rebuilds.

use thiserror::Error;

use crate::step::StepIndex;

/// Top-level error type for all planrs operations
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed single step: bad range, zone, or custom target bounds
    #[error("invalid step: {0}")]
    InvalidStep(#[from] StepError),

    /// Non-contiguous append: a step's index must equal the plan length
    #[error("out-of-sequence append: expected index {expected}, found {found}")]
    Sequence {
        expected: StepIndex,
        found: StepIndex,
    },

    /// Pool metadata misapplied, or other plan-level misconfiguration
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Zero steps at build time when empty plans are disallowed
    #[error("plan contains no steps")]
    EmptyPlan,

    /// Cross-step invariant violation found by the build-time scan
    #[error("validation failed at step {index}: {cause}")]
    Validation {
        index: StepIndex,
        cause: ValidationCause,
    },

    /// Codec adapter failure; never surfaces as a partially decoded plan
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Step-local invariant violations, detected at construction
#[derive(Debug, Error)]
pub enum StepError {
    /// Duration value is negative or not finite
    #[error("{kind} duration must be finite and non-negative, got {value}")]
    InvalidDuration { kind: &'static str, value: f64 },

    /// Repeat block with a zero repetition count
    #[error("repeat count must be at least 1")]
    ZeroRepeatCount,

    /// Zone-based target outside the supported zone range
    #[error("{target} zone must be within 1..={max}, got {zone}")]
    ZoneOutOfRange {
        target: &'static str,
        zone: u8,
        max: u8,
    },

    /// Custom target range with low above high
    #[error("custom {target} range is inverted: low {low} > high {high}")]
    InvertedCustomRange {
        target: &'static str,
        low: f64,
        high: f64,
    },

    /// Custom target bound that is NaN or infinite
    #[error("custom {target} bound is not finite")]
    NonFiniteBound { target: &'static str },
}

/// Cross-step invariants checked by the build-time linear scan
#[derive(Debug, Error)]
pub enum ValidationCause {
    /// Repeat block pointing at a step that comes later in the plan
    #[error("repeat block references a later step ({target})")]
    ForwardReference { target: StepIndex },

    /// Repeat block pointing at itself
    #[error("repeat block references itself")]
    SelfReference,

    /// Step whose index does not match its position in the sequence
    #[error("step index does not match its position (expected {expected})")]
    NonContiguousIndex { expected: StepIndex },

    /// Declared step count disagrees with the actual number of steps
    #[error("declared step count {declared} does not match actual count {actual}")]
    StepCountMismatch { declared: u16, actual: usize },

    /// Step that fails its own construction-time invariants (decode path)
    #[error(transparent)]
    InvalidStep(StepError),
}

/// Codec adapter failures: malformed payloads, unsupported framing
#[derive(Debug, Error)]
pub enum CodecError {
    /// Plan could not be serialized into the wire format
    #[error("serialization failed: {reason}")]
    Serialize { reason: String },

    /// Payload could not be deserialized into a plan record
    #[error("deserialization failed: {reason}")]
    Deserialize { reason: String },

    /// Payload does not start with the expected magic bytes
    #[error("unrecognized payload: bad magic bytes")]
    BadMagic,

    /// Payload framed with a format version this build does not support
    #[error("unsupported format version {version}")]
    UnsupportedVersion { version: u8 },

    /// Payload shorter than the fixed header
    #[error("payload truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Result type alias for planrs operations
pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// All plan errors are deterministic and terminal for the current
    /// build attempt; none should be retried.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Sequence { expected, found } => format!(
                "Steps must be appended in order: the next step should have index {}, not {}.",
                expected, found
            ),
            PlanError::EmptyPlan => {
                "The workout has no steps. Add at least one step before building.".to_string()
            }
            PlanError::Validation { index, cause } => {
                format!("Step {} is invalid: {}", index, cause)
            }
            PlanError::Codec(_) => {
                "The workout file could not be read. It may be corrupt or from an unsupported version.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_error_is_retryable() {
        let err = PlanError::EmptyPlan;
        assert!(!err.is_retryable());

        let err = PlanError::Codec(CodecError::BadMagic);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_messages() {
        let err = PlanError::Sequence {
            expected: StepIndex(2),
            found: StepIndex(5),
        };
        assert!(err.user_message().contains("index 2"));

        let err = PlanError::Validation {
            index: StepIndex(3),
            cause: ValidationCause::SelfReference,
        };
        assert!(err.user_message().contains("Step 3"));
    }

    #[test]
    fn test_display_carries_offending_index() {
        let err = PlanError::Validation {
            index: StepIndex(4),
            cause: ValidationCause::ForwardReference {
                target: StepIndex(7),
            },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("step 4"));
        assert!(rendered.contains("(7)"));
    }
}
