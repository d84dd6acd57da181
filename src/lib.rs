// Library interface for planrs modules
// Allows integration tests and host applications to access the plan model

pub mod codec;
pub mod dump;
pub mod error;
pub mod logging;
pub mod plan;
pub mod step;
pub mod units;

// Re-export commonly used types for convenience
pub use codec::{BinaryCodec, Codec, JsonCodec};
pub use error::{CodecError, PlanError, Result, StepError, ValidationCause};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use plan::{PoolLengthUnit, PoolMetadata, Sport, SubSport, WorkoutPlan, WorkoutPlanBuilder};
pub use step::{
    Duration, Equipment, HeartRateTarget, Intensity, PowerTarget, StepIndex, SwimStroke, Target,
    WorkoutStep, MAX_ZONE,
};
