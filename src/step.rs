//! WorkoutStep model
//!
//! Immutable step value objects with construction-time validation.
//! A step that exists is a valid step: duration policy, target policy
//! and repeat-control metadata are all checked in `WorkoutStep::new`,
//! so later stages never see a malformed step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// Highest zone supported by zone-based targets (5-zone model)
pub const MAX_ZONE: u8 = 5;

/// Position of a step within a plan (dense, zero-based)
///
/// A dedicated newtype so a step index cannot be confused with any
/// other integer, in particular a repeat count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StepIndex(pub u16);

impl StepIndex {
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StepIndex {
    fn from(raw: u16) -> Self {
        StepIndex(raw)
    }
}

/// Effort classification of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Warmup,
    Active,
    Recovery,
    Rest,
    Cooldown,
    Other,
}

/// Duration policy: how a step ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Duration {
    /// Fixed time in seconds
    Time { seconds: f64 },
    /// Fixed distance in meters
    Distance { meters: f64 },
    /// Open-ended; the user ends the step via an external trigger
    Open,
    /// Control step: loop back to `repeat_from` until `count` rounds complete
    RepeatUntilStepsComplete { repeat_from: StepIndex, count: u32 },
    /// Sub-step within a repeat block whose slot is itself time-bounded
    RepetitionTime { seconds: f64 },
}

/// Heart-rate target: coarse zone or absolute bpm range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeartRateTarget {
    /// Heart-rate zone 1-5
    Zone(u8),
    /// Absolute range in beats per minute
    Custom { low: u16, high: u16 },
}

/// Power target: coarse zone or absolute watt range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PowerTarget {
    /// Power zone 1-5
    Zone(u8),
    /// Absolute range in watts
    Custom { low: u16, high: u16 },
}

/// Swim stroke selector for stroke-targeted steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwimStroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    Drill,
    Mixed,
    /// No stroke restriction
    Any,
}

/// Target policy: what effort or form the step asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    HeartRate(HeartRateTarget),
    Power(PowerTarget),
    /// Absolute speed range in meters per second
    Speed { low: f64, high: f64 },
    SwimStroke(SwimStroke),
    /// No target
    Open,
}

/// Equipment tag for steps that require a training aid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    None,
    Kickboard,
    Fins,
    Paddles,
    PullBuoy,
}

/// One exercise segment or repeat-control step
///
/// Fields are private and fixed at construction; there are no setters.
/// The only way to obtain a `WorkoutStep` is through [`WorkoutStep::new`]
/// (or the [`WorkoutStep::repeat`] shorthand), which rejects every
/// step-local invariant violation with a [`StepError`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutStep {
    index: StepIndex,
    name: Option<String>,
    intensity: Intensity,
    duration: Duration,
    target: Target,
    equipment: Option<Equipment>,
}

impl WorkoutStep {
    /// Construct a validated step.
    ///
    /// Fails if the duration carries a negative or non-finite value, a
    /// repeat count below 1, a zone outside `1..=MAX_ZONE`, or a custom
    /// target range with `low > high`.
    pub fn new(
        index: StepIndex,
        intensity: Intensity,
        duration: Duration,
        target: Target,
    ) -> Result<Self, StepError> {
        let step = WorkoutStep {
            index,
            name: None,
            intensity,
            duration,
            target,
            equipment: None,
        };
        step.validate()?;
        Ok(step)
    }

    /// Shorthand for a repeat-control step: loop back to `repeat_from`
    /// for `count` rounds. Control steps carry no exercise semantics,
    /// so intensity and target are fixed to their neutral values.
    pub fn repeat(index: StepIndex, repeat_from: StepIndex, count: u32) -> Result<Self, StepError> {
        WorkoutStep::new(
            index,
            Intensity::Other,
            Duration::RepeatUntilStepsComplete { repeat_from, count },
            Target::Open,
        )
    }

    /// Attach a display label. Length bounds and truncation are the
    /// codec adapter's concern, not the model's.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an equipment tag
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn index(&self) -> StepIndex {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn duration(&self) -> &Duration {
        &self.duration
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn equipment(&self) -> Option<Equipment> {
        self.equipment
    }

    /// True for repeat-control steps, which carry loop structure rather
    /// than exercise
    pub fn is_control_step(&self) -> bool {
        matches!(self.duration, Duration::RepeatUntilStepsComplete { .. })
    }

    /// Re-check the step-local invariants. `new` runs this once; the
    /// decode path runs it again on steps rebuilt from wire records.
    pub(crate) fn validate(&self) -> Result<(), StepError> {
        match self.duration {
            Duration::Time { seconds } => check_magnitude("time", seconds)?,
            Duration::Distance { meters } => check_magnitude("distance", meters)?,
            Duration::RepetitionTime { seconds } => check_magnitude("repetition time", seconds)?,
            Duration::RepeatUntilStepsComplete { count, .. } => {
                if count < 1 {
                    return Err(StepError::ZeroRepeatCount);
                }
            }
            Duration::Open => {}
        }

        match &self.target {
            Target::HeartRate(HeartRateTarget::Zone(zone)) => check_zone("heart rate", *zone)?,
            Target::HeartRate(HeartRateTarget::Custom { low, high }) => {
                check_range("heart rate", f64::from(*low), f64::from(*high))?;
            }
            Target::Power(PowerTarget::Zone(zone)) => check_zone("power", *zone)?,
            Target::Power(PowerTarget::Custom { low, high }) => {
                check_range("power", f64::from(*low), f64::from(*high))?;
            }
            Target::Speed { low, high } => check_range("speed", *low, *high)?,
            Target::SwimStroke(_) | Target::Open => {}
        }

        Ok(())
    }
}

fn check_magnitude(kind: &'static str, value: f64) -> Result<(), StepError> {
    if !value.is_finite() || value < 0.0 {
        return Err(StepError::InvalidDuration { kind, value });
    }
    Ok(())
}

fn check_zone(target: &'static str, zone: u8) -> Result<(), StepError> {
    if !(1..=MAX_ZONE).contains(&zone) {
        return Err(StepError::ZoneOutOfRange {
            target,
            zone,
            max: MAX_ZONE,
        });
    }
    Ok(())
}

fn check_range(target: &'static str, low: f64, high: f64) -> Result<(), StepError> {
    if !low.is_finite() || !high.is_finite() {
        return Err(StepError::NonFiniteBound { target });
    }
    if low > high {
        return Err(StepError::InvertedCustomRange { target, low, high });
    }
    Ok(())
}
