//! Workout plan builder and immutable validated plan
//!
//! The builder accumulates steps in append order and enforces dense
//! zero-based indexing eagerly; `build()` runs the full cross-step
//! invariant scan and freezes the result into an immutable
//! [`WorkoutPlan`]. Rebuilding requires constructing a new builder.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlanError, Result, ValidationCause};
use crate::step::{Duration, StepIndex, WorkoutStep};

/// Sport the plan is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Cycling,
    Running,
    Swimming,
    Other,
}

/// Optional sport refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubSport {
    LapSwimming,
    OpenWater,
    IndoorCycling,
    Treadmill,
}

/// Display system for pool lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolLengthUnit {
    Metric,
    Statute,
}

/// Pool configuration, present exactly when the sport is swimming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolMetadata {
    /// Pool length in meters
    pub length_m: f64,
    /// Unit system the length should be displayed in
    pub unit: PoolLengthUnit,
}

/// Accumulator for an ordered sequence of workout steps
///
/// Owned by exactly one caller until `build()` consumes it; the
/// resulting [`WorkoutPlan`] is immutable and freely shareable.
#[derive(Debug)]
pub struct WorkoutPlanBuilder {
    name: String,
    sport: Sport,
    sub_sport: Option<SubSport>,
    pool: Option<PoolMetadata>,
    allow_empty: bool,
    steps: Vec<WorkoutStep>,
}

impl WorkoutPlanBuilder {
    /// Start an empty plan for the given sport
    pub fn new(name: impl Into<String>, sport: Sport) -> Self {
        WorkoutPlanBuilder {
            name: name.into(),
            sport,
            sub_sport: None,
            pool: None,
            allow_empty: false,
            steps: Vec::new(),
        }
    }

    /// Tag the plan with a sub-sport (e.g. lap swimming)
    pub fn sub_sport(mut self, sub_sport: SubSport) -> Self {
        self.sub_sport = Some(sub_sport);
        self
    }

    /// Permit `build()` to succeed with zero steps (a no-op workout).
    /// Disallowed by default.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Index the next appended step must carry. Callers derive step
    /// indices from here instead of counting by hand.
    pub fn next_index(&self) -> StepIndex {
        StepIndex(self.steps.len() as u16)
    }

    /// Number of steps appended so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step to the end of the plan.
    ///
    /// Dense zero-based indexing is enforced here rather than deferred
    /// to build time: the step's index must equal the current length.
    /// On failure the plan is left unchanged.
    pub fn append(&mut self, step: WorkoutStep) -> Result<&mut Self> {
        if self.steps.len() >= usize::from(u16::MAX) {
            return Err(PlanError::InvalidConfiguration {
                reason: format!("plan cannot hold more than {} steps", u16::MAX),
            });
        }
        let expected = self.next_index();
        if step.index() != expected {
            return Err(PlanError::Sequence {
                expected,
                found: step.index(),
            });
        }
        self.steps.push(step);
        Ok(self)
    }

    /// Record pool length and display unit. Only valid on swimming plans.
    pub fn set_pool_metadata(&mut self, length_m: f64, unit: PoolLengthUnit) -> Result<&mut Self> {
        if self.sport != Sport::Swimming {
            return Err(PlanError::InvalidConfiguration {
                reason: format!(
                    "pool metadata only applies to swimming plans, sport is {:?}",
                    self.sport
                ),
            });
        }
        if !length_m.is_finite() || length_m <= 0.0 {
            return Err(PlanError::InvalidConfiguration {
                reason: format!("pool length must be positive, got {}", length_m),
            });
        }
        self.pool = Some(PoolMetadata { length_m, unit });
        Ok(self)
    }

    /// Validate the full invariant set and freeze the plan.
    ///
    /// Fails with the first violation in step order; the builder is
    /// consumed either way.
    pub fn build(self) -> Result<WorkoutPlan> {
        if self.steps.is_empty() && !self.allow_empty {
            return Err(PlanError::EmptyPlan);
        }
        let declared = self.steps.len() as u16;
        WorkoutPlan::from_parts(
            self.name,
            self.sport,
            self.sub_sport,
            self.pool,
            declared,
            self.steps,
        )
    }
}

/// A validated, immutable workout: ordered steps plus metadata
///
/// Only produced by [`WorkoutPlanBuilder::build`] or
/// [`WorkoutPlan::from_parts`]; every instance satisfies the full
/// invariant set and is safe to hand to a codec adapter or share
/// across threads read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    name: String,
    sport: Sport,
    sub_sport: Option<SubSport>,
    pool: Option<PoolMetadata>,
    steps: Vec<WorkoutStep>,
}

impl WorkoutPlan {
    /// Assemble and validate a plan from raw parts.
    ///
    /// This is the decode-side entry point: codec adapters reconstruct
    /// steps from wire records and hand everything here, so a decoded
    /// plan passes exactly the same checks as a built one. The scan
    /// walks steps in order, tracking the set of indices seen so far;
    /// a control step's back-reference must already be in that set,
    /// which rejects self- and forward-references. With dense indexing
    /// the seen set at position `i` is exactly `0..i`.
    pub fn from_parts(
        name: String,
        sport: Sport,
        sub_sport: Option<SubSport>,
        pool: Option<PoolMetadata>,
        declared_steps: u16,
        steps: Vec<WorkoutStep>,
    ) -> Result<WorkoutPlan> {
        if name.trim().is_empty() {
            return Err(PlanError::InvalidConfiguration {
                reason: "workout name must not be empty".to_string(),
            });
        }

        match (&sport, &pool) {
            (Sport::Swimming, None) => {
                return Err(PlanError::InvalidConfiguration {
                    reason: "swimming plans require pool metadata".to_string(),
                });
            }
            (Sport::Swimming, Some(pool)) => {
                if !pool.length_m.is_finite() || pool.length_m <= 0.0 {
                    return Err(PlanError::InvalidConfiguration {
                        reason: format!("pool length must be positive, got {}", pool.length_m),
                    });
                }
            }
            (_, Some(_)) => {
                return Err(PlanError::InvalidConfiguration {
                    reason: format!(
                        "pool metadata only applies to swimming plans, sport is {:?}",
                        sport
                    ),
                });
            }
            (_, None) => {}
        }

        if steps.len() != usize::from(declared_steps) {
            // report at the first position where declared and actual diverge
            let actual_capped = steps.len().min(usize::from(u16::MAX)) as u16;
            let index = StepIndex(declared_steps.min(actual_capped));
            warn!(
                declared = declared_steps,
                actual = steps.len(),
                "step count mismatch"
            );
            return Err(PlanError::Validation {
                index,
                cause: ValidationCause::StepCountMismatch {
                    declared: declared_steps,
                    actual: steps.len(),
                },
            });
        }

        for (position, step) in steps.iter().enumerate() {
            let expected = StepIndex(position as u16);
            if step.index() != expected {
                return Err(PlanError::Validation {
                    index: step.index(),
                    cause: ValidationCause::NonContiguousIndex { expected },
                });
            }
            if let Err(source) = step.validate() {
                return Err(PlanError::Validation {
                    index: expected,
                    cause: ValidationCause::InvalidStep(source),
                });
            }
            if let Duration::RepeatUntilStepsComplete { repeat_from, .. } = step.duration() {
                if *repeat_from == expected {
                    return Err(PlanError::Validation {
                        index: expected,
                        cause: ValidationCause::SelfReference,
                    });
                }
                if *repeat_from > expected {
                    return Err(PlanError::Validation {
                        index: expected,
                        cause: ValidationCause::ForwardReference {
                            target: *repeat_from,
                        },
                    });
                }
            }
        }

        debug!(name = %name, steps = steps.len(), sport = ?sport, "validated workout plan");

        Ok(WorkoutPlan {
            name,
            sport,
            sub_sport,
            pool,
            steps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn sub_sport(&self) -> Option<SubSport> {
        self.sub_sport
    }

    pub fn pool(&self) -> Option<&PoolMetadata> {
        self.pool.as_ref()
    }

    pub fn steps(&self) -> &[WorkoutStep] {
        &self.steps
    }

    /// Declared step count as carried by wire formats
    pub fn step_count(&self) -> u16 {
        self.steps.len() as u16
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
