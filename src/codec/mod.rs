//! Codec adapter boundary
//!
//! A [`Codec`] turns a validated [`WorkoutPlan`] into bytes and back.
//! The core guarantees the plan handed to `encode` is internally
//! consistent; adapters guarantee `decode` never yields a plan that
//! skipped validation. Wire records mirror the shape of the external
//! format's workout and workout-step messages (including the explicit
//! `num_valid_steps` field), so decoding re-checks the declared count.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::plan::{PoolLengthUnit, PoolMetadata, Sport, SubSport, WorkoutPlan};
use crate::step::{Duration, Equipment, Intensity, StepIndex, Target, WorkoutStep};

pub mod binary;
pub mod json;

pub use binary::BinaryCodec;
pub use json::JsonCodec;

/// Translates between the validated plan model and one wire format
pub trait Codec {
    /// Serialize a validated plan into this adapter's wire format
    fn encode(&self, plan: &WorkoutPlan) -> std::result::Result<Vec<u8>, CodecError>;

    /// Decode wire bytes and fully re-validate the resulting plan.
    /// Adapter failures surface as [`crate::PlanError::Codec`];
    /// invariant violations in the payload surface as the same
    /// validation errors a fresh build would produce.
    fn decode(&self, bytes: &[u8]) -> Result<WorkoutPlan>;
}

/// Wire form of the workout message plus its step messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanRecord {
    pub name: String,
    pub sport: Sport,
    pub sub_sport: Option<SubSport>,
    pub pool_length_m: Option<f64>,
    pub pool_length_unit: Option<PoolLengthUnit>,
    pub num_valid_steps: u16,
    pub steps: Vec<StepRecord>,
}

/// Wire form of a single workout-step message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StepRecord {
    pub message_index: u16,
    pub name: Option<String>,
    pub intensity: Intensity,
    pub duration: Duration,
    pub target: Target,
    pub equipment: Option<Equipment>,
}

impl PlanRecord {
    pub(crate) fn from_plan(plan: &WorkoutPlan) -> Self {
        PlanRecord {
            name: plan.name().to_string(),
            sport: plan.sport(),
            sub_sport: plan.sub_sport(),
            pool_length_m: plan.pool().map(|pool| pool.length_m),
            pool_length_unit: plan.pool().map(|pool| pool.unit),
            num_valid_steps: plan.step_count(),
            steps: plan.steps().iter().map(StepRecord::from_step).collect(),
        }
    }

    /// Rebuild a validated plan from wire records. Steps go back
    /// through [`WorkoutStep::new`] and the assembled parts through
    /// [`WorkoutPlan::from_parts`], so a malformed payload fails with
    /// the same errors a fresh build would.
    pub(crate) fn into_plan(self) -> Result<WorkoutPlan> {
        let mut steps = Vec::with_capacity(self.steps.len());
        for record in self.steps {
            steps.push(record.into_step()?);
        }

        let pool = match (self.pool_length_m, self.pool_length_unit) {
            (Some(length_m), Some(unit)) => Some(PoolMetadata { length_m, unit }),
            (None, None) => None,
            _ => {
                return Err(CodecError::Deserialize {
                    reason: "pool length and unit must be present together".to_string(),
                }
                .into());
            }
        };

        WorkoutPlan::from_parts(
            self.name,
            self.sport,
            self.sub_sport,
            pool,
            self.num_valid_steps,
            steps,
        )
    }
}

impl StepRecord {
    fn from_step(step: &WorkoutStep) -> Self {
        StepRecord {
            message_index: step.index().0,
            name: step.name().map(str::to_string),
            intensity: step.intensity(),
            duration: step.duration().clone(),
            target: step.target().clone(),
            equipment: step.equipment(),
        }
    }

    fn into_step(self) -> Result<WorkoutStep> {
        let mut step = WorkoutStep::new(
            StepIndex(self.message_index),
            self.intensity,
            self.duration,
            self.target,
        )?;
        if let Some(name) = self.name {
            step = step.named(name);
        }
        if let Some(equipment) = self.equipment {
            step = step.with_equipment(equipment);
        }
        Ok(step)
    }
}
