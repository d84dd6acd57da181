//! JSON reference adapter
//!
//! A conforming codec built on serde_json, mainly used for round-trip
//! verification and human inspection of encoded plans.

use tracing::trace;

use super::{Codec, PlanRecord};
use crate::error::{CodecError, Result};
use crate::plan::WorkoutPlan;

/// Codec that frames plans as a single JSON document
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        JsonCodec
    }
}

impl Codec for JsonCodec {
    fn encode(&self, plan: &WorkoutPlan) -> std::result::Result<Vec<u8>, CodecError> {
        let record = PlanRecord::from_plan(plan);
        let bytes = serde_json::to_vec(&record).map_err(|err| CodecError::Serialize {
            reason: err.to_string(),
        })?;
        trace!(name = plan.name(), bytes = bytes.len(), "encoded plan as JSON");
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<WorkoutPlan> {
        let record: PlanRecord =
            serde_json::from_slice(bytes).map_err(|err| CodecError::Deserialize {
                reason: err.to_string(),
            })?;
        record.into_plan()
    }
}
