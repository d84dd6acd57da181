//! Binary reference adapter
//!
//! Frames a bincode-serialized plan record behind a fixed header of
//! magic bytes and a format version, so foreign or stale payloads are
//! rejected before deserialization is attempted.

use tracing::trace;

use super::{Codec, PlanRecord};
use crate::error::{CodecError, Result};
use crate::plan::WorkoutPlan;

const MAGIC: [u8; 4] = *b"PLNR";
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

/// Codec that frames plans as `MAGIC | version | bincode(record)`
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryCodec;

impl BinaryCodec {
    pub fn new() -> Self {
        BinaryCodec
    }
}

impl Codec for BinaryCodec {
    fn encode(&self, plan: &WorkoutPlan) -> std::result::Result<Vec<u8>, CodecError> {
        let record = PlanRecord::from_plan(plan);
        let body = bincode::serialize(&record).map_err(|err| CodecError::Serialize {
            reason: err.to_string(),
        })?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&body);
        trace!(name = plan.name(), bytes = bytes.len(), "encoded plan as binary");
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<WorkoutPlan> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            }
            .into());
        }
        if bytes[..MAGIC.len()] != MAGIC {
            return Err(CodecError::BadMagic.into());
        }
        let version = bytes[MAGIC.len()];
        if version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion { version }.into());
        }

        let record: PlanRecord =
            bincode::deserialize(&bytes[HEADER_LEN..]).map_err(|err| CodecError::Deserialize {
                reason: err.to_string(),
            })?;
        record.into_plan()
    }
}
