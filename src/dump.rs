//! Human-readable plan dump
//!
//! Renders a decoded plan as a table for review. This is write-only
//! from the core's perspective: nothing here feeds back into
//! validation or encoding.

use tabled::{Table, Tabled};

use crate::plan::{PoolLengthUnit, WorkoutPlan};
use crate::step::{Duration, Equipment, HeartRateTarget, PowerTarget, Target, WorkoutStep};

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    index: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Intensity")]
    intensity: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Equipment")]
    equipment: String,
}

impl StepRow {
    fn from_step(step: &WorkoutStep) -> Self {
        StepRow {
            index: step.index().0,
            name: step.name().unwrap_or("-").to_string(),
            intensity: format!("{:?}", step.intensity()),
            duration: duration_cell(step.duration()),
            target: target_cell(step.target()),
            equipment: match step.equipment() {
                None | Some(Equipment::None) => "-".to_string(),
                Some(equipment) => format!("{:?}", equipment),
            },
        }
    }
}

fn duration_cell(duration: &Duration) -> String {
    match duration {
        Duration::Time { seconds } => format!("{} s", seconds),
        Duration::Distance { meters } => format!("{:.1} m", meters),
        Duration::Open => "open".to_string(),
        Duration::RepeatUntilStepsComplete { repeat_from, count } => {
            format!("repeat {}x from step {}", count, repeat_from)
        }
        Duration::RepetitionTime { seconds } => format!("{} s per rep", seconds),
    }
}

fn target_cell(target: &Target) -> String {
    match target {
        Target::HeartRate(HeartRateTarget::Zone(zone)) => format!("HR zone {}", zone),
        Target::HeartRate(HeartRateTarget::Custom { low, high }) => {
            format!("HR {}-{} bpm", low, high)
        }
        Target::Power(PowerTarget::Zone(zone)) => format!("power zone {}", zone),
        Target::Power(PowerTarget::Custom { low, high }) => format!("{}-{} W", low, high),
        Target::Speed { low, high } => format!("{:.2}-{:.2} m/s", low, high),
        Target::SwimStroke(stroke) => format!("{:?} stroke", stroke),
        Target::Open => "-".to_string(),
    }
}

/// Render a plan as a header line plus one table row per step
pub fn plan_table(plan: &WorkoutPlan) -> String {
    let mut header = format!("{} ({:?}", plan.name(), plan.sport());
    if let Some(sub_sport) = plan.sub_sport() {
        header.push_str(&format!(", {:?}", sub_sport));
    }
    header.push(')');
    if let Some(pool) = plan.pool() {
        let unit = match pool.unit {
            PoolLengthUnit::Metric => "m pool, metric",
            PoolLengthUnit::Statute => "m pool, statute",
        };
        header.push_str(&format!(" - {:.2} {}", pool.length_m, unit));
    }

    let table = Table::new(plan.steps().iter().map(StepRow::from_step)).to_string();
    format!("{}\n{}", header, table)
}
