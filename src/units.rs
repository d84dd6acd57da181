//! Pure unit-conversion helpers
//!
//! Not part of the plan model; kept as free functions for callers
//! assembling steps from non-SI quantities.

/// NIST yard-to-meter conversion factor (SP 811, p. 63)
pub const YD_TO_M: f64 = 0.9144;

pub fn yards_to_meters(yards: f64) -> f64 {
    yards * YD_TO_M
}

pub fn meters_to_yards(meters: f64) -> f64 {
    meters / YD_TO_M
}

pub fn kph_to_mps(kph: f64) -> f64 {
    kph * (1000.0 / 3600.0)
}

pub fn minutes_to_seconds(minutes: f64) -> f64 {
    minutes * 60.0
}
