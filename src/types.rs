//! Core types for game configuration and round records.

/// Timing parameters for the game loop.
///
/// Injected at construction instead of living as module-level constants, so
/// tests and unusual boards can tune them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Sleep between button samples in the polling loop.
    pub poll_interval_ms: u32,

    /// Dead time after a round before the next press is accepted, absorbing
    /// accidental double presses.
    pub cooldown_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            cooldown_ms: 500,
        }
    }
}

/// Record of one completed stopwatch round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundReport {
    /// Elapsed time between the two presses, from the monotonic tick counter.
    pub elapsed_ms: u64,

    /// Auxiliary clock seconds sampled at the start press, if a clock is
    /// attached and the read succeeded.
    pub start_seconds: Option<u8>,

    /// Auxiliary clock seconds sampled at the stop press.
    pub end_seconds: Option<u8>,
}

impl RoundReport {
    /// Seconds the auxiliary clock advanced during the round, modulo one
    /// minute.
    ///
    /// Useful as a coarse drift cross-check against `elapsed_ms` for rounds
    /// shorter than a minute. `None` when either edge reading is missing.
    pub fn clock_delta_seconds(&self) -> Option<u8> {
        let start = i16::from(self.start_seconds?);
        let end = i16::from(self.end_seconds?);
        Some((end - start).rem_euclid(60) as u8)
    }
}
