//! Button-driven stopwatch state machine.
//!
//! Provides [`StopwatchGame`] which turns raw button samples into stopwatch
//! sessions: the first press starts the timer, the second press stops it and
//! yields the elapsed time. The machine is polled - call [`service`] at a
//! short fixed interval; each call samples the button exactly once and never
//! blocks.
//!
//! [`service`]: StopwatchGame::service

use embedded_hal::digital::InputPin;

use crate::button::Button;
use crate::time::{TickInstant, TickSource};
use crate::types::GameConfig;

/// The current phase of a stopwatch game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Waiting for the press that starts a session.
    Idle,
    /// Start press seen; waiting for the button to come back up.
    ArmedWaitingRelease,
    /// Stopwatch running; waiting for the stop press.
    Timing,
    /// Stop press seen; waiting for the button to come back up.
    WaitingReleaseAfterStop,
    /// Post-round dead time before the next session may start.
    Cooldown,
}

/// Session-edge notifications produced by [`StopwatchGame::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameEvent {
    /// The start press was sampled; the stopwatch is now running.
    TimerStarted,
    /// The stop press was sampled; the session is over.
    RoundFinished {
        /// Wraparound-safe time between the two presses.
        elapsed_ms: u64,
    },
}

/// Polled stopwatch driven by a single button.
///
/// Owns the button and borrows the tick source; configuration is injected at
/// construction. Exactly one session is in flight at a time - the machine
/// walks `Idle -> ArmedWaitingRelease -> Timing -> WaitingReleaseAfterStop ->
/// Cooldown -> Idle` and emits a [`GameEvent`] at each session edge.
///
/// The auxiliary real-time clock is deliberately absent here: elapsed time
/// comes from the tick counter alone, and clock reads stay with the caller.
///
/// # Type Parameters
/// * `'t` - Lifetime of the tick source reference
/// * `I` - Tick instant type
/// * `P` - Button input pin type
/// * `T` - Tick source implementation type
pub struct StopwatchGame<'t, I: TickInstant, P: InputPin, T: TickSource<I>> {
    button: Button<P>,
    ticks: &'t T,
    config: GameConfig,
    phase: GamePhase,
    session_start: Option<I>,
    cooldown_start: Option<I>,
}

impl<'t, I: TickInstant, P: InputPin, T: TickSource<I>> StopwatchGame<'t, I, P, T> {
    /// Creates an idle game.
    pub fn new(button: Button<P>, ticks: &'t T, config: GameConfig) -> Self {
        Self {
            button,
            ticks,
            config,
            phase: GamePhase::Idle,
            session_start: None,
            cooldown_start: None,
        }
    }

    /// Samples the button once and advances the machine.
    ///
    /// # Returns
    /// * `Ok(Some(event))` - A session edge was crossed on this sample
    /// * `Ok(None)` - No transition, or an internal one
    /// * `Err` - The input pin could not be read
    pub fn service(&mut self) -> Result<Option<GameEvent>, P::Error> {
        match self.phase {
            GamePhase::Idle => {
                if self.button.is_pressed()? {
                    self.session_start = Some(self.ticks.now());
                    self.phase = GamePhase::ArmedWaitingRelease;
                    return Ok(Some(GameEvent::TimerStarted));
                }
            }
            GamePhase::ArmedWaitingRelease => {
                if !self.button.is_pressed()? {
                    self.phase = GamePhase::Timing;
                }
            }
            GamePhase::Timing => {
                if self.button.is_pressed()? {
                    let start = self.session_start.take().unwrap();
                    let elapsed_ms = self.ticks.now().millis_since(start);
                    self.phase = GamePhase::WaitingReleaseAfterStop;
                    return Ok(Some(GameEvent::RoundFinished { elapsed_ms }));
                }
            }
            GamePhase::WaitingReleaseAfterStop => {
                if !self.button.is_pressed()? {
                    self.cooldown_start = Some(self.ticks.now());
                    self.phase = GamePhase::Cooldown;
                }
            }
            GamePhase::Cooldown => {
                let waited = self.ticks.now().millis_since(self.cooldown_start.unwrap());
                if waited >= u64::from(self.config.cooldown_ms) {
                    self.cooldown_start = None;
                    self.phase = GamePhase::Idle;
                }
            }
        }

        Ok(None)
    }

    /// Abandons any in-flight session and returns to `Idle`.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.session_start = None;
        self.cooldown_start = None;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns true while a session is running (start press seen, stop press
    /// not yet).
    pub fn is_timing(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::ArmedWaitingRelease | GamePhase::Timing
        )
    }

    /// Elapsed milliseconds of the in-flight session, if one is running.
    pub fn elapsed_so_far(&self) -> Option<u64> {
        self.session_start
            .map(|start| self.ticks.now().millis_since(start))
    }

    /// Returns the injected configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
