#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`StopwatchGame`**: Polled state machine turning button samples into stopwatch sessions
//! - **`GamePhase`** / **`GameEvent`**: Where the machine is, and the session edges it reports
//! - **`GameRunner`**: Blocking loop wiring the game to a log sink, a console and an optional clock
//! - **`Button`**: Polarity-aware wrapper over an `embedded-hal` input pin
//! - **`RtcClock`** / **`SecondsClock`**: Auxiliary BCD seconds readout from a DS3231-style chip
//! - **`TickSource`** / **`TickInstant`**: Monotonic millisecond counter traits with
//!   wraparound-safe differences
//! - **`RoundSink`** / **`Console`**: Traits to implement for your log storage and status output
//! - **`StopToken`**: Cooperative shutdown checked every poll
//!
//! Elapsed time always comes from the tick counter; the real-time clock is
//! informational only. With the `std` feature, the [`hosted`] module provides
//! ready-made adapters for running on a PC.

pub mod button;
pub mod report;
pub mod rtc;
pub mod runner;
pub mod stopwatch;
pub mod time;
pub mod types;

#[cfg(feature = "std")]
pub mod hosted;

pub use button::{Button, ButtonPolarity};
pub use report::{Console, ElapsedText, RoundSink, format_elapsed};
pub use rtc::{DS3231_ADDRESS, NoRtc, RtcClock, RtcError, SECONDS_REGISTER, SecondsClock, decode_seconds};
pub use runner::{GameRunner, RunSummary, StopToken};
pub use stopwatch::{GameEvent, GamePhase, StopwatchGame};
pub use time::{TickInstant, TickMs32, TickMs64, TickSource};
pub use types::{GameConfig, RoundReport};
