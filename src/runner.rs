//! Blocking game loop: polling, reporting, logging and shutdown.
//!
//! [`GameRunner`] composes a [`StopwatchGame`] with the output seams - an
//! optional auxiliary [`SecondsClock`], a [`RoundSink`] for the persistent
//! log and a [`Console`] for status lines - and drives them from a single
//! polled loop. One thread of control owns every peripheral; the only way
//! out of [`run`] is the cooperative [`StopToken`].
//!
//! [`run`]: GameRunner::run

use core::fmt::Write;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use heapless::String;

use crate::report::{Console, RoundSink, format_elapsed};
use crate::rtc::{NoRtc, SecondsClock};
use crate::stopwatch::{GameEvent, StopwatchGame};
use crate::time::{TickInstant, TickSource};
use crate::types::RoundReport;

/// Cooperative shutdown signal, checked at the top of every loop iteration.
///
/// The usual implementation is an [`AtomicBool`] set from an OS signal
/// handler or an interrupt context.
pub trait StopToken {
    /// Returns true once the loop should exit.
    fn should_stop(&self) -> bool;
}

impl StopToken for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<S: StopToken + ?Sized> StopToken for &S {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// What a finished run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Rounds completed before the stop token fired.
    pub rounds: u32,
}

/// Drives a [`StopwatchGame`] until told to stop.
///
/// Per round: prints the result, appends the two-decimal elapsed line to the
/// sink, and samples the auxiliary clock at both session edges when one is
/// attached. Clock and sink failures are reported on the console and never
/// end the loop; only a broken input pin does.
///
/// # Type Parameters
/// * `'t` - Lifetime of the tick source reference
/// * `I` - Tick instant type
/// * `P` - Button input pin type
/// * `T` - Tick source implementation type
/// * `R` - Auxiliary seconds clock type ([`NoRtc`] when absent)
/// * `S` - Round sink implementation type
/// * `C` - Console implementation type
/// * `D` - Polling delay implementation type
pub struct GameRunner<'t, I, P, T, R, S, C, D>
where
    I: TickInstant,
    P: InputPin,
    T: TickSource<I>,
    R: SecondsClock,
    S: RoundSink,
    C: Console,
    D: DelayNs,
{
    game: StopwatchGame<'t, I, P, T>,
    clock: Option<R>,
    sink: S,
    console: C,
    delay: D,
    round_start_seconds: Option<u8>,
    last_report: Option<RoundReport>,
}

impl<'t, I, P, T, S, C, D> GameRunner<'t, I, P, T, NoRtc, S, C, D>
where
    I: TickInstant,
    P: InputPin,
    T: TickSource<I>,
    S: RoundSink,
    C: Console,
    D: DelayNs,
{
    /// Creates a runner without an auxiliary clock.
    pub fn new(game: StopwatchGame<'t, I, P, T>, sink: S, console: C, delay: D) -> Self {
        Self {
            game,
            clock: None,
            sink,
            console,
            delay,
            round_start_seconds: None,
            last_report: None,
        }
    }
}

impl<'t, I, P, T, R, S, C, D> GameRunner<'t, I, P, T, R, S, C, D>
where
    I: TickInstant,
    P: InputPin,
    T: TickSource<I>,
    R: SecondsClock,
    S: RoundSink,
    C: Console,
    D: DelayNs,
{
    /// Creates a runner that samples `clock` at each session edge.
    pub fn with_clock(
        game: StopwatchGame<'t, I, P, T>,
        clock: R,
        sink: S,
        console: C,
        delay: D,
    ) -> Self {
        Self {
            game,
            clock: Some(clock),
            sink,
            console,
            delay,
            round_start_seconds: None,
            last_report: None,
        }
    }

    /// Runs the game until the stop token fires.
    ///
    /// Polls the button at the configured interval, reports each round, and
    /// exits with a summary naming the log destination. Returns an error only
    /// if the input pin fails.
    pub fn run(&mut self, stop: &impl StopToken) -> Result<RunSummary, P::Error> {
        let mut rounds: u32 = 0;

        self.console
            .line("Press the button to start the stopwatch.");

        while !stop.should_stop() {
            if let Some(event) = self.game.service()? {
                match event {
                    GameEvent::TimerStarted => {
                        self.round_start_seconds = self.read_aux_seconds();
                        self.console
                            .line("Timer started! Press the button again to stop.");
                    }
                    GameEvent::RoundFinished { elapsed_ms } => {
                        let end_seconds = self.read_aux_seconds();
                        let report = RoundReport {
                            elapsed_ms,
                            start_seconds: self.round_start_seconds.take(),
                            end_seconds,
                        };
                        self.report_round(&report);
                        self.last_report = Some(report);
                        rounds += 1;
                    }
                }
            }
            self.delay.delay_ms(self.game.config().poll_interval_ms);
        }

        let mut text: String<96> = String::new();
        let _ = write!(
            text,
            "Game ended after {} round(s). All results saved to '{}'.",
            rounds,
            self.sink.destination()
        );
        self.console.line(&text);

        Ok(RunSummary { rounds })
    }

    /// Samples the auxiliary clock, if attached. A failed read is reported
    /// and yields `None` - the round goes on regardless.
    fn read_aux_seconds(&mut self) -> Option<u8> {
        let result = self.clock.as_mut()?.read_seconds();
        match result {
            Ok(seconds) => Some(seconds),
            Err(err) => {
                let mut text: String<96> = String::new();
                let _ = write!(text, "Clock read failed: {:?}", err);
                self.console.line(&text);
                None
            }
        }
    }

    /// Shows the round result, then tries to persist it. The console line
    /// comes first so a full disk never hides the result from the player.
    fn report_round(&mut self, report: &RoundReport) {
        let elapsed = format_elapsed(report.elapsed_ms);

        let mut text: String<96> = String::new();
        let _ = write!(text, "You counted {} seconds!", elapsed.as_str());
        self.console.line(&text);

        if let Err(err) = self.sink.append(&elapsed) {
            let mut text: String<96> = String::new();
            let _ = write!(text, "Log write failed, result not saved: {:?}", err);
            self.console.line(&text);
        }

        self.console
            .line("Press the button again to play another round.");
    }

    /// The most recent completed round, for diagnostics.
    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }

    /// Returns the wrapped game.
    pub fn game(&self) -> &StopwatchGame<'t, I, P, T> {
        &self.game
    }

    /// Returns the round sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the console.
    pub fn console(&self) -> &C {
        &self.console
    }
}
