// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use overplay_core::lifecycle::Transition;
use overplay_core::time::{HostTime, Timebase};
use overplay_core::trace::{
    CommandEvent, HudEvent, IdleEvent, LifecycleEvent, PanelEvent, TimerFiredEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ticks_to_ms(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1_000_000.0
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.ticks_to_ms(t.ticks())
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let at = self.host_ms(e.now);
        let _ = match e.transition {
            Transition::Activated(id) => {
                writeln!(self.writer, "[lifecycle] activated video={} at {at:.1}ms", id.0)
            }
            Transition::Deactivated(id) => {
                writeln!(self.writer, "[lifecycle] deactivated video={} at {at:.1}ms", id.0)
            }
            Transition::Changed { from, to } => writeln!(
                self.writer,
                "[lifecycle] changed video={} -> {} at {at:.1}ms",
                from.0, to.0,
            ),
            Transition::Unchanged => writeln!(self.writer, "[lifecycle] unchanged at {at:.1}ms"),
        };
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        let late = self.ticks_to_ms((e.now - e.deadline).ticks());
        let _ = writeln!(
            self.writer,
            "[timer] {} at {:.1}ms late={late:.1}ms",
            e.kind.as_str(),
            self.host_ms(e.now),
        );
    }

    fn on_hud(&mut self, e: &HudEvent) {
        let _ = writeln!(
            self.writer,
            "[hud] {} at {:.1}ms",
            e.state.as_str(),
            self.host_ms(e.now),
        );
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        let _ = writeln!(
            self.writer,
            "[panel] {} at {:.1}ms",
            e.visibility.as_str(),
            self.host_ms(e.now),
        );
    }

    fn on_idle(&mut self, e: &IdleEvent) {
        let _ = writeln!(
            self.writer,
            "[idle] {} at {:.1}ms",
            e.state.as_str(),
            self.host_ms(e.now),
        );
    }

    fn on_command(&mut self, e: &CommandEvent) {
        let _ = writeln!(
            self.writer,
            "[command] {} video={} at {:.1}ms",
            e.command.as_str(),
            e.media.0,
            self.host_ms(e.now),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overplay_core::command::Command;
    use overplay_core::host::MediaId;
    use overplay_core::hud::HudState;
    use overplay_core::timer::TimerKind;

    fn sink() -> PrettyPrintSink<Vec<u8>> {
        PrettyPrintSink::with_writer(Vec::new(), Timebase::MILLIS)
    }

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_command() {
        let mut sink = sink();
        sink.on_command(&CommandEvent {
            now: HostTime(1_500),
            command: Command::SeekForward,
            media: MediaId(2),
        });
        let output = output(sink);
        assert!(output.contains("[command] seek-forward"), "got: {output}");
        assert!(output.contains("video=2"), "got: {output}");
        assert!(output.contains("1500.0ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_timer_lateness() {
        let mut sink = sink();
        sink.on_timer_fired(&TimerFiredEvent {
            now: HostTime(1_004),
            kind: TimerKind::PanelHide,
            deadline: HostTime(1_000),
        });
        let output = output(sink);
        assert!(output.contains("[timer] panel-hide"), "got: {output}");
        assert!(output.contains("late=4.0ms"), "got: {output}");
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = sink();
        sink.on_lifecycle(&LifecycleEvent {
            now: HostTime(0),
            transition: Transition::Changed {
                from: MediaId(1),
                to: MediaId(4),
            },
        });
        sink.on_hud(&HudEvent {
            now: HostTime(10),
            state: HudState::Hiding,
        });
        let output = output(sink);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert!(lines[0].contains("changed video=1 -> 4"), "got: {}", lines[0]);
        assert!(lines[1].starts_with("[hud] hiding"), "got: {}", lines[1]);
    }
}
