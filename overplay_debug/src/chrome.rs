// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each overlay component gets its own track (`tid`), so HUD, panel and
//! idle transitions line up under the timer firings that caused them.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use overplay_core::lifecycle::Transition;
use overplay_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

const TID_LIFECYCLE: u32 = 0;
const TID_TIMERS: u32 = 1;
const TID_HUD: u32 = 2;
const TID_PANEL: u32 = 3;
const TID_IDLE: u32 = 4;
const TID_COMMANDS: u32 = 5;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = ticks_to_us(recorded.now().ticks(), timebase);
        match recorded {
            RecordedEvent::Lifecycle(e) => {
                let (from, to) = match e.transition {
                    Transition::Activated(id) => (None, Some(id.0)),
                    Transition::Deactivated(id) => (Some(id.0), None),
                    Transition::Changed { from, to } => (Some(from.0), Some(to.0)),
                    Transition::Unchanged => (None, None),
                };
                events.push(json!({
                    "ph": "i",
                    "name": e.transition.as_str(),
                    "cat": "Lifecycle",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_LIFECYCLE,
                    "s": "g",
                    "args": {
                        "from": from,
                        "to": to,
                    }
                }));
            }
            RecordedEvent::TimerFired(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.as_str(),
                    "cat": "Timer",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_TIMERS,
                    "s": "t",
                    "args": {
                        "deadline_us": ticks_to_us(e.deadline.ticks(), timebase),
                        "late_us": ticks_to_us((e.now - e.deadline).ticks(), timebase),
                    }
                }));
            }
            RecordedEvent::Hud(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("hud:{}", e.state.as_str()),
                    "cat": "Hud",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_HUD,
                    "s": "t",
                }));
            }
            RecordedEvent::Panel(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("panel:{}", e.visibility.as_str()),
                    "cat": "Panel",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_PANEL,
                    "s": "t",
                }));
            }
            RecordedEvent::Idle(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("idle:{}", e.state.as_str()),
                    "cat": "Idle",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_IDLE,
                    "s": "t",
                }));
            }
            RecordedEvent::Command(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.command.as_str(),
                    "cat": "Command",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_COMMANDS,
                    "s": "t",
                    "args": {
                        "video": e.media.0,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use overplay_core::command::Command;
    use overplay_core::host::MediaId;
    use overplay_core::hud::HudState;
    use overplay_core::time::HostTime;
    use overplay_core::timer::TimerKind;
    use overplay_core::trace::{CommandEvent, HudEvent, LifecycleEvent, TimerFiredEvent, TraceSink};

    fn exported(rec: &RecorderSink) -> Vec<Value> {
        let mut out = Vec::<u8>::new();
        export(rec.as_bytes(), Timebase::MILLIS, &mut out).unwrap();
        let json = String::from_utf8(out).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_lifecycle(&LifecycleEvent {
            now: HostTime(0),
            transition: Transition::Activated(MediaId(1)),
        });
        rec.on_command(&CommandEvent {
            now: HostTime(250),
            command: Command::TogglePlay,
            media: MediaId(1),
        });
        rec.on_hud(&HudEvent {
            now: HostTime(250),
            state: HudState::Visible,
        });
        rec.on_timer_fired(&TimerFiredEvent {
            now: HostTime(1_252),
            kind: TimerKind::HudHide,
            deadline: HostTime(1_250),
        });

        let events = exported(&rec);
        assert_eq!(events.len(), 4, "one entry per record");

        assert_eq!(events[0]["name"], "activated", "lifecycle name");
        assert_eq!(events[0]["args"]["to"], 1, "activated id");
        assert!(events[0]["args"]["from"].is_null(), "no previous video");

        assert_eq!(events[1]["name"], "toggle-play", "command name");
        assert_eq!(events[1]["ts"], 250_000.0, "ms ticks become us");

        assert_eq!(events[2]["name"], "hud:visible", "hud name");
        assert_eq!(events[2]["tid"], TID_HUD, "hud track");

        assert_eq!(events[3]["cat"], "Timer", "timer category");
        assert_eq!(events[3]["args"]["late_us"], 2_000.0, "lateness");
    }

    #[test]
    fn empty_recording_is_an_empty_array() {
        let events = exported(&RecorderSink::new());
        assert!(events.is_empty(), "got {events:?}");
    }
}
