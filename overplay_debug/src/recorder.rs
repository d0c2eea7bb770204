// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. Decoding stops at the first truncated
//! record or unknown tag.

use overplay_core::command::Command;
use overplay_core::host::MediaId;
use overplay_core::hud::HudState;
use overplay_core::idle::IdleState;
use overplay_core::lifecycle::Transition;
use overplay_core::panel::PanelVisibility;
use overplay_core::time::HostTime;
use overplay_core::timer::TimerKind;
use overplay_core::trace::{
    CommandEvent, HudEvent, IdleEvent, LifecycleEvent, PanelEvent, TimerFiredEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LIFECYCLE: u8 = 1;
const TAG_TIMER_FIRED: u8 = 2;
const TAG_HUD: u8 = 3;
const TAG_PANEL: u8 = 4;
const TAG_IDLE: u8 = 5;
const TAG_COMMAND: u8 = 6;

const COMMANDS: [Command; 7] = [
    Command::TogglePlay,
    Command::SeekBackward,
    Command::SeekForward,
    Command::VolumeUp,
    Command::VolumeDown,
    Command::ToggleMute,
    Command::ToggleFullscreen,
];

const HUD_STATES: [HudState; 3] = [HudState::Hidden, HudState::Visible, HudState::Hiding];

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes the transition kind followed by two ids (zero when unused).
    fn write_transition(&mut self, t: Transition) {
        let (kind, from, to) = match t {
            Transition::Activated(id) => (0, 0, id.0),
            Transition::Deactivated(id) => (1, id.0, 0),
            Transition::Changed { from, to } => (2, from.0, to.0),
            Transition::Unchanged => (3, 0, 0),
        };
        self.write_u8(kind);
        self.write_u32(from);
        self.write_u32(to);
    }

    fn write_index<T: PartialEq>(&mut self, table: &[T], value: &T) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "lookup tables hold fewer than 256 entries"
        )]
        let index = table.iter().position(|v| v == value).unwrap_or(0) as u8;
        self.write_u8(index);
    }
}

impl TraceSink for RecorderSink {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_LIFECYCLE);
        self.write_u64(e.now.ticks());
        self.write_transition(e.transition);
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        self.write_u8(TAG_TIMER_FIRED);
        self.write_u64(e.now.ticks());
        self.write_index(&TimerKind::ALL, &e.kind);
        self.write_u64(e.deadline.ticks());
    }

    fn on_hud(&mut self, e: &HudEvent) {
        self.write_u8(TAG_HUD);
        self.write_u64(e.now.ticks());
        self.write_index(&HUD_STATES, &e.state);
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        self.write_u8(TAG_PANEL);
        self.write_u64(e.now.ticks());
        self.write_u8(u8::from(e.visibility == PanelVisibility::Visible));
    }

    fn on_idle(&mut self, e: &IdleEvent) {
        self.write_u8(TAG_IDLE);
        self.write_u64(e.now.ticks());
        self.write_u8(u8::from(e.state == IdleState::Idle));
    }

    fn on_command(&mut self, e: &CommandEvent) {
        self.write_u8(TAG_COMMAND);
        self.write_u64(e.now.ticks());
        self.write_index(&COMMANDS, &e.command);
        self.write_u32(e.media.0);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`LifecycleEvent`].
    Lifecycle(LifecycleEvent),
    /// A [`TimerFiredEvent`].
    TimerFired(TimerFiredEvent),
    /// A [`HudEvent`].
    Hud(HudEvent),
    /// A [`PanelEvent`].
    Panel(PanelEvent),
    /// An [`IdleEvent`].
    Idle(IdleEvent),
    /// A [`CommandEvent`].
    Command(CommandEvent),
}

impl RecordedEvent {
    /// Host time at which the event was emitted.
    #[must_use]
    pub fn now(&self) -> HostTime {
        match self {
            Self::Lifecycle(e) => e.now,
            Self::TimerFired(e) => e.now,
            Self::Hud(e) => e.now,
            Self::Panel(e) => e.now,
            Self::Idle(e) => e.now,
            Self::Command(e) => e.now,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_index<T: Copy>(&mut self, table: &[T]) -> Option<T> {
        table.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_transition(&mut self) -> Option<Transition> {
        let kind = self.read_u8()?;
        let from = MediaId(self.read_u32()?);
        let to = MediaId(self.read_u32()?);
        Some(match kind {
            0 => Transition::Activated(to),
            1 => Transition::Deactivated(from),
            2 => Transition::Changed { from, to },
            3 => Transition::Unchanged,
            _ => return None,
        })
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Lifecycle(LifecycleEvent {
            now: self.read_time()?,
            transition: self.read_transition()?,
        }))
    }

    fn decode_timer_fired(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerFired(TimerFiredEvent {
            now: self.read_time()?,
            kind: self.read_index(&TimerKind::ALL)?,
            deadline: self.read_time()?,
        }))
    }

    fn decode_hud(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Hud(HudEvent {
            now: self.read_time()?,
            state: self.read_index(&HUD_STATES)?,
        }))
    }

    fn decode_panel(&mut self) -> Option<RecordedEvent> {
        let now = self.read_time()?;
        let visibility = if self.read_u8()? != 0 {
            PanelVisibility::Visible
        } else {
            PanelVisibility::Hidden
        };
        Some(RecordedEvent::Panel(PanelEvent { now, visibility }))
    }

    fn decode_idle(&mut self) -> Option<RecordedEvent> {
        let now = self.read_time()?;
        let state = if self.read_u8()? != 0 {
            IdleState::Idle
        } else {
            IdleState::Active
        };
        Some(RecordedEvent::Idle(IdleEvent { now, state }))
    }

    fn decode_command(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Command(CommandEvent {
            now: self.read_time()?,
            command: self.read_index(&COMMANDS)?,
            media: MediaId(self.read_u32()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LIFECYCLE => self.decode_lifecycle(),
            TAG_TIMER_FIRED => self.decode_timer_fired(),
            TAG_HUD => self.decode_hud(),
            TAG_PANEL => self.decode_panel(),
            TAG_IDLE => self.decode_idle(),
            TAG_COMMAND => self.decode_command(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_session() -> RecorderSink {
        let mut rec = RecorderSink::new();
        rec.on_lifecycle(&LifecycleEvent {
            now: HostTime(0),
            transition: Transition::Activated(MediaId(7)),
        });
        rec.on_command(&CommandEvent {
            now: HostTime(120),
            command: Command::VolumeDown,
            media: MediaId(7),
        });
        rec.on_panel(&PanelEvent {
            now: HostTime(120),
            visibility: PanelVisibility::Visible,
        });
        rec.on_hud(&HudEvent {
            now: HostTime(120),
            state: HudState::Visible,
        });
        rec.on_timer_fired(&TimerFiredEvent {
            now: HostTime(1_124),
            kind: TimerKind::HudHide,
            deadline: HostTime(1_120),
        });
        rec.on_hud(&HudEvent {
            now: HostTime(1_124),
            state: HudState::Hiding,
        });
        rec.on_idle(&IdleEvent {
            now: HostTime(2_000),
            state: IdleState::Idle,
        });
        rec.on_lifecycle(&LifecycleEvent {
            now: HostTime(2_500),
            transition: Transition::Changed {
                from: MediaId(7),
                to: MediaId(8),
            },
        });
        rec
    }

    #[test]
    fn session_decodes_in_order() {
        let rec = record_session();
        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 8, "all events decoded");

        assert_eq!(
            events[0],
            RecordedEvent::Lifecycle(LifecycleEvent {
                now: HostTime(0),
                transition: Transition::Activated(MediaId(7)),
            }),
            "activation"
        );
        match events[1] {
            RecordedEvent::Command(e) => {
                assert_eq!(e.command, Command::VolumeDown, "command");
                assert_eq!(e.media, MediaId(7), "media");
            }
            other => panic!("expected Command, got {other:?}"),
        }
        match events[4] {
            RecordedEvent::TimerFired(e) => {
                assert_eq!(e.kind, TimerKind::HudHide, "kind");
                assert_eq!(e.now - e.deadline, overplay_core::time::Duration(4), "lateness");
            }
            other => panic!("expected TimerFired, got {other:?}"),
        }
        assert_eq!(
            events[7],
            RecordedEvent::Lifecycle(LifecycleEvent {
                now: HostTime(2_500),
                transition: Transition::Changed {
                    from: MediaId(7),
                    to: MediaId(8),
                },
            }),
            "replacement"
        );
    }

    #[test]
    fn timestamps_are_monotonic() {
        let rec = record_session();
        let times: Vec<_> = decode(rec.as_bytes()).map(|e| e.now()).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]), "got {times:?}");
    }

    #[test]
    fn every_timer_kind_survives() {
        let mut rec = RecorderSink::new();
        for kind in TimerKind::ALL {
            rec.on_timer_fired(&TimerFiredEvent {
                now: HostTime(1),
                kind,
                deadline: HostTime(1),
            });
        }
        let kinds: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::TimerFired(t) => t.kind,
                other => panic!("expected TimerFired, got {other:?}"),
            })
            .collect();
        assert_eq!(kinds, TimerKind::ALL, "kinds in order");
    }

    #[test]
    fn truncated_record_ends_decoding() {
        let bytes = record_session().into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(decode(cut).count(), 7, "last record dropped");
        assert_eq!(decode(&[]).count(), 0, "empty");
        assert_eq!(decode(&[0xff, 1, 2, 3]).count(), 0, "unknown tag");
    }
}
