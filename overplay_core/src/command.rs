// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard command surface.
//!
//! Keys are matched on `KeyboardEvent.code`, the physical key position, so
//! the bindings stay put across keyboard layouts.

/// A playback command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Play if paused, else pause.
    TogglePlay,
    /// Jump back by the seek distance.
    SeekBackward,
    /// Jump forward by the seek distance.
    SeekForward,
    /// Raise the volume by one step.
    VolumeUp,
    /// Lower the volume by one step.
    VolumeDown,
    /// Flip the mute flag.
    ToggleMute,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
}

impl Command {
    /// Maps a `KeyboardEvent.code` to a command.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Space" | "KeyK" => Self::TogglePlay,
            "ArrowLeft" | "KeyJ" => Self::SeekBackward,
            "ArrowRight" | "KeyL" => Self::SeekForward,
            "ArrowUp" => Self::VolumeUp,
            "ArrowDown" => Self::VolumeDown,
            "KeyM" => Self::ToggleMute,
            "KeyF" => Self::ToggleFullscreen,
            _ => return None,
        })
    }

    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TogglePlay => "toggle-play",
            Self::SeekBackward => "seek-backward",
            Self::SeekForward => "seek-forward",
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
            Self::ToggleMute => "toggle-mute",
            Self::ToggleFullscreen => "toggle-fullscreen",
        }
    }
}

/// A keydown as seen by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput<'a> {
    /// `KeyboardEvent.code`.
    pub code: &'a str,
    /// `true` when focus is in an `<input>`, `<textarea>` or editable
    /// element; such keystrokes belong to the page.
    pub in_text_field: bool,
}

impl KeyInput<'_> {
    /// The command this key triggers, if any.
    #[must_use]
    pub fn command(&self) -> Option<Command> {
        if self.in_text_field {
            return None;
        }
        Command::from_code(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_bindings() {
        assert_eq!(Command::from_code("Space"), Some(Command::TogglePlay), "space");
        assert_eq!(Command::from_code("KeyK"), Some(Command::TogglePlay), "k");
        assert_eq!(Command::from_code("KeyJ"), Some(Command::SeekBackward), "j");
        assert_eq!(Command::from_code("ArrowRight"), Some(Command::SeekForward), "right");
        assert_eq!(Command::from_code("ArrowDown"), Some(Command::VolumeDown), "down");
        assert_eq!(Command::from_code("KeyF"), Some(Command::ToggleFullscreen), "f");
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(Command::from_code("KeyQ"), None, "q");
        assert_eq!(Command::from_code("space"), None, "codes are case sensitive");
    }

    #[test]
    fn text_fields_swallow_shortcuts() {
        let typing = KeyInput {
            code: "KeyK",
            in_text_field: true,
        };
        assert_eq!(typing.command(), None, "typing a k");
        let page = KeyInput {
            code: "KeyK",
            in_text_field: false,
        };
        assert_eq!(page.command(), Some(Command::TogglePlay), "shortcut");
    }
}
