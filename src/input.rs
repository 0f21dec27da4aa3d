//! Keypad and keyboard commands

use crate::audio::AudioSink;
use crate::quiz::{Arcade, GamePhase};

/// On-screen number pad keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKey {
    Digit(u8),
    Backspace,
    Submit,
}

/// Everything a keyboard press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Pad(PadKey),
    /// Leave the menu
    Start,
    NextLevel,
    /// Restart the level, or the whole game after game over / victory
    Restart,
    ToggleMute,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        let cmd = match key {
            "Backspace" => KeyCommand::Pad(PadKey::Backspace),
            "Enter" => KeyCommand::Pad(PadKey::Submit),
            " " => KeyCommand::Start,
            "n" | "N" => KeyCommand::NextLevel,
            "r" | "R" => KeyCommand::Restart,
            "m" | "M" => KeyCommand::ToggleMute,
            _ => {
                let mut chars = key.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCommand::Pad(PadKey::Digit(digit as u8))
            }
        };
        Some(cmd)
    }

    /// Route to the matching `Arcade` command. Returns whether anything happened.
    ///
    /// Mute toggles in every phase, so `ToggleMute` always reports `true`. The
    /// new mute state is on `Arcade::is_muted`.
    pub fn apply<A: AudioSink>(self, arcade: &mut Arcade<A>) -> bool {
        match self {
            KeyCommand::Pad(key) => arcade.press(key),
            KeyCommand::Start => arcade.start_game(),
            KeyCommand::NextLevel => arcade.next_level(),
            KeyCommand::Restart => match arcade.session().phase {
                GamePhase::LevelComplete => arcade.restart_level(),
                GamePhase::GameOver | GamePhase::Victory => arcade.restart_game(),
                _ => false,
            },
            KeyCommand::ToggleMute => {
                arcade.toggle_mute();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;

    #[test]
    fn test_from_key() {
        assert_eq!(
            KeyCommand::from_key("7"),
            Some(KeyCommand::Pad(PadKey::Digit(7)))
        );
        assert_eq!(
            KeyCommand::from_key("Enter"),
            Some(KeyCommand::Pad(PadKey::Submit))
        );
        assert_eq!(KeyCommand::from_key("M"), Some(KeyCommand::ToggleMute));
        assert_eq!(KeyCommand::from_key("12"), None);
        assert_eq!(KeyCommand::from_key("x"), None);
        assert_eq!(KeyCommand::from_key(""), None);
    }

    #[test]
    fn test_apply_routes_by_phase() {
        let mut arcade = Arcade::new(NullAudio, 5);
        assert!(!KeyCommand::Restart.apply(&mut arcade));
        assert!(KeyCommand::Start.apply(&mut arcade));
        assert_eq!(arcade.session().phase, GamePhase::Playing);

        assert!(KeyCommand::Pad(PadKey::Digit(3)).apply(&mut arcade));
        assert_eq!(arcade.session().user_answer, "3");
        assert!(!KeyCommand::Restart.apply(&mut arcade));
        assert!(KeyCommand::ToggleMute.apply(&mut arcade));
        assert!(arcade.is_muted());
    }

    #[test]
    fn test_mute_applies_in_every_phase() {
        let mut arcade = Arcade::new(NullAudio, 5);
        assert!(KeyCommand::ToggleMute.apply(&mut arcade));
        assert!(arcade.is_muted());

        // Still honoured while feedback locks the keypad
        assert!(KeyCommand::Start.apply(&mut arcade));
        assert!(arcade.submit_answer("0"));
        assert!(!KeyCommand::Pad(PadKey::Digit(1)).apply(&mut arcade));
        assert!(KeyCommand::ToggleMute.apply(&mut arcade));
        assert!(!arcade.is_muted());
    }
}
