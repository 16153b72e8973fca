use crossword_game::{AdvancePolicy, BackspacePolicy, InputLetterOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Move to the next cell of the active clue after typing.
    pub auto_advance: bool,
    /// Move to the previous cell of the active clue after backspace.
    pub backspace_moves_back: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_advance: true,
            backspace_moves_back: true,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn input_letter_options(&self) -> InputLetterOptions {
        InputLetterOptions::default()
            .advance_policy(if self.auto_advance {
                AdvancePolicy::NextInWord
            } else {
                AdvancePolicy::Stay
            })
            .backspace_policy(if self.backspace_moves_back {
                BackspacePolicy::PreviousInWord
            } else {
                BackspacePolicy::Stay
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_move_along_the_word() {
        assert_eq!(
            Settings::default().input_letter_options(),
            InputLetterOptions::default()
        );
    }

    #[test]
    fn test_disabled_movement_stays_put() {
        let settings = Settings {
            auto_advance: false,
            backspace_moves_back: false,
        };
        let options = settings.input_letter_options();
        assert_eq!(options.advance_policy, AdvancePolicy::Stay);
        assert_eq!(options.backspace_policy, BackspacePolicy::Stay);
    }
}
