//! Logical actions and the per-program button mapping.

use super::Button;
use crate::config::BUTTON_COUNT;

/// What a button means to the program that is currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    MenuUp,
    MenuSelect,
    MenuDown,
    PaddleLeft,
    Launch,
    PaddleRight,
    Duck,
    Restart,
    Jump,
    /// Unmapped; never matches any query.
    None,
}

/// Identifies the menu and each launchable program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramId {
    Menu,
    Brickout,
    Dino,
    AnimationA,
    AnimationB,
}

impl ProgramId {
    /// Number of mapping rows.
    pub const COUNT: usize = 5;

    /// Row index into the mapping table.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Menu => 0,
            Self::Brickout => 1,
            Self::Dino => 2,
            Self::AnimationA => 3,
            Self::AnimationB => 4,
        }
    }

    /// Action bound to `button` while this program is active.
    #[inline]
    pub const fn action_for(
        self,
        button: Button,
    ) -> Action {
        MAPPING[self.index()][button.index()]
    }
}

/// `[program][button]`, buttons ordered Left, Middle, Right.
const MAPPING: [[Action; BUTTON_COUNT]; ProgramId::COUNT] = [
    [Action::MenuUp, Action::MenuSelect, Action::MenuDown],
    [Action::PaddleLeft, Action::Launch, Action::PaddleRight],
    [Action::Duck, Action::Restart, Action::Jump],
    [Action::None, Action::None, Action::None],
    [Action::None, Action::None, Action::None],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_mapping() {
        assert_eq!(ProgramId::Menu.action_for(Button::Left), Action::MenuUp);
        assert_eq!(ProgramId::Menu.action_for(Button::Middle), Action::MenuSelect);
        assert_eq!(ProgramId::Menu.action_for(Button::Right), Action::MenuDown);
    }

    #[test]
    fn test_game_mappings() {
        assert_eq!(ProgramId::Brickout.action_for(Button::Middle), Action::Launch);
        assert_eq!(ProgramId::Dino.action_for(Button::Left), Action::Duck);
        assert_eq!(ProgramId::Dino.action_for(Button::Right), Action::Jump);
    }

    #[test]
    fn test_animations_unmapped() {
        for b in Button::ALL {
            assert_eq!(ProgramId::AnimationA.action_for(b), Action::None);
            assert_eq!(ProgramId::AnimationB.action_for(b), Action::None);
        }
    }
}
