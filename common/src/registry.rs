//! Table of launchable programs, in menu order.

use crate::input::ProgramId;

/// One menu entry.
#[derive(Clone, Copy, Debug)]
pub struct ProgramEntry {
    /// Display name shown in the launcher.
    pub name: &'static str,
    pub id: ProgramId,
    /// Optional icon bitmap (page layout). None of the built-ins has one.
    pub icon: Option<&'static [u8]>,
}

pub static PROGRAMS: [ProgramEntry; 4] = [
    ProgramEntry {
        name: "Dino",
        id: ProgramId::Dino,
        icon: None,
    },
    ProgramEntry {
        name: "Brick-Out",
        id: ProgramId::Brickout,
        icon: None,
    },
    ProgramEntry {
        name: "Animation A",
        id: ProgramId::AnimationA,
        icon: None,
    },
    ProgramEntry {
        name: "Animation B",
        id: ProgramId::AnimationB,
        icon: None,
    },
];

#[inline]
pub const fn count() -> usize { PROGRAMS.len() }

#[inline]
pub fn entry(index: usize) -> Option<&'static ProgramEntry> { PROGRAMS.get(index) }

/// Look up the entry for `id`.
pub fn find(id: ProgramId) -> Option<&'static ProgramEntry> { PROGRAMS.iter().find(|e| e.id == id) }
