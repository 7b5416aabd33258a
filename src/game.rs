use crate::ipe16::Layout;

/// The games whose ART archives can be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Game {
    /// Blown Away
    Ba,
    /// Panic in the Park
    Pip,
    /// Where's Waldo? At the Circus
    Waldo,
    /// Where's Waldo? Exploring Geography
    Waldo2,
    /// Eraser Turnabout
    Eraser,
    /// Virtual K'Nex
    Knex,
}

/// The archive format a game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Ipe16(Layout),
    Ipe32,
}

impl Game {
    pub fn family(self) -> Family {
        match self {
            Game::Ba => Family::Ipe16(Layout::Narrow),
            Game::Pip | Game::Waldo => Family::Ipe16(Layout::Wide),
            Game::Waldo2 | Game::Eraser | Game::Knex => Family::Ipe32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_game_has_a_family() {
        assert_eq!(Game::Ba.family(), Family::Ipe16(Layout::Narrow));
        assert_eq!(Game::Waldo.family(), Family::Ipe16(Layout::Wide));
        assert_eq!(Game::Knex.family(), Family::Ipe32);
    }
}
