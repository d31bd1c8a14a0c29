use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Display form of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    Unrevealed,
    Flag,
    Mine,
    Blank,
    Count(u8),
}

impl Symbol {
    pub const fn glyph(self) -> char {
        match self {
            Self::Unrevealed => '.',
            Self::Flag => '#',
            Self::Mine => '*',
            Self::Blank => ' ',
            Self::Count(count @ 1..=8) => (b'0' + count) as char,
            Self::Count(_) => '?',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; 4];
        f.pad(self.glyph().encode_utf8(&mut buf))
    }
}

/// Maps what the player knows, and the truth behind it, to a symbol.
///
/// After a defeat, hidden mines are shown so the player can see where they
/// were; flags and untouched safe cells keep their look.
pub fn symbol(
    knowledge: Knowledge,
    truth: Option<CellTruth>,
    end_state: Option<EndState>,
) -> Symbol {
    let defeated = end_state == Some(EndState::Defeat);

    match (knowledge, truth) {
        (Knowledge::Hidden, Some(truth)) if truth.has_mine && defeated => Symbol::Mine,
        (Knowledge::Hidden, _) => Symbol::Unrevealed,
        (Knowledge::Flagged, _) => Symbol::Flag,
        (Knowledge::Stepped, Some(truth)) if truth.has_mine => Symbol::Mine,
        (Knowledge::Stepped, Some(truth)) if truth.mine_neighbors == 0 => Symbol::Blank,
        (Knowledge::Stepped, Some(truth)) => Symbol::Count(truth.mine_neighbors),
        // stepping always places mines first
        (Knowledge::Stepped, None) => Symbol::Unrevealed,
    }
}

/// Snapshot of every cell's symbol, indexed `[x, y]`.
pub fn render<G: MinefieldGenerator>(board: &Board<G>) -> Array2<Symbol> {
    let end_state = board.end_state();
    let layout = board.mine_layout();

    Array2::from_shape_fn(board.size().to_nd_index(), |(x, y)| {
        let coords = (x as Coord, y as Coord);
        let knowledge = board.knowledge_at(coords).unwrap_or_default();
        symbol(knowledge, layout.map(|l| l.truth_at(coords)), end_state)
    })
}

/// Text view of a board with column and row headers.
pub struct BoardView<'a, G> {
    board: &'a Board<G>,
}

impl<'a, G: MinefieldGenerator> BoardView<'a, G> {
    pub fn new(board: &'a Board<G>) -> Self {
        Self { board }
    }
}

impl<G: MinefieldGenerator> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = render(self.board);
        let (width, height) = self.board.size();
        let label_width = digits(height.saturating_sub(1));
        let cell_width = digits(width.saturating_sub(1));

        write!(f, "{:label_width$} ", "")?;
        for x in 0..width {
            write!(f, " {x:>cell_width$}")?;
        }
        writeln!(f)?;

        for y in 0..height {
            write!(f, "{y:>label_width$} ")?;
            for x in 0..width {
                let symbol = symbols[(x as usize, y as usize)];
                write!(f, " {symbol:>cell_width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn digits(value: Coord) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const SAFE: CellTruth = CellTruth {
        has_mine: false,
        mine_neighbors: 0,
    };
    const MINE: CellTruth = CellTruth {
        has_mine: true,
        mine_neighbors: 2,
    };

    #[test]
    fn flag_glyph_is_hash() {
        assert_eq!(Symbol::Flag.to_string(), "#");
    }

    #[test]
    fn maps_knowledge_and_truth() {
        let three = CellTruth {
            has_mine: false,
            mine_neighbors: 3,
        };

        assert_eq!(symbol(Knowledge::Hidden, None, None), Symbol::Unrevealed);
        assert_eq!(symbol(Knowledge::Hidden, Some(MINE), None), Symbol::Unrevealed);
        assert_eq!(symbol(Knowledge::Flagged, Some(SAFE), None), Symbol::Flag);
        assert_eq!(symbol(Knowledge::Stepped, Some(MINE), None), Symbol::Mine);
        assert_eq!(symbol(Knowledge::Stepped, Some(SAFE), None), Symbol::Blank);
        assert_eq!(symbol(Knowledge::Stepped, Some(three), None), Symbol::Count(3));
        assert_eq!(Symbol::Count(3).glyph(), '3');
    }

    #[test]
    fn defeat_shows_hidden_mines_only() {
        let defeat = Some(EndState::Defeat);

        assert_eq!(symbol(Knowledge::Hidden, Some(MINE), defeat), Symbol::Mine);
        assert_eq!(symbol(Knowledge::Hidden, Some(SAFE), defeat), Symbol::Unrevealed);
        assert_eq!(symbol(Knowledge::Flagged, Some(MINE), defeat), Symbol::Flag);
    }

    #[test]
    fn renders_board_after_flood() {
        let config = GameConfig::new((3, 2), 1).unwrap();
        let mut board = Board::with_generator(config, FixedMinefieldGenerator::new(&[(2, 1)]));
        board.flag(2, 1).unwrap();
        board.step(0, 0).unwrap();

        let symbols = render(&board);

        assert_eq!(symbols[(0, 0)], Symbol::Blank);
        assert_eq!(symbols[(1, 0)], Symbol::Count(1));
        assert_eq!(symbols[(2, 1)], Symbol::Flag);
    }

    #[test]
    fn board_view_has_headers() {
        let board = Board::new(3, 2, 1, 0).unwrap();

        assert_eq!(
            BoardView::new(&board).to_string(),
            "   0 1 2\n0  . . .\n1  . . .\n"
        );
    }
}
