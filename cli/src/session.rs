use std::io::{self, BufRead, Write};

use sweeper_core::{Board, BoardView, EndState, GameError, MarkOutcome, MinefieldGenerator};

use crate::command::{Command, HELP};

/// Line-oriented game loop over any reader and writer.
pub struct Session<G> {
    board: Board<G>,
}

enum Flow {
    Continue,
    Quit,
}

/// Whether a command changed what the board shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Redraw {
    Board,
    Unchanged,
}

impl From<MarkOutcome> for Redraw {
    fn from(outcome: MarkOutcome) -> Self {
        if outcome.has_update() {
            Self::Board
        } else {
            Self::Unchanged
        }
    }
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn new(board: Board<G>) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    /// Runs until the game ends, the player quits, or input runs out.
    pub fn run(
        &mut self,
        input: impl BufRead,
        mut out: impl Write,
    ) -> io::Result<Option<EndState>> {
        let (width, height) = self.board.size();
        writeln!(
            out,
            "Minesweeper {}x{} with {} mines. Type 'help' for commands.",
            width,
            height,
            self.board.num_mines()
        )?;
        write!(out, "{}", BoardView::new(&self.board))?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };
            log::debug!("command: {:?}", command);

            if let Flow::Quit = self.execute(command, &mut out)? {
                break;
            }
        }

        Ok(self.board.end_state())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        let result = match command {
            Command::Step((x, y)) => {
                let revealed = self.board.num_revealed();
                self.board.step(x, y).map(|_| {
                    if self.board.num_revealed() == revealed {
                        Redraw::Unchanged
                    } else {
                        Redraw::Board
                    }
                })
            }
            Command::Flag((x, y)) => self.board.flag(x, y).map(Redraw::from),
            Command::Unflag((x, y)) => self.board.unflag(x, y).map(Redraw::from),
            Command::Show => Ok(Redraw::Board),
            Command::Help => {
                write!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Exit => return Ok(Flow::Quit),
            Command::Empty => return Ok(Flow::Continue),
        };

        match result {
            Ok(Redraw::Board) => write!(out, "{}", BoardView::new(&self.board))?,
            Ok(Redraw::Unchanged) => writeln!(out, "Nothing to do there.")?,
            Err(GameError::OutOfBounds) => {
                let (width, height) = self.board.size();
                writeln!(
                    out,
                    "Out of bounds, X must be below {} and Y below {}.",
                    width, height
                )?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }

        Ok(match self.board.end_state() {
            Some(EndState::Victory) => {
                writeln!(out, "All safe cells cleared, you win!")?;
                Flow::Quit
            }
            Some(EndState::Defeat) => {
                writeln!(out, "Boom! You stepped on a mine.")?;
                Flow::Quit
            }
            None => Flow::Continue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{FixedMinefieldGenerator, GameConfig, Knowledge};

    fn session(size: (u8, u8), mines: &[(u8, u8)]) -> Session<FixedMinefieldGenerator> {
        let config = GameConfig::new(size, mines.len() as u16).unwrap();
        Session::new(Board::with_generator(config, FixedMinefieldGenerator::new(mines)))
    }

    fn play(
        session: &mut Session<FixedMinefieldGenerator>,
        input: &str,
    ) -> (Option<EndState>, String) {
        let mut out = Vec::new();
        let end = session.run(input.as_bytes(), &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn winning_game_ends_session() {
        let mut session = session((2, 1), &[(1, 0)]);

        let (end, out) = play(&mut session, "step 0 0\nstep 1 0\n");

        assert_eq!(end, Some(EndState::Victory));
        assert!(out.contains("you win"));
        assert_eq!(session.board().num_revealed(), 1);
    }

    #[test]
    fn stepping_on_mine_is_reported() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);

        let (end, out) = play(&mut session, "s 1 1\ns 2 2\n");

        assert_eq!(end, Some(EndState::Defeat));
        assert!(out.contains("Boom!"));
        assert!(out.contains('*'));
    }

    #[test]
    fn flag_blocks_step_until_unflagged() {
        let mut session = session((3, 3), &[(0, 0)]);

        let input = "flag 1 1\nstep 1 1\nunflag 1 1\nstep 1 1\nquit\n";
        let (end, out) = play(&mut session, input);

        assert_eq!(end, None);
        assert!(out.contains("Nothing to do there."));
        assert_eq!(session.board().knowledge_at((1, 1)), Ok(Knowledge::Stepped));
    }

    #[test]
    fn bad_input_keeps_loop_running() {
        let mut session = session((3, 3), &[(0, 0)]);

        let (end, out) = play(&mut session, "dig 1 1\nstep 9 9\nstep 1\nhelp\n");

        assert_eq!(end, None);
        assert!(out.contains("Unknown command 'dig'"));
        assert!(out.contains("Out of bounds"));
        assert!(out.contains("expects two coordinates"));
        assert!(out.contains("Commands:"));
        assert!(!session.board().mines_placed());
    }

    #[test]
    fn only_changes_and_show_redraw_the_board() {
        let mut session = session((3, 3), &[(0, 0)]);

        let input = "step 1 1\nstep 1 1\nunflag 2 2\nshow\n";
        let (_, out) = play(&mut session, input);

        // the intro, the first step and `show` each print the header row
        assert_eq!(out.matches("   0 1 2\n").count(), 3);
        assert_eq!(out.matches("Nothing to do there.").count(), 2);
    }

    #[test]
    fn end_of_input_exits() {
        let mut session = session((3, 3), &[(0, 0)]);

        let (end, _) = play(&mut session, "");

        assert_eq!(end, None);
        assert_eq!(session.board().num_revealed(), 0);
    }
}
