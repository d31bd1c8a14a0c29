use std::str::FromStr;

use sweeper_core::Coord2;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Step(Coord2),
    Flag(Coord2),
    Unflag(Coord2),
    Show,
    Help,
    Exit,
    /// Blank line
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}', type 'help' for a list of commands")]
    UnknownCommand(String),
    #[error("'{0}' expects two coordinates: X Y")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoord(String),
    #[error("Too many arguments for '{0}'")]
    TooManyArgs(&'static str),
}

pub const HELP: &str = "\
Commands:
  step X Y    (s)  reveal the cell at column X, row Y
  flag X Y    (f)  mark the cell as a suspected mine
  unflag X Y  (u)  remove a flag
  show             print the board
  help             print this message
  exit, quit       leave the game
";

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Empty);
        };

        let (name, with_coords): (&'static str, fn(Coord2) -> Self) =
            match name.to_ascii_lowercase().as_str() {
                "step" | "s" => ("step", Self::Step),
                "flag" | "f" => ("flag", Self::Flag),
                "unflag" | "u" => ("unflag", Self::Unflag),
                "show" => return no_args("show", words, Self::Show),
                "help" | "?" => return no_args("help", words, Self::Help),
                "exit" | "quit" => return no_args("exit", words, Self::Exit),
                _ => return Err(ParseError::UnknownCommand(name.to_owned())),
            };

        let (Some(x), Some(y)) = (words.next(), words.next()) else {
            return Err(ParseError::MissingCoords(name));
        };
        if words.next().is_some() {
            return Err(ParseError::TooManyArgs(name));
        }

        Ok(with_coords((parse_coord(x)?, parse_coord(y)?)))
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn no_args<'a>(
    name: &'static str,
    mut rest: impl Iterator<Item = &'a str>,
    command: Command,
) -> Result<Command, ParseError> {
    match rest.next() {
        Some(_) => Err(ParseError::TooManyArgs(name)),
        None => Ok(command),
    }
}

fn parse_coord(word: &str) -> Result<u8, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidCoord(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_commands() {
        assert_eq!(Command::parse("step 3 4"), Ok(Command::Step((3, 4))));
        assert_eq!(Command::parse("  S 0 1 "), Ok(Command::Step((0, 1))));
        assert_eq!(Command::parse("flag 2 2"), Ok(Command::Flag((2, 2))));
        assert_eq!(Command::parse("u 7 0"), Ok(Command::Unflag((7, 0))));
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!(Command::parse("show"), Ok(Command::Show));
        assert_eq!(Command::parse("HELP"), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Exit));
        assert_eq!(Command::parse("exit"), Ok(Command::Exit));
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Command::parse("dig 1 1"),
            Err(ParseError::UnknownCommand("dig".to_owned()))
        );
        assert_eq!(Command::parse("step 1"), Err(ParseError::MissingCoords("step")));
        assert_eq!(
            Command::parse("flag -1 2"),
            Err(ParseError::InvalidCoord("-1".to_owned()))
        );
        assert_eq!(
            Command::parse("step 300 2"),
            Err(ParseError::InvalidCoord("300".to_owned()))
        );
        assert_eq!(Command::parse("step 1 2 3"), Err(ParseError::TooManyArgs("step")));
        assert_eq!(Command::parse("show all"), Err(ParseError::TooManyArgs("show")));
    }

    #[test]
    fn from_str_matches_parse() {
        assert_eq!("f 1 2".parse::<Command>(), Ok(Command::Flag((1, 2))));
    }
}
