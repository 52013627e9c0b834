use core::str::{FromStr, SplitWhitespace};

use crate::*;

/// One parsed line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Position),
    Mark(Position),
    Guess(Position),
    NoFog,
    Help,
    Quit,
}

impl Command {
    /// Canonical long name, as listed by `help`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reveal(_) => "reveal",
            Self::Mark(_) => "mark",
            Self::Guess(_) => "guess",
            Self::NoFog => "nofog",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// Parses a single input line. Only the argument shape is checked here,
    /// coordinates are bounded later by the board.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(CommandError::Empty)?;

        let command = match keyword {
            "r" | "reveal" => Self::Reveal(parse_position("reveal", &mut tokens)?),
            "m" | "mark" => Self::Mark(parse_position("mark", &mut tokens)?),
            "g" | "guess" => Self::Guess(parse_position("guess", &mut tokens)?),
            "nofog" => Self::NoFog,
            "h" | "help" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => return Err(CommandError::UnrecognizedCommand(other.to_owned())),
        };

        if tokens.next().is_some() {
            return Err(CommandError::MalformedArguments {
                command: command.name(),
                reason: "unexpected trailing input",
            });
        }
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(line)
    }
}

fn parse_position(
    command: &'static str,
    tokens: &mut SplitWhitespace<'_>,
) -> Result<Position, CommandError> {
    let mut next_int = || -> Result<i32, CommandError> {
        let token = tokens.next().ok_or(CommandError::MalformedArguments {
            command,
            reason: "expected a row and a column",
        })?;
        token.parse().map_err(|_| CommandError::MalformedArguments {
            command,
            reason: "row and column must be integers",
        })
    };
    let row = next_int()?;
    let col = next_int()?;
    Ok(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(line: &str) -> bool {
        matches!(
            Command::parse(line),
            Err(CommandError::MalformedArguments { .. })
        )
    }

    #[test]
    fn accepts_short_and_long_aliases() {
        let at = Position::new(3, 4);
        assert_eq!(Command::parse("r 3 4"), Ok(Command::Reveal(at)));
        assert_eq!(Command::parse("reveal 3 4"), Ok(Command::Reveal(at)));
        assert_eq!(Command::parse("m 3 4"), Ok(Command::Mark(at)));
        assert_eq!(Command::parse("mark 3 4"), Ok(Command::Mark(at)));
        assert_eq!(Command::parse("g 3 4"), Ok(Command::Guess(at)));
        assert_eq!(Command::parse("guess 3 4"), Ok(Command::Guess(at)));
        assert_eq!(Command::parse("nofog"), Ok(Command::NoFog));
        assert_eq!(Command::parse("h"), Ok(Command::Help));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            "  r   1\t2  ".parse::<Command>(),
            Ok(Command::Reveal(Position::new(1, 2)))
        );
    }

    #[test]
    fn negative_coordinates_parse_and_are_bounded_later() {
        assert_eq!(
            Command::parse("m -1 2"),
            Ok(Command::Mark(Position::new(-1, 2)))
        );
    }

    #[test]
    fn rejects_unknown_and_empty_lines() {
        assert_eq!(
            Command::parse("flag 1 1"),
            Err(CommandError::UnrecognizedCommand("flag".into()))
        );
        assert_eq!(
            Command::parse("R 1 1"),
            Err(CommandError::UnrecognizedCommand("R".into()))
        );
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    }

    #[test]
    fn rejects_wrong_argument_shapes() {
        assert!(malformed("reveal 1"));
        assert!(malformed("r"));
        assert!(malformed("r 1 x"));
        assert!(malformed("r 1.5 2"));
        assert!(malformed("m 1 2 3"));
        assert!(malformed("g 1 2 extra"));
        assert!(malformed("nofog now"));
        assert!(malformed("help me"));
        assert!(malformed("q 0"));
    }
}
