use std::io::{self, BufRead, Write};

use minefield_core::{Frontend, Score, SessionError, Snapshot};

use crate::art;

pub const PROMPT: &str = "minesweeper-alpha: ";

/// Line oriented frontend: commands come from `input`, the game is drawn on
/// `out` and complaints about bad commands go to `err`.
#[derive(Debug)]
pub struct Terminal<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Terminal<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }
}

/// Draws the rounds counter and the bordered grid with its index margins.
pub fn write_board(out: &mut impl Write, board: &Snapshot, round: u32) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, " Rounds completed: {round}")?;
    for (row, cells) in board.outer_iter().enumerate() {
        writeln!(out)?;
        write!(out, " {row} ")?;
        for cell in cells {
            if cell.exposed_mine {
                write!(out, "|<{}>", cell.glyph())?;
            } else {
                write!(out, "| {} ", cell.glyph())?;
            }
        }
        write!(out, "|")?;
    }
    writeln!(out)?;
    write!(out, "     0")?;
    for col in 1..board.ncols() {
        write!(out, "   {col}")?;
    }
    writeln!(out, "\n")
}

impl<R: BufRead, W: Write, E: Write> Frontend for Terminal<R, W, E> {
    fn read_command(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;

        // bytes that are not UTF-8 still reach the parser and get rejected there
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn show_welcome(&mut self, board: &Snapshot, round: u32) -> io::Result<()> {
        writeln!(self.out, "{}", art::WELCOME)?;
        write_board(&mut self.out, board, round)
    }

    fn show_board(&mut self, board: &Snapshot, round: u32) -> io::Result<()> {
        write_board(&mut self.out, board, round)
    }

    fn show_help(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", art::HELP)
    }

    fn show_error(&mut self, error: &SessionError) -> io::Result<()> {
        writeln!(self.err)?;
        writeln!(self.err, "Invalid Command: {error}")?;
        self.err.flush()
    }

    fn show_win(&mut self, score: Score) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}{score}", art::DOGE)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn show_loss(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, " Oh no.... You revealed a mine!")?;
        writeln!(self.out, "{}", art::GAME_OVER)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn show_quit(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Quitting the game...")?;
        writeln!(self.out, "Bye!")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{Board, BoardConfig, CommandError, Position};
    use std::io::Cursor;

    fn board() -> Board {
        let mut board = Board::from_config(&BoardConfig::new(5, 6, &[(0, 0), (4, 5)]).unwrap());
        board.reveal(Position::new(1, 1)).unwrap();
        board.mark(Position::new(0, 0)).unwrap();
        board.guess(Position::new(2, 3)).unwrap();
        board
    }

    fn table(snapshot: &Snapshot, round: u32) -> String {
        let mut out = Vec::new();
        write_board(&mut out, snapshot, round).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn draws_bordered_grid_with_indices() {
        let expected = "\n Rounds completed: 3\n\
            \n 0 | F |   |   |   |   |   |\
            \n 1 |   | 1 |   |   |   |   |\
            \n 2 |   |   |   | ? |   |   |\
            \n 3 |   |   |   |   |   |   |\
            \n 4 |   |   |   |   |   |   |\
            \n     0   1   2   3   4   5\n\n";

        assert_eq!(table(&board().render(true), 3), expected);
    }

    #[test]
    fn nofog_brackets_mines() {
        let drawn = table(&board().render(false), 0);

        assert!(drawn.contains("\n 0 |<F>|   |"));
        assert!(drawn.contains("\n 4 |   |   |   |   |   |< >|"));
        assert_eq!(drawn.matches('<').count(), 2);
    }

    #[test]
    fn reads_lines_after_prompting() {
        let mut terminal = Terminal::new(Cursor::new("r 1 1\r\nq"), Vec::new(), Vec::new());

        assert_eq!(terminal.read_command().unwrap().as_deref(), Some("r 1 1"));
        assert_eq!(terminal.read_command().unwrap().as_deref(), Some("q"));
        assert_eq!(terminal.read_command().unwrap(), None);

        let (_, out, _) = terminal.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT.repeat(3));
    }

    #[test]
    fn invalid_utf8_lines_are_read_lossily() {
        let input: &[u8] = b"\xff\xfe garbage\nq\n";
        let mut terminal = Terminal::new(Cursor::new(input), Vec::new(), Vec::new());

        let line = terminal.read_command().unwrap().unwrap();
        assert!(line.ends_with(" garbage"));
        assert!(line.contains(char::REPLACEMENT_CHARACTER));
        assert_eq!(terminal.read_command().unwrap().as_deref(), Some("q"));
    }

    #[test]
    fn errors_go_to_the_error_stream() {
        let mut terminal = Terminal::new(Cursor::new(""), Vec::new(), Vec::new());
        let error = SessionError::from(CommandError::UnrecognizedCommand("x".into()));

        terminal.show_error(&error).unwrap();

        let (_, out, err) = terminal.into_parts();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "\nInvalid Command: Command not recognized: \"x\"\n"
        );
    }
}
