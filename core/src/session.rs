use core::fmt;
use std::io;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
/// - Playing -> Quit
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Playing,
    Won,
    Lost,
    Quit,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// What the frontend should present after a successfully handled command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Turn {
    /// Redraw the board with fog of war.
    Board,
    /// Redraw the board with mines exposed.
    NoFog,
    /// List the commands, then redraw the board.
    Help,
    Won(Score),
    Lost,
    Quit,
}

/// Performance score of a won game, kept to two decimals.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    /// Anything at or above this is reported as a perfect score.
    pub const PERFECT_THRESHOLD: f64 = 99.999;

    pub fn new(rows: Coord, cols: Coord, round: u32) -> Self {
        debug_assert!(round > 0, "a won game has completed at least one round");
        let raw = 100.0 * f64::from(rows) * f64::from(cols) / f64::from(round);
        let raw = if raw >= Self::PERFECT_THRESHOLD {
            100.0
        } else {
            raw
        };
        Self((raw * 100.0).round() / 100.0)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Presentation side of the play loop.
pub trait Frontend {
    /// Next raw command line, `None` once input is exhausted.
    fn read_command(&mut self) -> io::Result<Option<String>>;
    fn show_welcome(&mut self, board: &Snapshot, round: u32) -> io::Result<()>;
    fn show_board(&mut self, board: &Snapshot, round: u32) -> io::Result<()>;
    fn show_help(&mut self) -> io::Result<()>;
    fn show_error(&mut self, error: &SessionError) -> io::Result<()>;
    fn show_win(&mut self, score: Score) -> io::Result<()>;
    fn show_loss(&mut self) -> io::Result<()>;
    fn show_quit(&mut self) -> io::Result<()>;
}

/// Single game from first prompt to win, loss or quit.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Board,
    round: u32,
    state: SessionState,
}

impl GameSession {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            board: Board::from_config(config),
            round: 0,
            state: SessionState::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Completed rounds so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> Score {
        Score::new(self.board.rows(), self.board.cols(), self.round)
    }

    /// Parses and applies one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Turn, SessionError> {
        let command = Command::parse(line)?;
        self.dispatch(command)
    }

    /// Applies a command. Failed commands leave the board and the round
    /// counter untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<Turn, SessionError> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded.into());
        }
        log::debug!("Round {}: {command:?}", self.round);

        let turn = match command {
            Command::Reveal(position) => match self.board.reveal(position)? {
                RevealOutcome::HitMine => {
                    self.finish(SessionState::Lost);
                    Turn::Lost
                }
                RevealOutcome::Revealed(_) => {
                    self.round += 1;
                    if self.board.is_won() {
                        self.finish(SessionState::Won);
                        Turn::Won(self.score())
                    } else {
                        Turn::Board
                    }
                }
            },
            // no win check here, a win is only ever discovered by a reveal
            Command::Mark(position) => {
                self.board.mark(position)?;
                self.round += 1;
                Turn::Board
            }
            Command::Guess(position) => {
                self.board.guess(position)?;
                self.round += 1;
                Turn::Board
            }
            Command::NoFog => {
                self.round += 1;
                Turn::NoFog
            }
            Command::Help => {
                self.round += 1;
                Turn::Help
            }
            Command::Quit => {
                self.finish(SessionState::Quit);
                Turn::Quit
            }
        };
        Ok(turn)
    }

    fn finish(&mut self, state: SessionState) {
        log::info!("Game ended as {state:?} after {} rounds", self.round);
        self.state = state;
    }

    /// Runs the prompt, interpret, mutate loop until the game ends.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> io::Result<SessionState> {
        frontend.show_welcome(&self.board.render(true), self.round)?;

        while !self.state.is_finished() {
            let Some(line) = frontend.read_command()? else {
                log::warn!("Input closed, quitting");
                self.finish(SessionState::Quit);
                frontend.show_quit()?;
                break;
            };

            match self.handle_line(&line) {
                Ok(Turn::Board) => frontend.show_board(&self.board.render(true), self.round)?,
                Ok(Turn::NoFog) => frontend.show_board(&self.board.render(false), self.round)?,
                Ok(Turn::Help) => {
                    frontend.show_help()?;
                    frontend.show_board(&self.board.render(true), self.round)?;
                }
                Ok(Turn::Won(score)) => frontend.show_win(score)?,
                Ok(Turn::Lost) => frontend.show_loss()?,
                Ok(Turn::Quit) => frontend.show_quit()?,
                Err(err) => {
                    log::debug!("Rejected {line:?}: {err}");
                    frontend.show_error(&err)?;
                    frontend.show_board(&self.board.render(true), self.round)?;
                }
            }
        }

        Ok(self.state)
    }
}
