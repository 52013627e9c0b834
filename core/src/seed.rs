//! Seed file parsing.
//!
//! A seed is a whitespace separated list of integers: rows, columns, the mine
//! count, then one `row col` pair per mine. Line breaks carry no meaning and
//! anything after the last declared pair is ignored.

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::*;

/// Reads and validates the seed file at `path`.
pub fn load_seed(path: impl AsRef<Path>) -> Result<BoardConfig, SeedError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SeedError::NotFound {
        path: path.to_owned(),
        source,
    })?;
    let config = parse_seed(&text)?;
    log::debug!(
        "Loaded seed {}: {}x{} with {} mines",
        path.display(),
        config.rows(),
        config.cols(),
        config.mine_count()
    );
    Ok(config)
}

/// Validates seed text, checking every value as soon as it is read.
pub fn parse_seed(text: &str) -> Result<BoardConfig, SeedError> {
    let mut tokens = SeedTokens(text.split_whitespace());

    let rows = tokens.next_int()?;
    let cols = tokens.next_int()?;
    let size = check_dimensions(rows, cols)?;

    let count = tokens.next_int()?;
    let count = check_mine_count(count, size)?;

    let mut mine_positions = Vec::with_capacity(count.into());
    for _ in 0..count {
        let row = tokens.next_int()?;
        if !(0..i64::from(size.0)).contains(&row) {
            return Err(SeedError::MalformedMinePosition { row, col: None });
        }
        let col = tokens.next_int()?;
        mine_positions.push(check_mine_position(row, col, size)?);
    }

    Ok(BoardConfig {
        size,
        mine_positions,
    })
}

impl FromStr for BoardConfig {
    type Err = SeedError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_seed(text)
    }
}

struct SeedTokens<'a>(SplitWhitespace<'a>);

impl SeedTokens<'_> {
    fn next_int(&mut self) -> Result<i64, SeedError> {
        let token = self.0.next().ok_or(SeedError::MissingValue)?;
        token.parse().map_err(|_| SeedError::WrongType {
            token: token.to_owned(),
        })
    }
}
