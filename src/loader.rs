// Board file loader
//
// A board file holds one row per line of whitespace-separated non-negative
// integers. Blank lines are ignored.

use log::info;
use std::fs;
use std::path::Path;

use crate::board::Board;
use crate::error::{Result, WargameError};

/// Parses board text into a row-major value matrix
pub fn parse_board_values(text: &str) -> Result<Vec<Vec<u32>>> {
    let mut rows = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| WargameError::Parse {
                    line: line_idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reads a board file and builds an empty board from it
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let text = fs::read_to_string(path.as_ref())?;
    let board = Board::new(parse_board_values(&text)?)?;
    info!(
        "Loaded {}x{} board from {}",
        board.rows(),
        board.cols(),
        path.as_ref().display()
    );
    Ok(board)
}
