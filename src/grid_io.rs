//! Reading and writing grids in their text form: one row per line, cell values as integers
//! separated by whitespace. [BLOCKED_VALUE](crate::BLOCKED_VALUE) marks an obstacle, path cells
//! are written as [PATH_VALUE](crate::PATH_VALUE).
use crate::error::{PathError, Result};
use crate::pathing_grid::{Cell, PathingGrid};
use log::info;
use std::fs;
use std::path::Path;

/// Parses a grid. Blank lines are skipped; every other line is a row.
pub fn parse_grid(text: &str) -> Result<PathingGrid> {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    token.parse::<i32>().map(Cell::from_value).map_err(|_| {
                        PathError::invalid_grid(format!(
                            "row {row}, column {col}: `{token}` is not an integer"
                        ))
                    })
                })
                .collect::<Result<Vec<Cell>>>()
        })
        .collect::<Result<Vec<Vec<Cell>>>>()?;
    PathingGrid::from_rows(rows)
}

/// The text form of a grid, identical to its [Display](std::fmt::Display) output.
pub fn format_grid(grid: &PathingGrid) -> String {
    grid.to_string()
}

pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<PathingGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let grid = parse_grid(&text)?;
    info!(
        "Loaded {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}

pub fn write_grid<P: AsRef<Path>>(grid: &PathingGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_grid(grid))?;
    info!("Grid saved to {}", path.display());
    Ok(())
}
