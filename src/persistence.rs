//! Problem and solution text files.
//!
//! Navigation map:
//! - line 1: location count `N`
//! - `N` lines: one location name each
//! - next line: path count `M`
//! - `M` lines: `from to cost`, undirected
//!
//! Tile puzzle: two lines, the initial then the goal board, one character per
//! cell in row-major order. `0` or `_` is the blank, tiles past 9 are `A`,
//! `B`, ... Whitespace is ignored.
//!
//! Arm problem:
//! - line 1: `length1 length2`
//! - line 2: initial `angle1 angle2` in degrees
//! - line 3: goal `angle1 angle2` in degrees
//! - remaining non-blank lines: one obstacle each, `x_min y_min x_max y_max`
//!
//! Arm solution: one configuration per line, `angle1 angle2` in degrees with
//! three decimals.
//!
//! Every parse error names the 1-based line it happened on.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::arm::{ArmConfig, Obstacle, Workspace};
use crate::error::ParseError;
use crate::geometry::{Point, Rect};
use crate::navigation::NavigationMap;
use crate::tiles::TileState;

/// Initial and goal boards of a tile puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesProblem<const SIDE: usize = 3, const CELLS: usize = 9> {
    pub initial: TileState<SIDE, CELLS>,
    pub goal: TileState<SIDE, CELLS>,
}

/// An arm planning problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmProblem {
    pub workspace: Workspace,
    pub initial: ArmConfig,
    pub goal: ArmConfig,
}

/// Line reader that remembers the 1-based number of the last line read.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            number: 0,
        }
    }

    /// The next line, trimmed. Running out is an error.
    fn required(&mut self) -> Result<&'a str, ParseError> {
        self.number += 1;
        self.inner
            .next()
            .map(str::trim)
            .ok_or(ParseError::MissingLine { line: self.number })
    }

    /// The next line, trimmed, or `None` at the end of input.
    fn optional(&mut self) -> Option<&'a str> {
        let line = self.inner.next()?;
        self.number += 1;
        Some(line.trim())
    }
}

fn parse_token<T: FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

/// The first `N` whitespace-separated numbers on a line. Extra tokens are
/// ignored.
fn parse_numbers<const N: usize>(text: &str, line: usize) -> Result<[f64; N], ParseError> {
    let mut tokens = text.split_whitespace();
    let mut values = [0.0; N];
    for value in &mut values {
        let token = tokens
            .next()
            .ok_or(ParseError::MissingToken { line, expected: N })?;
        *value = parse_token(token, line)?;
    }
    Ok(values)
}

fn parse_degrees(text: &str, line: usize) -> Result<ArmConfig, ParseError> {
    let [angle1, angle2] = parse_numbers(text, line)?;
    Ok(ArmConfig::from_degrees(angle1, angle2))
}

pub fn parse_navigation(text: &str) -> Result<NavigationMap, ParseError> {
    let mut lines = Lines::new(text);
    let mut map = NavigationMap::new();

    let locations: usize = parse_token(lines.required()?, lines.number)?;
    for _ in 0..locations {
        map.add_location(lines.required()?);
    }

    let paths: usize = parse_token(lines.required()?, lines.number)?;
    for _ in 0..paths {
        let text = lines.required()?;
        let line = lines.number;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let &[from, to, cost, ..] = tokens.as_slice() else {
            return Err(ParseError::MissingToken { line, expected: 3 });
        };
        let cost: f64 = parse_token(cost, line)?;
        for name in [from, to] {
            if map.index_of(name).is_none() {
                return Err(ParseError::UnknownLocation {
                    line,
                    name: name.to_owned(),
                });
            }
        }
        map.connect(from, to, cost);
    }
    Ok(map)
}

pub fn load_navigation(path: impl AsRef<Path>) -> Result<NavigationMap, ParseError> {
    parse_navigation(&fs::read_to_string(path)?)
}

fn tile_value(c: char) -> Option<u8> {
    match c {
        '_' => Some(0),
        '0'..='9' => c.to_digit(10).map(|d| d as u8),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

fn parse_board<const SIDE: usize, const CELLS: usize>(
    text: &str,
    line: usize,
) -> Result<TileState<SIDE, CELLS>, ParseError> {
    let invalid = |reason: String| ParseError::InvalidBoard { line, reason };

    let mut cells = [0u8; CELLS];
    let mut count = 0;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        let tile = tile_value(c).ok_or_else(|| invalid(format!("unexpected character {c:?}")))?;
        if count < CELLS {
            cells[count] = tile;
        }
        count += 1;
    }
    if count != CELLS {
        return Err(invalid(format!("expected {CELLS} cells, found {count}")));
    }
    TileState::new(cells).ok_or_else(|| invalid(format!("not a permutation of 0..{CELLS}")))
}

pub fn parse_tiles<const SIDE: usize, const CELLS: usize>(
    text: &str,
) -> Result<TilesProblem<SIDE, CELLS>, ParseError> {
    let mut lines = Lines::new(text);
    let initial = parse_board(lines.required()?, lines.number)?;
    let goal = parse_board(lines.required()?, lines.number)?;
    Ok(TilesProblem { initial, goal })
}

pub fn load_tiles<const SIDE: usize, const CELLS: usize>(
    path: impl AsRef<Path>,
) -> Result<TilesProblem<SIDE, CELLS>, ParseError> {
    parse_tiles(&fs::read_to_string(path)?)
}

fn parse_obstacle(text: &str, line: usize) -> Result<Obstacle, ParseError> {
    let [x_min, y_min, x_max, y_max] = parse_numbers(text, line)?;
    Ok(Rect::from_corners(Point::new(x_min, y_min), Point::new(x_max, y_max)))
}

pub fn parse_arm_problem(text: &str) -> Result<ArmProblem, ParseError> {
    let mut lines = Lines::new(text);

    let [length1, length2] = parse_numbers(lines.required()?, lines.number)?;
    let initial = parse_degrees(lines.required()?, lines.number)?;
    let goal = parse_degrees(lines.required()?, lines.number)?;

    let mut obstacles = Vec::new();
    while let Some(text) = lines.optional() {
        if !text.is_empty() {
            obstacles.push(parse_obstacle(text, lines.number)?);
        }
    }

    Ok(ArmProblem {
        workspace: Workspace::new(length1, length2, obstacles),
        initial,
        goal,
    })
}

pub fn load_arm_problem(path: impl AsRef<Path>) -> Result<ArmProblem, ParseError> {
    parse_arm_problem(&fs::read_to_string(path)?)
}

/// Blank lines are skipped.
pub fn parse_arm_solution(text: &str) -> Result<Vec<ArmConfig>, ParseError> {
    let mut lines = Lines::new(text);
    let mut path = Vec::new();
    while let Some(text) = lines.optional() {
        if !text.is_empty() {
            path.push(parse_degrees(text, lines.number)?);
        }
    }
    Ok(path)
}

pub fn load_arm_solution(path: impl AsRef<Path>) -> Result<Vec<ArmConfig>, ParseError> {
    parse_arm_solution(&fs::read_to_string(path)?)
}

pub fn format_arm_solution(path: &[ArmConfig]) -> String {
    path.iter()
        .map(|config| {
            let (angle1, angle2) = config.degrees();
            format!("{angle1:.3} {angle2:.3}\n")
        })
        .collect()
}

pub fn save_arm_solution(file: impl AsRef<Path>, path: &[ArmConfig]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(file)?);
    writer.write_all(format_arm_solution(path).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;
    use crate::tiles::EightPuzzle;

    const NAVIGATION: &str = "3\nA\nB\nC\n3\nA B 2\nB C 3\nA C 10\n";

    #[test]
    fn navigation_map_parses_locations_and_paths() {
        let map = parse_navigation(NAVIGATION).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.graph().edge_count(), 3);

        let a = map.state("A").unwrap();
        let c = map.state("C").unwrap();
        assert_eq!(a.cost(&c), Some(10.0));
        assert_eq!(c.cost(&a), Some(10.0));
    }

    #[test]
    fn navigation_errors_name_the_line() {
        let unknown = parse_navigation("2\nA\nB\n1\nA Z 1\n").unwrap_err();
        assert!(matches!(unknown, ParseError::UnknownLocation { line: 5, ref name } if name == "Z"));

        let short = parse_navigation("2\nA\nB\n1\nA B\n").unwrap_err();
        assert!(matches!(short, ParseError::MissingToken { line: 5, expected: 3 }));

        let truncated = parse_navigation("2\nA\nB\n2\nA B 1\n").unwrap_err();
        assert!(matches!(truncated, ParseError::MissingLine { line: 6 }));

        let count = parse_navigation("two\n").unwrap_err();
        assert!(matches!(count, ParseError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn tile_boards_accept_both_blank_markers() {
        let problem: TilesProblem = parse_tiles("413 726 058\n1 2 3 4 5 6 7 8 _\n").unwrap();
        assert_eq!(
            problem.initial,
            EightPuzzle::new([4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap()
        );
        assert_eq!(problem.goal, EightPuzzle::solved());
    }

    #[test]
    fn bad_tile_boards_are_rejected() {
        let short = parse_tiles::<3, 9>("12345678\n123456780\n").unwrap_err();
        assert!(matches!(short, ParseError::InvalidBoard { line: 1, .. }));

        let repeated = parse_tiles::<3, 9>("123456780\n123456788\n").unwrap_err();
        assert!(matches!(repeated, ParseError::InvalidBoard { line: 2, .. }));

        let missing_goal = parse_tiles::<3, 9>("123456780\n").unwrap_err();
        assert!(matches!(missing_goal, ParseError::MissingLine { line: 2 }));
    }

    #[test]
    fn arm_problem_reads_lengths_angles_and_obstacles() {
        let problem = parse_arm_problem("0.5 0.4\n10 20\n80 -30\n0.6 0.6 0.8 0.8\n\n").unwrap();
        assert_eq!(problem.workspace.length1, 0.5);
        assert_eq!(problem.workspace.length2, 0.4);
        assert_eq!(problem.initial, ArmConfig::from_degrees(10.0, 20.0));
        assert_eq!(problem.goal, ArmConfig::from_degrees(80.0, -30.0));
        assert_eq!(
            problem.workspace.obstacles,
            vec![Rect::from_corners(Point::new(0.6, 0.6), Point::new(0.8, 0.8))]
        );
    }

    #[test]
    fn arm_problem_errors_name_the_line() {
        let bad = parse_arm_problem("0.5 0.4\n10 x\n80 -30\n").unwrap_err();
        assert!(matches!(bad, ParseError::InvalidNumber { line: 2, ref token } if token == "x"));

        let short = parse_arm_problem("0.5 0.4\n10 20\n80 -30\n0.1 0.1 0.2\n").unwrap_err();
        assert!(matches!(short, ParseError::MissingToken { line: 4, expected: 4 }));

        let truncated = parse_arm_problem("0.5 0.4\n10 20\n").unwrap_err();
        assert!(matches!(truncated, ParseError::MissingLine { line: 3 }));
    }

    #[test]
    fn arm_solution_is_written_in_degrees() {
        let path = [
            ArmConfig::from_degrees(10.0, 20.0),
            ArmConfig::from_degrees(12.5, -7.25),
        ];
        let text = format_arm_solution(&path);
        assert_eq!(text, "10.000 20.000\n12.500 -7.250\n");
        assert_eq!(parse_arm_solution(&text).unwrap(), path);
    }
}
