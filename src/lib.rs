//! State-Space Search Library
//!
//! A generic search engine over any type implementing [`State`], with
//! depth-first, depth-limited, iterative-deepening, breadth-first and
//! best-first (A*) strategies, plus three domains built on it: sliding-tile
//! puzzles, named-location navigation and two-link robot arm planning.

pub mod arm;
pub mod error;
pub mod frontier;
pub mod geometry;
pub mod graph;
pub mod heuristic;
pub mod navigation;
pub mod node;
pub mod persistence;
pub mod roadmap;
pub mod search;
pub mod state;
mod strategies;
pub mod tiles;

pub use error::{ParseError, RoadmapError, SearchError};
pub use heuristic::{Heuristic, ZeroHeuristic};
pub use search::{Progress, Search, SearchStats, Strategy, Termination, DEFAULT_DEPTH_CAP};
pub use state::State;
