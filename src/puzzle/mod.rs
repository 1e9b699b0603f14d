//! Puzzle engine: bank selection, expression checking, and scoring
//!
//! Pure logic with no I/O so it can be exercised directly from tests.

pub mod bank;
pub mod builder;
pub mod eval;
pub mod score;

pub use bank::{Puzzle, PuzzleBank, Question};
pub use builder::ExpressionBuilder;
pub use eval::{check_expression, Rejection, Verdict, TARGET, TOLERANCE};
pub use score::puzzle_points;
