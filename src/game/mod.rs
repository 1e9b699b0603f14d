//! Core game logic for 24 Snake Math
//!
//! Movement, collision, phase transitions, and puzzle hand-off live here,
//! free of any I/O or rendering dependencies.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, MIN_GRID_SIZE};
pub use engine::{AnswerOutcome, GameEngine, StepOutcome};
pub use state::{CollisionType, GamePhase, GameState, Position, Snake};
