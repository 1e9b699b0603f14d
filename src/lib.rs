//! 24 Snake Math - a snake game where fruit poses arithmetic puzzles
//!
//! This library provides:
//! - Core game logic (game module)
//! - Puzzle bank, expression checking, and scoring (puzzle module)
//! - High score persistence (storage module)
//! - TUI rendering (render module) and keyboard input (input module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod puzzle;
pub mod render;
pub mod storage;
