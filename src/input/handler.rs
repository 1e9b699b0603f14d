use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GamePhase};

/// What a key press means in the current phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Queue a direction change for the next tick
    Steer(Direction),
    /// Leave the start screen
    Begin,
    /// Start a fresh game
    Restart,
    Quit,
    /// Append a puzzle digit to the expression
    PushDigit(char),
    /// Append an operator or parenthesis to the expression
    PushSymbol(char),
    /// Remove the last expression character
    Undo,
    /// Wipe the expression
    ClearExpression,
    /// Check the expression against the puzzle
    Submit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key event to an action. The same key can mean different things
    /// in different phases, e.g. digits steer nothing but build expressions.
    pub fn handle_key_event(&self, key: KeyEvent, phase: GamePhase) -> KeyAction {
        // Ctrl+C quits from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match phase {
            GamePhase::Start => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Begin,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
                _ => KeyAction::None,
            },

            GamePhase::Playing => match key.code {
                // Arrow keys
                KeyCode::Up => KeyAction::Steer(Direction::Up),
                KeyCode::Down => KeyAction::Steer(Direction::Down),
                KeyCode::Left => KeyAction::Steer(Direction::Left),
                KeyCode::Right => KeyAction::Steer(Direction::Right),

                // WASD
                KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
                KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
                KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
                KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

                _ => KeyAction::None,
            },

            GamePhase::Answering => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => KeyAction::PushDigit(c),
                KeyCode::Char(c @ ('+' | '-' | '*' | '/' | '(' | ')')) => {
                    KeyAction::PushSymbol(c)
                }
                KeyCode::Enter => KeyAction::Submit,
                KeyCode::Backspace => KeyAction::Undo,
                // Esc clears rather than quits so a stray press cannot
                // abandon a game mid-puzzle
                KeyCode::Esc | KeyCode::Delete => KeyAction::ClearExpression,
                _ => KeyAction::None,
            },

            GamePhase::GameOver => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
                _ => KeyAction::None,
            },
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
