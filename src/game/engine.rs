use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use crate::puzzle::{check_expression, puzzle_points, PuzzleBank, Rejection, Verdict};
use rand::Rng;

/// Result of a movement tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Whether the snake reached the fruit this tick
    pub ate_fruit: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

/// Result of submitting a puzzle answer
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Points already added to the score
    Correct { points: u32 },
    /// Timer penalty already applied; the game continues
    Incorrect { reason: Rejection },
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    bank: PuzzleBank,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            bank: PuzzleBank::new(),
            rng: rand::thread_rng(),
        }
    }

    /// Reset to a fresh game in the Start phase
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // First fruit sits three quarters across the center row, falling
        // back to a random cell on grids too small for that
        let fruit = Position::new((self.config.grid_size * 3 / 4) as i32, center);
        let fruit = if snake.occupies(fruit) {
            self.spawn_fruit_avoid_snake(&snake)
        } else {
            fruit
        };

        GameState::new(
            snake,
            fruit,
            self.config.grid_size,
            self.config.question_time_secs,
        )
    }

    /// Execute one movement tick. Only meaningful while Playing.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepOutcome {
        if state.phase != GamePhase::Playing {
            return StepOutcome {
                ate_fruit: false,
                collision: None,
            };
        }

        // Update direction based on action (prevent 180-degree turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = GamePhase::GameOver;
            return StepOutcome {
                ate_fruit: false,
                collision: Some(collision),
            };
        }

        let ate_fruit = new_head == state.fruit;
        state.snake.advance(ate_fruit);

        if ate_fruit {
            // Movement pauses until the puzzle is answered
            state.phase = GamePhase::Answering;
            state.question = Some(self.bank.next_question());
            state.time_remaining = self.config.question_time_secs;
        }

        StepOutcome {
            ate_fruit,
            collision: None,
        }
    }

    /// Check a submitted answer against the active puzzle.
    ///
    /// Returns None when no puzzle is active. A correct answer scores,
    /// extends the streak, spawns a new fruit, and resumes play; a wrong
    /// answer costs timer seconds but keeps the streak.
    pub fn submit_answer(&mut self, state: &mut GameState, expression: &str) -> Option<AnswerOutcome> {
        if state.phase != GamePhase::Answering {
            return None;
        }
        let question = state.question.as_ref()?;

        match check_expression(expression, &question.numbers) {
            Verdict::Correct => {
                let points = puzzle_points(state.time_remaining, state.streak);
                state.score += points;
                state.streak += 1;
                state.fruit = self.spawn_fruit_avoid_snake(&state.snake);
                state.question = None;
                state.phase = GamePhase::Playing;
                Some(AnswerOutcome::Correct { points })
            }
            Verdict::Incorrect(reason) => {
                state.time_remaining = state
                    .time_remaining
                    .saturating_sub(self.config.wrong_answer_penalty_secs);
                Some(AnswerOutcome::Incorrect { reason })
            }
        }
    }

    /// Advance the puzzle countdown by one second. Returns true when the
    /// timer expires and ends the game.
    pub fn tick_question(&mut self, state: &mut GameState) -> bool {
        if state.phase != GamePhase::Answering {
            return false;
        }

        if state.time_remaining <= 1 {
            state.time_remaining = 0;
            // Question is retained so the missed puzzle's hint can be shown
            state.phase = GamePhase::GameOver;
            return true;
        }

        state.time_remaining -= 1;
        false
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn fruit at a random cell not occupied by the snake
    fn spawn_fruit_avoid_snake(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_size) as i32;
            let y = self.rng.gen_range(0..self.config.grid_size) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
