use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, AnswerOutcome, Direction, GameConfig, GameEngine, GamePhase, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::puzzle::ExpressionBuilder;
use crate::render::{AnswerView, Renderer};
use crate::storage::HighScoreStore;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    store: HighScoreStore,
    high_score: u32,
    tick_ms: u64,
    should_quit: bool,
    pending_direction: Option<Direction>,
    builder: Option<ExpressionBuilder>,
    feedback: Option<String>,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;

        let tick_ms = config.tick_ms;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let high_score = store.load().context("Failed to load high score")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            high_score,
            tick_ms,
            should_quit: false,
            pending_direction: None,
            builder: None,
            feedback: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Movement ticks at the configured pace (250ms by default)
        let mut move_timer = interval(Duration::from_millis(self.tick_ms));

        // Puzzle countdown runs at 1 Hz
        let mut question_timer = interval(Duration::from_secs(1));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Movement tick
                _ = move_timer.tick() => {
                    if self.state.phase == GamePhase::Playing {
                        let posed_puzzle = self.update_game()?;
                        if posed_puzzle {
                            // Give the first countdown second its full
                            // duration instead of the interval's remainder
                            question_timer.reset();
                        }
                    }
                }

                // Puzzle countdown
                _ = question_timer.tick() => {
                    if self.state.phase == GamePhase::Answering
                        && self.engine.tick_question(&mut self.state)
                    {
                        self.on_game_over()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let answer = self.builder.as_ref().map(|builder| AnswerView {
                        builder,
                        feedback: self.feedback.as_deref(),
                    });
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.high_score,
                            answer.as_ref(),
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key, self.state.phase);

            match action {
                KeyAction::Begin => {
                    self.state.phase = GamePhase::Playing;
                    self.metrics.on_game_start();
                }
                KeyAction::Steer(dir) => {
                    self.pending_direction = Some(dir);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::PushDigit(digit) => {
                    if let Some(builder) = self.builder.as_mut() {
                        builder.push_digit(digit);
                        self.feedback = None;
                    }
                }
                KeyAction::PushSymbol(symbol) => {
                    if let Some(builder) = self.builder.as_mut() {
                        builder.push_symbol(symbol);
                        self.feedback = None;
                    }
                }
                KeyAction::Undo => {
                    if let Some(builder) = self.builder.as_mut() {
                        builder.backspace();
                        self.feedback = None;
                    }
                }
                KeyAction::ClearExpression => {
                    if let Some(builder) = self.builder.as_mut() {
                        builder.clear();
                        self.feedback = None;
                    }
                }
                KeyAction::Submit => {
                    self.submit_answer()?;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Run one movement tick. Returns true when a fruit was eaten and a
    /// puzzle posed, so the caller can restart the countdown interval.
    fn update_game(&mut self) -> Result<bool> {
        let action = self
            .pending_direction
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        self.pending_direction = None;

        let outcome = self.engine.step(&mut self.state, action);

        if outcome.ate_fruit {
            // A puzzle was posed; begin expression entry
            if let Some(question) = self.state.question.as_ref() {
                self.builder = Some(ExpressionBuilder::new(question.numbers));
            }
            self.feedback = None;
        }

        if outcome.collision.is_some() {
            self.on_game_over()?;
        }

        Ok(outcome.ate_fruit)
    }

    fn submit_answer(&mut self) -> Result<()> {
        let Some(builder) = self.builder.as_ref() else {
            return Ok(());
        };
        if builder.is_empty() {
            return Ok(());
        }

        let expression = builder.expression().to_string();
        match self.engine.submit_answer(&mut self.state, &expression) {
            Some(AnswerOutcome::Correct { .. }) => {
                self.metrics.on_answer(true);
                self.builder = None;
                self.feedback = None;
            }
            Some(AnswerOutcome::Incorrect { reason }) => {
                self.metrics.on_answer(false);
                self.feedback = Some(reason.to_string());
            }
            None => {}
        }

        Ok(())
    }

    fn on_game_over(&mut self) -> Result<()> {
        self.metrics.on_game_over(self.state.score);

        let improved = self
            .store
            .record(self.state.score)
            .context("Failed to save high score")?;
        if improved {
            self.high_score = self.state.score;
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.state.phase = GamePhase::Playing;
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.builder = None;
        self.feedback = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_mode() -> (HumanMode, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));
        let mode = HumanMode::new(GameConfig::default(), store).unwrap();
        (mode, dir)
    }

    #[test]
    fn test_game_initialization() {
        let (mode, _dir) = test_mode();
        assert_eq!(mode.state.phase, GamePhase::Start);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.high_score, 0);
    }

    #[test]
    fn test_game_reset() {
        let (mut mode, _dir) = test_mode();
        mode.state.score = 500;
        mode.state.phase = GamePhase::GameOver;
        mode.feedback = Some("Result is 10.00, not 24".to_string());

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.phase, GamePhase::Playing);
        assert!(mode.feedback.is_none());
        assert!(mode.builder.is_none());
    }

    #[test]
    fn test_degenerate_grid_config_rejected() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));
        assert!(HumanMode::new(GameConfig::new(0), store.clone()).is_err());
        assert!(HumanMode::new(GameConfig::new(3), store).is_err());
    }

    #[test]
    fn test_fruit_capture_signals_countdown_restart() {
        let (mut mode, _dir) = test_mode();
        mode.state.phase = GamePhase::Playing;
        mode.state.fruit = mode
            .state
            .snake
            .head()
            .moved_in_direction(mode.state.snake.direction);

        let posed_puzzle = mode.update_game().unwrap();

        assert!(posed_puzzle);
        assert_eq!(mode.state.phase, GamePhase::Answering);
        assert!(mode.builder.is_some());
    }

    #[test]
    fn test_plain_movement_does_not_restart_countdown() {
        let (mut mode, _dir) = test_mode();
        mode.state.phase = GamePhase::Playing;

        assert!(!mode.update_game().unwrap());
    }

    #[test]
    fn test_game_over_persists_high_score() {
        let (mut mode, _dir) = test_mode();
        mode.state.score = 620;

        mode.on_game_over().unwrap();

        assert_eq!(mode.high_score, 620);
        assert_eq!(mode.store.load().unwrap(), 620);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_lower_score_keeps_stored_best() {
        let (mut mode, _dir) = test_mode();
        mode.state.score = 620;
        mode.on_game_over().unwrap();

        mode.state.score = 300;
        mode.on_game_over().unwrap();

        assert_eq!(mode.high_score, 620);
        assert_eq!(mode.store.load().unwrap(), 620);
    }
}
