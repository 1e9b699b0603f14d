use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::game::{GamePhase, GameState, Position};
use crate::metrics::GameMetrics;
use crate::puzzle::ExpressionBuilder;

/// Puzzle panel contents while answering
pub struct AnswerView<'a> {
    pub builder: &'a ExpressionBuilder,
    /// Message from the last rejected answer
    pub feedback: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        high_score: u32,
        answer: Option<&AnswerView<'_>>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, high_score);
        frame.render_widget(stats, chunks[0]);

        match state.phase {
            GamePhase::Answering => {
                // Grid on the left, puzzle panel on the right
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);

                frame.render_widget(self.render_grid(state), halves[0]);
                if let Some(answer) = answer {
                    self.render_question_panel(frame, halves[1], state, answer);
                }
            }
            GamePhase::GameOver => {
                let area = self.centered_game_area(chunks[1]);
                frame.render_widget(self.render_game_over(state, metrics), area);
            }
            GamePhase::Start => {
                let area = self.centered_game_area(chunks[1]);
                frame.render_widget(self.render_start_screen(state), area);
            }
            GamePhase::Playing => {
                let area = self.centered_game_area(chunks[1]);
                frame.render_widget(self.render_grid(state), area);
            }
        }

        let controls = self.render_controls(state.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn centered_game_area(&self, area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_size {
            let mut spans = Vec::new();

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.fruit {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = if state.phase == GamePhase::Answering {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        high_score: u32,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Streak: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}x", state.streak),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_question_panel(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &GameState,
        answer: &AnswerView<'_>,
    ) {
        let Some(question) = state.question.as_ref() else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Make 24! ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Numbers
                Constraint::Length(3), // Expression
                Constraint::Length(1), // Usage indicator
                Constraint::Length(3), // Timer gauge
                Constraint::Length(2), // Feedback
                Constraint::Min(0),    // Key help
            ])
            .split(inner);

        // The four numbers, dimmed once consumed
        let used = answer.builder.used();
        let mut number_spans = Vec::new();
        for (i, number) in question.numbers.iter().enumerate() {
            let style = if used[i] {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            };
            number_spans.push(Span::styled(format!(" {} ", number), style));
            if i < 3 {
                number_spans.push(Span::raw("  "));
            }
        }
        let numbers = Paragraph::new(Line::from(number_spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Numbers "));
        frame.render_widget(numbers, sections[0]);

        let expression = Paragraph::new(answer.builder.expression())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Expression "));
        frame.render_widget(expression, sections[1]);

        let used_count = answer.builder.used_count();
        let usage_style = if used_count == 4 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let usage = Paragraph::new(Line::from(Span::styled(
            format!("Numbers used: {}/4", used_count),
            usage_style,
        )))
        .alignment(Alignment::Center);
        frame.render_widget(usage, sections[2]);

        frame.render_widget(self.timer_gauge(state), sections[3]);

        if let Some(feedback) = answer.feedback {
            let message = Paragraph::new(Line::from(Span::styled(
                feedback,
                Style::default().fg(Color::Red),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(message, sections[4]);
        }

        let help = Paragraph::new(vec![
            Line::from("Type the numbers and + - * / ( )"),
            Line::from("Enter to check | Backspace to undo | Esc to clear"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(help, sections[5]);
    }

    fn timer_gauge(&self, state: &GameState) -> Gauge<'_> {
        let limit = state.question_time_limit.max(1);
        let ratio = f64::from(state.time_remaining) / f64::from(limit);

        // Green above 60%, yellow above 30%, red below
        let color = if ratio > 0.6 {
            Color::Green
        } else if ratio > 0.3 {
            Color::Yellow
        } else {
            Color::Red
        };

        let minutes = state.time_remaining / 60;
        let seconds = state.time_remaining % 60;

        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Time "))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("{}:{:02}", minutes, seconds))
    }

    fn render_start_screen(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "24 SNAKE MATH",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Eat the fruit to get a math puzzle!"),
            Line::from(vec![
                Span::raw("Make "),
                Span::styled("24", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" using all 4 numbers"),
            ]),
            Line::from(format!(
                "You have {} seconds per puzzle",
                state.question_time_limit
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Green)),
                Span::raw(" or "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to start"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        // Present on a puzzle timeout: show the solution that was missed
        if let Some(question) = state.question.as_ref() {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("One solution was: ", Style::default().fg(Color::Gray)),
                Span::styled(question.hint, Style::default().fg(Color::Cyan)),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Games: ", Style::default().fg(Color::Gray)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            Span::styled("Puzzles solved: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", metrics.puzzles_solved, metrics.puzzles_attempted),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            Span::styled("Session best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                metrics.session_best.to_string(),
                Style::default().fg(Color::White),
            ),
        ]));

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: GamePhase) -> Paragraph<'static> {
        let text = match phase {
            GamePhase::Answering => vec![Line::from(vec![
                Span::styled("0-9 + - * / ( )", Style::default().fg(Color::Cyan)),
                Span::raw(" to build | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to check"),
            ])],
            _ => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Snake};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw_to_string(state: &GameState, metrics: &GameMetrics, high_score: u32) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, state, metrics, high_score, None))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn game_over_state() -> GameState {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), crate::game::Direction::Right, 3),
            Position::new(7, 5),
            10,
            120,
        );
        state.phase = GamePhase::GameOver;
        state.score = 400;
        state
    }

    #[test]
    fn test_game_over_shows_session_stats() {
        let mut metrics = GameMetrics::new();
        metrics.on_answer(true);
        metrics.on_answer(false);
        metrics.on_answer(true);
        metrics.on_game_over(400);

        let screen = draw_to_string(&game_over_state(), &metrics, 500);

        assert!(screen.contains("Final Score: 400"));
        assert!(screen.contains("Games: 1"));
        assert!(screen.contains("Puzzles solved: 2/3"));
        assert!(screen.contains("Session best: 400"));
    }

    #[test]
    fn test_game_over_shows_missed_puzzle_hint() {
        let mut state = game_over_state();
        state.question = Some(crate::puzzle::Question {
            numbers: [1, 2, 3, 4],
            hint: "(1 + 2 + 3) × 4",
        });

        let screen = draw_to_string(&state, &GameMetrics::new(), 0);
        assert!(screen.contains("One solution was:"));
    }

    #[test]
    fn test_header_shows_persisted_best() {
        let screen = draw_to_string(&game_over_state(), &GameMetrics::new(), 777);
        assert!(screen.contains("Best: 777"));
    }
}
