use std::collections::HashSet;
use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState};
use crate::metrics::GameMetrics;

/// Agent settings shown in the header
#[derive(Debug, Clone, Copy)]
pub struct AutopilotStatus {
    pub tick: Duration,
    pub optimize: bool,
}

/// Everything drawn around the bare game state
#[derive(Debug, Clone, Copy)]
pub enum Hud<'a> {
    /// The player steers; `hint` is the cycle route to the food when shown
    Keyboard {
        hint: Option<&'a [Cell]>,
        paused: bool,
    },
    /// The agent steers along `path`
    Autopilot {
        path: &'a [Cell],
        paused: bool,
        status: AutopilotStatus,
    },
}

impl<'a> Hud<'a> {
    fn path(&self) -> &'a [Cell] {
        match *self {
            Hud::Keyboard { hint, .. } => hint.unwrap_or(&[]),
            Hud::Autopilot { path, .. } => path,
        }
    }

    fn paused(&self) -> bool {
        match *self {
            Hud::Keyboard { paused, .. } | Hud::Autopilot { paused, .. } => paused,
        }
    }
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
        hud: &Hud,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, hud), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = if state.won {
            self.render_game_end(state, "BOARD FILLED", Color::Green)
        } else if !state.is_alive {
            self.render_game_end(state, "GAME OVER", Color::Red)
        } else {
            self.render_grid(state, hud.path())
        };
        frame.render_widget(board, game_area);

        frame.render_widget(self.render_controls(hud), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, path: &[Cell]) -> Paragraph<'_> {
        let path: HashSet<Cell> = path.iter().copied().collect();
        let mut lines = Vec::new();

        for row in 0..state.grid_height {
            let mut spans = Vec::new();

            for col in 0..state.grid_width {
                let cell = Cell::new(col as i32, row as i32);

                let span = if cell == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if path.contains(&cell) {
                    Span::styled("· ", Style::default().fg(Color::Yellow))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        hud: &Hud,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ];

        if let Hud::Autopilot { status, .. } = hud {
            let optimize = if status.optimize { "on" } else { "off" };
            spans.extend([
                Span::raw("    "),
                Span::styled("Tick: ", label),
                Span::styled(format!("{}ms", status.tick.as_millis()), value),
                Span::raw("    "),
                Span::styled("Shortcuts: ", label),
                Span::styled(format!("{} ({optimize})", metrics.shortcuts), value),
            ]);
        }
        if hud.paused() {
            spans.extend([
                Span::raw("    "),
                Span::styled(
                    "PAUSED",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_end(&self, state: &GameState, title: &'static str, color: Color) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
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
            Line::from(""),
            Line::from(vec![
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
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let spans = match hud {
            Hud::Autopilot { .. } => vec![
                Span::styled("Space", key),
                Span::raw(" pause | "),
                Span::styled("1-4", key),
                Span::raw(" speed | "),
                Span::styled("O", key),
                Span::raw(" shortcuts | "),
                Span::styled("R", key),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Hud::Keyboard { .. } => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("H", key),
                Span::raw(" route | "),
                Span::styled("Space", key),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
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
    use crate::game::{GameEngine, GameConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_autopilot_header() {
        let mut engine = GameEngine::with_seed(GameConfig::new(6, 6), 1);
        let state = engine.reset();
        let metrics = GameMetrics::new();
        let hud = Hud::Autopilot {
            path: &[],
            paused: true,
            status: AutopilotStatus {
                tick: Duration::from_millis(80),
                optimize: true,
            },
        };

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics, &hud))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("80ms"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_renders_win_screen() {
        let mut engine = GameEngine::with_seed(GameConfig::new(6, 6), 1);
        let mut state = engine.reset();
        state.won = true;
        let metrics = GameMetrics::new();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let hud = Hud::Keyboard {
                    hint: None,
                    paused: false,
                };
                Renderer::new().render(frame, &state, &metrics, &hud)
            })
            .unwrap();

        assert!(screen(&terminal).contains("BOARD FILLED"));
    }

    #[test]
    fn test_route_hint_only_when_shown() {
        let mut engine = GameEngine::with_seed(GameConfig::new(6, 6), 1);
        let state = engine.reset();
        let metrics = GameMetrics::new();
        let route = [state.food];
        let free = (0..6)
            .flat_map(|row| (0..6).map(move |col| Cell::new(col, row)))
            .find(|&cell| !state.is_occupied_by_snake(cell) && cell != state.food)
            .unwrap();
        let hint = [free];

        let draw = |hint: Option<&[Cell]>| {
            let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
            terminal
                .draw(|frame| {
                    let hud = Hud::Keyboard { hint, paused: false };
                    Renderer::new().render(frame, &state, &metrics, &hud)
                })
                .unwrap();
            screen(&terminal)
        };

        assert!(draw(Some(&hint)).contains('·'));
        assert!(!draw(None).contains('·'));
        assert!(!draw(Some(&route)).contains('·'));
    }
}
