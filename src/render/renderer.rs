use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{EndReason, GameStatus, GridWorld, Vec3i};
use crate::metrics::GameMetrics;

/// Draws the cube as a stack of horizontal slices, one panel per Y layer.
/// Inside a panel X runs left to right and Z runs top to bottom.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, world: &GridWorld, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(world, metrics);
        frame.render_widget(stats, chunks[0]);

        match world.status() {
            GameStatus::Running => self.render_layers(frame, chunks[1], world),
            GameStatus::GameOver(reason) => {
                let game_over = self.render_game_over(world, metrics, reason);
                frame.render_widget(game_over, chunks[1]);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_layers(&self, frame: &mut Frame, area: Rect, world: &GridWorld) {
        let size = world.config().grid_size;
        let panel_width = (size as u16) * 2 + 2;
        let panel_height = size as u16 + 2;
        let per_row = (area.width / panel_width).max(1) as usize;

        // Top layer first, like looking down through the cube
        let layers: Vec<i32> = (0..size).rev().collect();
        let rows: Vec<&[i32]> = layers.chunks(per_row).collect();

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                rows.iter()
                    .map(|_| Constraint::Length(panel_height))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(area);

        for (row, row_area) in rows.iter().zip(row_areas.iter()) {
            let panel_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    row.iter()
                        .map(|_| Constraint::Length(panel_width))
                        .chain(std::iter::once(Constraint::Min(0))),
                )
                .split(*row_area);

            for (&y, panel_area) in row.iter().zip(panel_areas.iter()) {
                frame.render_widget(self.render_layer(world, y), *panel_area);
            }
        }
    }

    fn render_layer(&self, world: &GridWorld, y: i32) -> Paragraph<'_> {
        let size = world.config().grid_size;
        let head = world.snake().head();
        let food = world.food();
        let mut lines = Vec::with_capacity(size as usize);

        for z in 0..size {
            let mut spans = Vec::with_capacity(size as usize);

            for x in 0..size {
                let cell = Vec3i::new(x, y, z);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if world.is_occupied(cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if food == Some(cell) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        // Highlight the slices the player cares about
        let border_color = if head.y == y {
            Color::Cyan
        } else if food.is_some_and(|cell| cell.y == y) {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(format!(" y={y} ")),
        )
    }

    fn render_stats(&self, world: &GridWorld, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(world.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(world.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Heading: ", label),
            Span::styled(world.heading().label(), Style::default().fg(Color::Cyan)),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(world.steps().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Snake 3D "),
        )
    }

    fn render_game_over(
        &self,
        world: &GridWorld,
        metrics: &GameMetrics,
        reason: EndReason,
    ) -> Paragraph<'_> {
        let (title, color, detail) = match reason {
            EndReason::Wall => ("GAME OVER", Color::Red, "You hit the wall"),
            EndReason::SelfCollision => ("GAME OVER", Color::Red, "You ran into yourself"),
            EndReason::BoardFilled => ("BOARD FILLED", Color::Green, "Every cell is snake"),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    world.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Longest Snake: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.longest_snake.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Boards Filled: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.boards_filled.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
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

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Red)),
            Span::raw(" X | "),
            Span::styled("W/S", Style::default().fg(Color::Green)),
            Span::raw(" Y | "),
            Span::styled("↑↓", Style::default().fg(Color::Blue)),
            Span::raw(" Z | drag to swipe | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
