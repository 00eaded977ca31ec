use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{GridWorld, TickOutcome};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::settings::Settings;

/// Terminal cells are roughly twice as tall as they are wide
const ROW_ASPECT: f32 = 2.0;

pub struct HumanMode {
    world: GridWorld,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(settings: Settings, seed: Option<u64>) -> Result<Self> {
        let tick_interval = settings.game.tick_interval();
        let world = match seed {
            Some(seed) => GridWorld::with_seed(settings.game, seed)?,
            None => GridWorld::new(settings.game)?,
        };

        Ok(Self {
            world,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(settings.swipe),
            tick_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
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

        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.world, &self.metrics);
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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.apply(action);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
            _ => {}
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(heading) => {
                self.world.request(heading);
            }
            KeyAction::Confirm => {
                if self.world.status().is_over() {
                    self.reset_game();
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let x = f32::from(mouse.column);
        let y = f32::from(mouse.row) * ROW_ASPECT;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.world.status().is_running() {
                    self.swipe.begin(x, y, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let world = &mut self.world;
                if let Some(heading) = self.swipe.finish(x, y, now, |h| world.request(h)) {
                    tracing::debug!(?heading, "swipe accepted");
                }
            }
            _ => {}
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::Ended(reason) = self.world.tick() {
            self.metrics
                .on_game_over(self.world.score(), self.world.snake().len(), reason);
        }
    }

    fn reset_game(&mut self) {
        self.world.reset();
        self.swipe.cancel();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStatus, Heading, Vec3i};
    use crossterm::event::KeyModifiers;

    fn mode() -> HumanMode {
        HumanMode::new(Settings::default(), Some(17)).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.world.status().is_running());
        assert_eq!(mode.world.score(), 0);
        assert_eq!(mode.tick_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_key_turn_is_queued() {
        let mut mode = mode();
        mode.apply(KeyAction::Turn(Heading::PosY));
        mode.update_game();
        assert_eq!(mode.world.heading(), Heading::PosY);
        assert_eq!(mode.world.snake().head(), Vec3i::new(4, 5, 4));
    }

    #[test]
    fn test_enter_only_restarts_after_game_over() {
        let mut mode = mode();
        mode.update_game();
        mode.apply(KeyAction::Confirm);
        assert_eq!(mode.world.steps(), 1);

        while mode.world.status().is_running() {
            mode.update_game();
        }
        assert_eq!(mode.metrics.games_played, 1);

        mode.apply(KeyAction::Confirm);
        assert_eq!(mode.world.status(), GameStatus::Running);
        assert_eq!(mode.world.score(), 0);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.update_game();
        mode.apply(KeyAction::Restart);
        assert_eq!(mode.world.steps(), 0);
        assert!(mode.world.status().is_running());
    }

    #[test]
    fn test_mouse_swipe_turns_snake() {
        let mut mode = mode();
        let t0 = Instant::now();

        mode.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 10), t0);
        mode.handle_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), 21, 4),
            t0 + Duration::from_millis(80),
        );

        assert_eq!(
            mode.world.controller().pending().collect::<Vec<_>>(),
            vec![Heading::PosY]
        );
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
