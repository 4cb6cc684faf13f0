use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use tracing::info;

use crate::engine::Engine;
use crate::game::GameSettings;
use crate::input::RawEvent;

use super::timer::TickTimer;

/// Interactive play in the terminal
pub struct PlayMode {
    engine: Engine,
    timer: TickTimer,
}

impl PlayMode {
    pub fn new(settings: GameSettings, seed: Option<u64>) -> Self {
        Self {
            engine: Engine::with_seed(settings, seed),
            timer: TickTimer::new(),
        }
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

    /// One iteration per raw event: dispatch it, follow the timer the
    /// active state armed, then redraw
    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.timer.sync(self.engine.armed_timer());
        self.draw(terminal)?;

        while self.engine.is_active() {
            let raw = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => RawEvent::Terminal(event),
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => {
                        info!("terminal event stream closed");
                        self.engine.halt();
                        break;
                    }
                },

                _ = self.timer.tick() => RawEvent::Timer,

                _ = tokio::signal::ctrl_c() => {
                    self.engine.halt();
                    break;
                }
            };

            self.engine.handle_raw(&raw);
            self.timer.sync(self.engine.armed_timer());

            if self.engine.is_active() {
                self.draw(terminal)?;
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| self.engine.render(frame))
            .context("Failed to draw frame")?;
        Ok(())
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
