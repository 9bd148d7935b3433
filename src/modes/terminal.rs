//! The terminal loop shared by the interactive modes
//!
//! A [`Screen`] supplies game ticks, key handling and drawing; [`run`] owns
//! the terminal, the event stream and the two timers.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::input::{Controls, InputHandler, KeyAction};

/// Render at 30 FPS
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

type Tui = Terminal<CrosstermBackend<Stderr>>;

/// One interactive mode as seen by [`run`]
pub trait Screen {
    /// Key map to translate presses with
    fn controls(&self) -> Controls;

    /// Current time between game ticks; re-read after every key
    fn tick_period(&self) -> Duration;

    fn handle_key(&mut self, action: KeyAction) -> Result<()>;

    fn tick(&mut self) -> Result<()>;

    fn draw(&mut self, frame: &mut Frame);
}

/// Take over the terminal and drive `screen` until the user quits
pub async fn run<S: Screen>(screen: &mut S) -> Result<()> {
    let mut terminal = enter()?;
    let result = drive(screen, &mut terminal).await;
    leave(&mut terminal)?;
    result
}

fn enter() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

fn leave(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

async fn drive<S: Screen>(screen: &mut S, terminal: &mut Tui) -> Result<()> {
    let input = InputHandler::new(screen.controls());
    let mut events = EventStream::new();
    let mut tick_timer = interval(screen.tick_period());
    let mut render_timer = interval(FRAME_INTERVAL);

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                let Some(Ok(Event::Key(key))) = maybe_event else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match input.handle_key_event(key) {
                    KeyAction::Quit => break,
                    action => screen.handle_key(action)?,
                }
                retime(&mut tick_timer, screen.tick_period());
            }

            _ = tick_timer.tick() => screen.tick()?,

            _ = render_timer.tick() => {
                terminal
                    .draw(|frame| screen.draw(frame))
                    .context("Failed to draw frame")?;
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

/// Swap in a timer with the new period; the first tick lands one period out
fn retime(timer: &mut Interval, period: Duration) {
    if timer.period() != period {
        *timer = interval_at(Instant::now() + period, period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_retime_changes_the_period() {
        let mut timer = interval(Duration::from_millis(500));
        timer.tick().await;

        retime(&mut timer, Duration::from_millis(16));
        assert_eq!(timer.period(), Duration::from_millis(16));

        let start = Instant::now();
        for _ in 0..3 {
            timer.tick().await;
        }
        assert_eq!(start.elapsed(), Duration::from_millis(48));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retime_keeps_a_matching_timer() {
        let mut timer = interval(Duration::from_millis(125));
        timer.tick().await;
        tokio::time::advance(Duration::from_millis(100)).await;

        retime(&mut timer, Duration::from_millis(125));

        let start = Instant::now();
        timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(25));
    }
}
