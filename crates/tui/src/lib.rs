//! Terminal rendering backend for argform.
//!
//! [`TuiBackend`] walks a build spec into a flat form, runs a blocking
//! crossterm event loop, and hands each submission to the engine through
//! the render contract. The terminal is initialized on entry and restored
//! on every exit path, including errors.

pub mod app;
pub mod form;
pub mod theme;

use anyhow::Result;
use argform_engine::{RenderBackend, SessionCallbacks};
use argform_types::BuildSpec;
use argform_util::base24_theme;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};
use crate::theme::Theme;

/// Ratatui-based implementation of the render contract.
#[derive(Debug, Default)]
pub struct TuiBackend;

impl TuiBackend {
    pub fn new() -> Self {
        TuiBackend
    }

    fn event_loop(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        spec: &BuildSpec,
        callbacks: &mut SessionCallbacks<'_>,
    ) -> Result<()> {
        let palette = base24_theme(spec.theme.as_deref(), spec.dark_theme);
        let mut app = App::new(spec, Theme::from_base24(&palette));
        tracing::debug!(fields = app.rows.len(), "render session started");

        loop {
            terminal.draw(|frame| form::draw(frame, &mut app))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(msg) = app.msg_for_key(key) else {
                continue;
            };
            match app.update(msg) {
                None => {}
                Some(AppEvent::Submit) => {
                    let values = app.collect_values();
                    match (callbacks.on_submit)(values) {
                        Ok(()) => {
                            app.runs_completed += 1;
                            app.set_info(format!("Run #{} submitted", app.runs_completed));
                        }
                        // Per-submission failure: report and keep going.
                        Err(err) => app.set_error(err.to_string()),
                    }
                }
                Some(AppEvent::Quit) => {
                    (callbacks.on_quit)();
                    return Ok(());
                }
            }
        }
    }
}

impl RenderBackend for TuiBackend {
    fn run(&mut self, spec: &BuildSpec, callbacks: &mut SessionCallbacks<'_>) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal, spec, callbacks);
        ratatui::restore();
        result
    }
}
