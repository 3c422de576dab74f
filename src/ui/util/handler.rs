use ratatui::crossterm::event::{KeyEvent, MouseEvent};

use crate::{
    audio::commands::AudioCommand,
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt) {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub fn handle_event(app: &mut App, evt: TerminalEvent) -> bool {
        match evt {
            // The book is requested once, when the screen first appears.
            TerminalEvent::Init => app.controller.handle_command(AudioCommand::LoadBook),
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Tick => {}
            TerminalEvent::Resize(_, _) => {}
        }

        true
    }

    pub fn handle_action(app: &mut App, evt: Event) {
        app.controller.handle_event(evt);
    }

    fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg);
        }
    }

    fn handle_mouse_event(app: &mut App, evt: MouseEvent) {
        let duration = app.controller.state().duration;
        if let Some(msg) = InputHandler::handle_mouse(evt, app.scrub_area.get(), duration) {
            app.update(msg);
        }
    }
}
