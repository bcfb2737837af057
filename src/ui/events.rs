use crate::ui::app::{App, AppMode};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Quit,
}

pub async fn event_loop(tx: mpsc::Sender<AppEvent>) {
    use crossterm::event::EventStream;

    let mut event_stream = EventStream::new();

    loop {
        match event_stream.next().await {
            Some(Ok(Event::Key(key))) => {
                if tx.send(AppEvent::Key(key)).await.is_err() {
                    break;
                }
            }
            Some(Ok(_)) => {}
            Some(Err(_)) | None => {
                let _ = tx.send(AppEvent::Quit).await;
                break;
            }
        }
    }
}

/// Returns false when the app should quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        AppMode::Normal => handle_normal_mode(app, key),
        AppMode::Filter => handle_filter_mode(app, key),
        AppMode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('Q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return false;
        }
        (KeyCode::Char('s'), _) => {
            app.toggle_sort();
        }
        (KeyCode::Char('w'), _) => {
            app.toggle_warnings_only();
        }
        (KeyCode::Char('b'), _) => {
            app.cycle_group_by();
        }
        (KeyCode::Char('f'), _) => {
            app.mode = AppMode::Filter;
            app.filter_pattern.clear();
        }
        (KeyCode::Char('c'), _) => {
            app.clear_filter();
        }
        (KeyCode::Char('?'), _) => {
            app.help_visible = !app.help_visible;
            if app.help_visible {
                app.mode = AppMode::Help;
            }
        }
        (KeyCode::Up, _) => {
            app.scroll_up();
        }
        (KeyCode::Down, _) => {
            app.scroll_down();
        }
        (KeyCode::PageUp, _) => {
            app.page_up(10);
        }
        (KeyCode::PageDown, _) => {
            app.page_down(10);
        }
        (KeyCode::Home, _) => {
            app.scroll_to_top();
        }
        (KeyCode::End, _) => {
            app.scroll_to_bottom();
        }
        _ => {}
    }
    true
}

fn handle_filter_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.mode = AppMode::Normal;
            app.filter_pattern.clear();
        }
        KeyCode::Enter => {
            app.mode = AppMode::Normal;
            app.scroll_offset = 0;
            // Filter is applied automatically in visible_events()
        }
        KeyCode::Char(c) => {
            app.filter_pattern.push(c);
        }
        KeyCode::Backspace => {
            app.filter_pattern.pop();
        }
        _ => {}
    }
    true
}

fn handle_help_mode(app: &mut App, _key: KeyEvent) -> bool {
    app.help_visible = false;
    app.mode = AppMode::Normal;
    true
}
