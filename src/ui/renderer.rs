use crate::ui::app::{App, AppMode};
use crate::ui::layout::create_layout;
use crate::ui::widgets::{EventList, HelpOverlay, MetricsRow, StatusBar};
use ratatui::{Frame, Terminal, backend::Backend};

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| render_frame(f, app))?;
    Ok(())
}

fn render_frame(f: &mut Frame, app: &App) {
    let layout = create_layout(f.area());

    // Metrics row
    let metrics = MetricsRow {
        total_resources: app.snapshot.tree.total_resources(),
        pods: app.tree_stats.pods,
        out_of_sync: app.resource_stats.out_of_sync,
        hosts: app.snapshot.tree.hosts.len(),
        usage: app.usage,
    };
    f.render_widget(metrics, layout.metrics);

    // Event list, re-queried on every frame so query-state changes are
    // reflected immediately
    let visible = app.visible_events();
    let shown = visible.len();
    let max_offset = shown.saturating_sub(1);
    let event_list = EventList::new(visible, app.scroll_offset.min(max_offset));
    f.render_widget(event_list, layout.main);

    // Status bar
    let status_bar = StatusBar::new(
        shown,
        app.snapshot.events.len(),
        app.query,
        &app.filter_pattern,
    );
    f.render_widget(status_bar, layout.status_bar);

    // Help overlay
    if app.help_visible {
        f.render_widget(HelpOverlay, f.area());
    }

    // Filter input bar
    if app.mode == AppMode::Filter {
        use ratatui::{
            layout::{Alignment, Constraint, Direction, Layout},
            style::{Color, Style},
            text::Span,
            widgets::{Block, Borders, Clear, Paragraph},
        };

        let filter_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(f.area())[1];

        // Clear the area to make it opaque
        f.render_widget(Clear, filter_area);

        let filter_text = format!("Filter: {}_", app.filter_pattern);
        let filter_widget =
            Paragraph::new(Span::styled(filter_text, Style::default().fg(Color::Cyan)))
                .block(
                    Block::default()
                        .title("Filter (Enter to apply, Esc to cancel)")
                        .borders(Borders::ALL)
                        .style(Style::default().fg(Color::Cyan)),
                )
                .alignment(Alignment::Left);

        f.render_widget(filter_widget, filter_area);
    }
}
