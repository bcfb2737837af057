use crate::stats::{PressureLevel, ResourceUsageStats};
use crate::timeline::EventQuery;
use crate::types::Event;
use crate::utils::humanize_age;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub fn level_color(level: PressureLevel) -> Color {
    match level {
        PressureLevel::Ok => Color::Green,
        PressureLevel::Warn => Color::Yellow,
        PressureLevel::Critical => Color::Red,
    }
}

fn pressure_cell(value: Option<f64>) -> (String, Style) {
    match value {
        None => ("n/a".to_string(), Style::default().fg(Color::DarkGray)),
        Some(p) => (
            format!("{:.2} %", p),
            Style::default()
                .fg(level_color(PressureLevel::from_percent(p)))
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// Top row of summary metrics, one boxed cell per figure.
pub struct MetricsRow {
    pub total_resources: usize,
    pub pods: usize,
    pub out_of_sync: usize,
    pub hosts: usize,
    pub usage: ResourceUsageStats,
}

impl Widget for MetricsRow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plain = Style::default().add_modifier(Modifier::BOLD);
        let (cpu_text, cpu_style) = pressure_cell(self.usage.cpu);
        let (mem_text, mem_style) = pressure_cell(self.usage.memory);

        let cells: [(&str, String, Style); 6] = [
            ("Resources", self.total_resources.to_string(), plain),
            ("Pods", self.pods.to_string(), plain),
            ("Out of sync", self.out_of_sync.to_string(), plain),
            ("Hosts", self.hosts.to_string(), plain),
            ("CPU pressure", cpu_text, cpu_style),
            ("Memory pressure", mem_text, mem_style),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 6); 6])
            .split(area);

        for ((label, value, style), cell_area) in cells.into_iter().zip(columns.iter()) {
            let paragraph = Paragraph::new(Line::from(Span::styled(value, style)))
                .block(Block::default().title(label).borders(Borders::ALL))
                .alignment(Alignment::Center);
            paragraph.render(*cell_area, buf);
        }
    }
}

/// Scrollable event list, one line per event.
pub struct EventList<'a> {
    events: Vec<&'a Event>,
    scroll_offset: usize,
}

impl<'a> EventList<'a> {
    pub fn new(events: Vec<&'a Event>, scroll_offset: usize) -> Self {
        Self {
            events,
            scroll_offset,
        }
    }

    fn format_event(event: &'a Event) -> Line<'a> {
        let type_color = if event.is_warning() {
            Color::Yellow
        } else {
            Color::Green
        };

        let age = match event.instant() {
            Some(instant) => humanize_age(instant),
            None => "unknown".to_string(),
        };

        let mut spans = vec![
            Span::styled(format!("{:>8} ", age), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<8}", event.type_),
                Style::default().fg(type_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {:<20}", event.reason),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" "),
            Span::raw(event.message.as_str()),
        ];

        if event.count > 1 {
            spans.push(Span::styled(
                format!(" (x{})", event.count),
                Style::default().fg(Color::DarkGray),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for EventList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.events.is_empty() {
            let paragraph = Paragraph::new("No events")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            paragraph.render(area, buf);
            return;
        }

        let lines: Vec<Line> = self.events.iter().map(|e| Self::format_event(e)).collect();

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        paragraph.render(area, buf);
    }
}

pub struct StatusBar<'a> {
    shown: usize,
    total: usize,
    query: EventQuery,
    filter_pattern: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(shown: usize, total: usize, query: EventQuery, filter_pattern: &'a str) -> Self {
        Self {
            shown,
            total,
            query,
            filter_pattern,
        }
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filter_str = if self.filter_pattern.is_empty() {
            "none".to_string()
        } else {
            self.filter_pattern.to_string()
        };

        let status_parts = [
            format!("Events: {}/{}", self.shown, self.total),
            format!("sort: {}", self.query.sort.label()),
            format!(
                "warnings only: {}",
                if self.query.warnings_only { "on" } else { "off" }
            ),
            format!("group: {}", self.query.group_by.label()),
            format!("filter: {}", filter_str),
        ];

        let mut status_text = status_parts.join(" | ");
        status_text.push_str(" | ? for help");

        let paragraph = Paragraph::new(status_text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));

        paragraph.render(area, buf);
    }
}

pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_lines = vec![
            "Keyboard Shortcuts",
            "",
            "  q/Q/Ctrl-C  - Quit",
            "  s           - Toggle sort order (new/old)",
            "  w           - Toggle warnings-only filter",
            "  b           - Cycle group interval (reserved)",
            "  f           - Filter events by message (regex)",
            "  c           - Clear message filter",
            "  ?           - Toggle this help",
            "",
            "Navigation:",
            "  Up/Down     - Scroll events",
            "  PgUp/PgDn   - Page scroll",
            "  Home/End    - Jump to top/bottom",
            "",
            "Press any key to close",
        ];

        let lines: Vec<Line> = help_lines.iter().map(|s| Line::from(*s)).collect();

        let help_width = 50;
        let help_height = help_lines.len() as u16 + 2;
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect {
            x: area.x + x,
            y: area.y + y,
            width: help_width.min(area.width),
            height: help_height.min(area.height),
        };

        // Clear the area to make it opaque
        Clear.render(help_area, buf);

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black).fg(Color::White));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .style(Style::default().bg(Color::Black).fg(Color::White));

        paragraph.render(help_area, buf);
    }
}
