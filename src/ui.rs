use ratatui::{prelude::*, widgets::*};

use crate::app::{AppState, Screen};
use crate::clock::{Mode, Phase, format_mmss};
use crate::modal::{ConfigModal, SLIDER_LABELS, format_seconds_label};
use crate::theme::{Theme, Vessel};
use crate::timer::TimerScreen;

const HOME_FILL: f64 = 0.7;
const SLIDER_WIDTH: usize = 27;

// ============================================================================
// Screens
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &AppState) {
    match &app.screen {
        Screen::Home => render_home(f, app),
        Screen::Timer(timer) => render_timer(f, app, timer),
    }

    if let Some(modal) = &app.modal {
        render_modal(f, app, modal);
    }
}

fn title_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_color))
        .title(Span::styled(title, Style::default()
            .fg(theme.accent_color).add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
}

fn render_home(f: &mut Frame, app: &AppState) {
    let theme = &app.theme;
    let outer = title_block(" ☕ MIND PACE ", theme);
    let inner = outer.inner(f.size());
    f.render_widget(outer, f.size());

    let vessel = vessel_lines(app.vessel, HOME_FILL, theme);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(vessel.len() as u16),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(inner);

    let header = vec![
        Line::from(Span::styled("Mind Pace", Style::default()
            .fg(theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Stay focused. Stay productive.", Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(header).alignment(Alignment::Center), sections[1]);
    f.render_widget(Paragraph::new(vessel).alignment(Alignment::Center), sections[3]);

    f.render_widget(
        Paragraph::new(
            "A simple and visually engaging focus timer that helps you stay productive. \
             Watch the cup empty while you work and fill back up while you rest.",
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        sections[5],
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            span_key("Enter", theme),
            Span::styled("  Begin Focus Session", Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .alignment(Alignment::Center),
        sections[7],
    );

    let features = vec![
        Line::from(Span::styled("Features:", Style::default().add_modifier(Modifier::BOLD))),
        feature_line("Work & break cycle visualization"),
        feature_line("Multiple theme options"),
        feature_line("Customizable timer settings"),
        feature_line("Simple, distraction-free interface"),
        Line::from(""),
        Line::from(vec![span_key("Q", theme), Span::raw(" Quit")]),
    ];
    f.render_widget(
        Paragraph::new(features).alignment(Alignment::Center).style(Style::default().fg(Color::Gray)),
        sections[9],
    );
}

fn feature_line(text: &str) -> Line<'_> {
    Line::from(vec![Span::raw("• "), Span::raw(text)])
}

fn render_modal(f: &mut Frame, app: &AppState, modal: &ConfigModal) {
    let theme = &app.theme;
    let area = centered_rect(70, 60, f.size());
    let ink = Style::default().fg(Color::Black).bg(theme.modal_color);
    let strong = ink.add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Set Your Focus Time", strong)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Focus Time  ", ink),
            Span::styled(format_seconds_label(modal.focus_minutes()), strong),
            Span::styled("     Relax Time  ", ink),
            Span::styled(format_seconds_label(modal.relax_minutes()), strong),
        ]),
        Line::from(""),
        Line::from(Span::styled(slider_track(modal.position(), SLIDER_WIDTH), strong)),
        Line::from(Span::styled(slider_labels(SLIDER_WIDTH), ink)),
        Line::from(""),
        Line::from(Span::styled("Total session time: 1 minute", ink.add_modifier(Modifier::ITALIC))),
        Line::from(""),
        Line::from(vec![
            Span::styled("←→", strong),
            Span::styled(" Adjust   ", ink),
            Span::styled("Esc", strong),
            Span::styled(" Cancel   ", ink),
            Span::styled("Enter", strong),
            Span::styled(" Start Session", ink),
        ]),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(ink)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(ink)),
        area,
    );
}

fn render_timer(f: &mut Frame, app: &AppState, timer: &TimerScreen) {
    let theme = &app.theme;
    let clock = timer.clock();
    let tick = timer.display();
    let mode = clock.mode();
    let mode_style = Style::default().fg(theme.mode_color(mode)).add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    f.render_widget(title_block(" ☕ MIND PACE ", theme), chunks[0]);

    let vessel = vessel_lines(app.vessel, tick.fill_fraction, theme);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(vessel.len() as u16), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(10),
        ])
        .split(chunks[1]);

    f.render_widget(Paragraph::new(mode.name()).style(mode_style).alignment(Alignment::Center), sections[1]);
    f.render_widget(Paragraph::new(vessel).alignment(Alignment::Center), sections[3]);
    f.render_widget(
        Paragraph::new(format_mmss(tick.remaining_secs)).style(mode_style).alignment(Alignment::Center),
        sections[5],
    );

    let status = match clock.phase() {
        Phase::Idle => match mode {
            Mode::Focus => "○ READY".to_string(),
            Mode::Relax => "○ READY TO RELAX".to_string(),
        },
        Phase::Running => format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" }),
        Phase::Paused => format!("⏸  PAUSED{}", ".".repeat((app.animation_frame / 5) as usize % 4)),
    };
    let status_color = match clock.phase() {
        Phase::Idle => Color::Gray,
        Phase::Running => Color::Green,
        Phase::Paused => Color::Yellow,
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[7],
    );

    let mut controls = match clock.phase() {
        Phase::Idle => vec![span_key("Space", theme), Span::raw(" Start  •  ")],
        Phase::Running => vec![
            span_key("Space", theme), Span::raw(" Pause  •  "),
            span_key("R", theme), Span::raw(" Reset  •  "),
        ],
        Phase::Paused => vec![
            span_key("Space", theme), Span::raw(" Resume  •  "),
            span_key("R", theme), Span::raw(" Reset  •  "),
        ],
    };
    controls.extend([span_key("Esc", theme), Span::raw(" Back")]);
    f.render_widget(
        Paragraph::new(Line::from(controls))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border_color))),
        chunks[2],
    );
}

fn span_key<'a>(text: &'a str, theme: &Theme) -> Span<'a> {
    Span::styled(text, Style::default().fg(theme.accent_color).add_modifier(Modifier::BOLD))
}

// ============================================================================
// Vessel
// ============================================================================

/// Number of rows, counted from the bottom, that show liquid.
pub fn filled_rows(fill: f64, rows: usize) -> usize {
    let fill = if fill.is_finite() { fill.clamp(0.0, 1.0) } else { 0.0 };
    ((fill * rows as f64).round() as usize).min(rows)
}

pub fn vessel_lines(vessel: Vessel, fill: f64, theme: &Theme) -> Vec<Line<'static>> {
    let widths = vessel.row_widths();
    let max_width = widths.iter().copied().max().unwrap_or(0) as usize;
    let rows = widths.len();
    let filled = filled_rows(fill, rows);
    let wall = Style::default().fg(theme.border_color);
    let liquid = Style::default().fg(theme.fill_color);

    let mut lines = Vec::with_capacity(rows + 2);
    lines.push(Line::from(Span::styled(
        match vessel {
            Vessel::Coffee => format!(" {}   ", "~".repeat(max_width)),
            Vessel::Egg => format!("╔{}╗", "═".repeat(max_width)),
        },
        wall,
    )));

    for (i, &width) in widths.iter().enumerate() {
        let width = width as usize;
        let pad = (max_width - width) / 2;
        let content = if i >= rows - filled { "█".repeat(width) } else { " ".repeat(width) };
        let (left, right) = match vessel {
            Vessel::Coffee => ("│", "│"),
            Vessel::Egg if i < rows / 2 => ("╲", "╱"),
            Vessel::Egg => ("╱", "╲"),
        };
        let handle = match vessel {
            Vessel::Coffee => coffee_handle(i, rows),
            Vessel::Egg => "",
        };
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(left, wall),
            Span::styled(content, liquid),
            Span::styled(right, wall),
            Span::styled(handle, wall),
            Span::raw(" ".repeat(pad)),
        ]));
    }

    lines.push(Line::from(Span::styled(
        match vessel {
            Vessel::Coffee => format!("╰{}╯  ", "─".repeat(max_width)),
            Vessel::Egg => format!("╚{}╝", "═".repeat(max_width)),
        },
        wall,
    )));
    lines
}

fn coffee_handle(row: usize, rows: usize) -> &'static str {
    let top = rows / 4;
    let bottom = rows - rows / 4 - 1;
    if row == top {
        "─╮"
    } else if row == bottom {
        "─╯"
    } else if row > top && row < bottom {
        " │"
    } else {
        "  "
    }
}

// ============================================================================
// Slider
// ============================================================================

pub fn slider_track(position: f64, width: usize) -> String {
    let width = width.max(2);
    let thumb = (position.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&thumb) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

fn slider_labels(width: usize) -> String {
    let [low, mid, high] = SLIDER_LABELS;
    let gap = width.saturating_sub(low.len() + mid.len() + high.len()) / 2;
    format!("{low}{}{mid}{}{high}", " ".repeat(gap), " ".repeat(gap))
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, TimerParams};
    use crate::theme::get_theme;
    use crate::timer::Moment;
    use ratatui::backend::TestBackend;

    fn render_to_string(app: &AppState) -> String {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut text = String::new();
        for (i, cell) in buf.content.iter().enumerate() {
            text.push_str(cell.symbol());
            if (i + 1) % buf.area.width as usize == 0 {
                text.push('\n');
            }
        }
        text
    }

    fn liquid_rows(lines: &[Line]) -> usize {
        lines
            .iter()
            .filter(|line| line.spans.iter().any(|s| s.content.contains('█')))
            .count()
    }

    #[test]
    fn test_filled_rows_bounds() {
        assert_eq!(filled_rows(0.0, 8), 0);
        assert_eq!(filled_rows(1.0, 8), 8);
        assert_eq!(filled_rows(0.5, 8), 4);
        assert_eq!(filled_rows(1.7, 8), 8);
        assert_eq!(filled_rows(f64::NAN, 8), 0);
    }

    #[test]
    fn test_vessel_fills_from_bottom() {
        let theme = get_theme("default");
        let lines = vessel_lines(Vessel::Coffee, 0.25, &theme);
        assert_eq!(lines.len(), 10);
        assert_eq!(liquid_rows(&lines), 2);
        let last_row = &lines[lines.len() - 2];
        assert!(last_row.spans.iter().any(|s| s.content.contains('█')));
        let first_row = &lines[1];
        assert!(!first_row.spans.iter().any(|s| s.content.contains('█')));
    }

    #[test]
    fn test_egg_vessel_rows() {
        let theme = get_theme("default");
        let full = vessel_lines(Vessel::Egg, 1.0, &theme);
        assert_eq!(liquid_rows(&full), Vessel::Egg.row_widths().len());
        assert_eq!(liquid_rows(&vessel_lines(Vessel::Egg, 0.0, &theme)), 0);
    }

    #[test]
    fn test_slider_track_thumb() {
        assert_eq!(slider_track(0.0, 5), "●────");
        assert_eq!(slider_track(0.5, 5), "━━●──");
        assert_eq!(slider_track(1.0, 5), "━━━━●");
    }

    #[test]
    fn test_home_renders_title_and_action() {
        let app = AppState::new(&AppConfig::default());
        let screen = render_to_string(&app);
        assert!(screen.contains("Stay focused. Stay productive."));
        assert!(screen.contains("Begin Focus Session"));
    }

    #[test]
    fn test_modal_renders_readouts() {
        let mut app = AppState::new(&AppConfig::default());
        app.open_modal();
        let screen = render_to_string(&app);
        assert!(screen.contains("Set Your Focus Time"));
        assert!(screen.contains("30 seconds"));
    }

    #[test]
    fn test_timer_renders_remaining_time() {
        let mut app = AppState::new(&AppConfig::default());
        app.open_timer(&TimerParams::from_minutes(25.0, 5.0));
        let screen = render_to_string(&app);
        assert!(screen.contains("25:00"));
        assert!(screen.contains("READY"));

        if let Screen::Timer(timer) = &mut app.screen {
            timer.start(Moment::now());
        }
        let screen = render_to_string(&app);
        assert!(screen.contains("Pause"));
        assert!(screen.contains("Reset"));
    }
}
