use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::ViewMode;
use crate::detail::{TaskDetail, NOT_FOUND_MESSAGE};
use crate::task::{Lane, Priority, TaskRecord, TaskStatus};

use super::app::{AppState, DetailScreen, StatusKind};
use super::model::list_window;

const CARD_HEIGHT: usize = 7;
const ID_WIDTH: usize = 4;
const STATUS_WIDTH: usize = 13;
const PRIORITY_WIDTH: usize = 5;
const DUE_WIDTH: usize = 10;
const HELP_KEY_WIDTH: usize = 10;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ORANGE: Color = Color::Rgb(255, 159, 67);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);
const COLOR_MAGENTA: Color = Color::Rgb(214, 140, 230);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_tabs(frame, app, chunks[0]);

    match app.detail.as_ref() {
        Some(screen) => render_detail(frame, app, screen, chunks[1]),
        None => match app.view {
            ViewMode::Board => render_board(frame, app, chunks[1]),
            ViewMode::List => render_list(frame, app, chunks[1]),
        },
    }

    render_footer(frame, app, chunks[2]);

    if app.show_help {
        render_help_modal(frame, area, app.detail.is_some());
    }
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let tabs = [
        ("Board View", app.view == ViewMode::Board, COLOR_INFO),
        ("List View", app.view == ViewMode::List, COLOR_ACCENT),
    ];

    let mut spans = vec![
        Span::styled(
            "Tender Tasks",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for (idx, (label, selected, color)) in tabs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let style = if selected {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(label, style));
    }

    let search_label = if app.search_active && app.search.is_empty() {
        "search: _".to_string()
    } else if app.search_active {
        format!("search: {}_", app.search)
    } else if app.search.is_empty() {
        String::new()
    } else {
        format!("search: {}", app.search)
    };
    if !search_label.is_empty() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(search_label, Style::default().fg(COLOR_INFO)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_board(frame: &mut Frame, app: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4].as_ref())
        .split(area);
    for (lane, column) in Lane::ALL.into_iter().zip(columns.iter()) {
        render_lane(frame, app, lane, *column);
    }
}

fn render_lane(frame: &mut Frame, app: &AppState, lane: Lane, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let tasks = app.snapshot.grouped.lane(lane);
    let focused = app.lane == lane;
    let dragging = app.drag.in_flight();

    let mut lines = Vec::new();
    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    } else {
        let visible_cards = (area.height.saturating_sub(2) as usize / CARD_HEIGHT).max(1);
        let selected = focused.then_some(app.row);
        let (start, end) = list_window(tasks.len(), selected, visible_cards);
        for (pos, task) in tasks.iter().enumerate().take(end).skip(start) {
            let is_selected = selected == Some(pos);
            let is_dragged = dragging.is_some_and(|drag| drag.task_id == task.id);
            lines.extend(card_lines(task, content_width, is_selected, is_dragged));
        }
    }

    let border_color = if focused && dragging.is_some() {
        COLOR_WARNING
    } else if focused {
        COLOR_ACCENT
    } else {
        COLOR_BORDER_LIST
    };
    let title = Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color(lane.status()))),
        Span::styled(
            lane.title(),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({})", tasks.len()),
            Style::default().fg(COLOR_MUTED),
        ),
    ]);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(widget, area);
}

fn card_lines(
    task: &TaskRecord,
    width: usize,
    selected: bool,
    dragged: bool,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            status_badge(task.status),
            Span::raw(" "),
            Span::styled(format!("#{}", task.id), id_style()),
        ]),
        Line::from(Span::styled(
            truncate_text(&task.title, width),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_text(&task.description, width),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(vec![
            Span::styled(
                truncate_text(&task.assignee, width.saturating_sub(DUE_WIDTH + 1)),
                Style::default().fg(COLOR_INFO),
            ),
            Span::raw(" "),
            Span::styled(task.due_date.clone(), Style::default().fg(COLOR_WARNING)),
        ]),
        Line::from(vec![
            priority_span(task.priority),
            Span::raw("  "),
            Span::styled(
                format!("{} Comments", task.comments),
                Style::default().fg(COLOR_MUTED),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} Attachments", task.attachments),
                Style::default().fg(COLOR_MUTED),
            ),
        ]),
    ];

    if selected || dragged {
        let modifier = if dragged {
            Modifier::REVERSED | Modifier::ITALIC
        } else {
            Modifier::REVERSED
        };
        for line in &mut lines {
            for span in &mut line.spans {
                span.style = span.style.add_modifier(modifier);
            }
        }
    }
    lines.push(Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(COLOR_MUTED_DARK),
    )));
    lines.push(Line::from(""));
    lines
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = vec![list_header_row(content_width), Line::from("")];

    if app.snapshot.list.is_empty() {
        if app.search.is_empty() {
            lines.push(Line::from("No tasks"));
        } else {
            lines.push(Line::from("No matches"));
        }
    } else {
        let list_height = area.height.saturating_sub(2 + lines.len() as u16) as usize;
        let (start, end) = list_window(app.snapshot.list.len(), Some(app.row), list_height);
        for (pos, task) in app
            .snapshot
            .list
            .iter()
            .enumerate()
            .take(end)
            .skip(start)
        {
            lines.push(render_list_row(task, pos == app.row, content_width));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Tasks")
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}

fn list_header_row(width: usize) -> Line<'static> {
    let title_width = list_title_width(width);
    let text = format!(
        " {} {} {} {} {} Assignee",
        pad_text("#", ID_WIDTH),
        pad_text("Status", STATUS_WIDTH),
        pad_text("Task", title_width),
        pad_text("Due", DUE_WIDTH),
        pad_text("Prio", PRIORITY_WIDTH),
    );
    Line::from(Span::styled(
        truncate_text(&text, width),
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD),
    ))
}

fn list_title_width(width: usize) -> usize {
    let used = ID_WIDTH + STATUS_WIDTH + DUE_WIDTH + PRIORITY_WIDTH + 16;
    width.saturating_sub(used).max(8)
}

fn render_list_row(task: &TaskRecord, selected: bool, width: usize) -> Line<'static> {
    let title_width = list_title_width(width);
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(pad_text(&task.id.to_string(), ID_WIDTH), id_style()),
        Span::raw(" "),
        Span::styled(
            pad_text(&format!("● {}", task.status), STATUS_WIDTH),
            Style::default().fg(status_color(task.status)),
        ),
        Span::raw(" "),
        Span::styled(
            pad_text(&task.title, title_width),
            Style::default().fg(COLOR_TEXT),
        ),
        Span::raw(" "),
        Span::styled(
            pad_text(&task.due_date, DUE_WIDTH),
            Style::default().fg(COLOR_WARNING),
        ),
        Span::raw(" "),
        Span::styled(
            pad_text(task.priority.as_str(), PRIORITY_WIDTH),
            Style::default()
                .fg(priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(task.assignee.clone(), Style::default().fg(COLOR_INFO)),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn render_detail(frame: &mut Frame, app: &AppState, screen: &DetailScreen, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let lines = match screen {
        DetailScreen::Open(detail) => build_detail_lines(detail, app.comment_active, content_width),
        DetailScreen::Missing(id) => vec![Line::from(Span::styled(
            format!("{NOT_FOUND_MESSAGE} (#{id})"),
            Style::default().fg(COLOR_ERROR),
        ))],
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Details")
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn build_detail_lines(
    detail: &TaskDetail,
    comment_active: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let task = detail.task();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("#{} ", task.id), id_style()),
            Span::styled(
                task.title.clone(),
                Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            task.description.clone(),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(vec![label_span("Status:     "), status_badge(task.status)]),
        Line::from(vec![label_span("Priority:   "), priority_span(task.priority)]),
        Line::from(vec![
            label_span("Due Date:   "),
            Span::styled(task.due_date.clone(), Style::default().fg(COLOR_WARNING)),
        ]),
        Line::from(vec![
            label_span("Assignee:   "),
            Span::styled(task.assignee.clone(), Style::default().fg(COLOR_INFO)),
        ]),
        Line::from(vec![
            label_span("Attachments:"),
            Span::styled(
                format!(" {} files attached", task.attachments),
                Style::default().fg(COLOR_TEXT),
            ),
        ]),
        Line::from(""),
        section_header(&format!("Comments ({})", detail.comment_count())),
    ];

    for comment in detail.comments() {
        lines.push(Line::from(vec![
            Span::styled("- ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(comment.timestamp.clone(), Style::default().fg(COLOR_WARNING)),
            Span::raw(" "),
            Span::styled(comment.author.clone(), id_style()),
            Span::styled(": ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(comment.text.clone(), Style::default().fg(COLOR_TEXT)),
        ]));
    }

    lines.push(Line::from(""));
    let input_style = if comment_active {
        Style::default().fg(COLOR_TEXT)
    } else {
        Style::default().fg(COLOR_MUTED_DARK)
    };
    let input = if comment_active {
        format!("> {}_", detail.input())
    } else if detail.input().is_empty() {
        "> Add a comment...".to_string()
    } else {
        format!("> {}", detail.input())
    };
    lines.push(Line::from(Span::styled(truncate_text(&input, width), input_style)));
    lines
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_help_modal(frame: &mut Frame, area: Rect, in_detail: bool) {
    let lines = if in_detail {
        vec![
            help_header("Task details"),
            help_line("c/i", "write a comment", 40),
            help_line("enter", "post comment", 40),
            help_line("esc", "stop typing", 40),
            help_line("esc/q", "back to board", 40),
            help_line("?", "hide help", 40),
        ]
    } else {
        vec![
            help_header("Board"),
            help_line("h/l", "previous or next lane", 40),
            help_line("j/k", "move selection", 40),
            help_line("space", "pick up or drop card", 40),
            help_line("esc", "cancel drag", 40),
            help_line("/", "search title and description", 40),
            help_line("v/tab", "toggle board/list view", 40),
            help_line("enter", "open details", 40),
            help_line("q/esc", "quit", 40),
            help_line("?", "hide help", 40),
        ]
    };
    let popup = centered_rect(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
    );
    frame.render_widget(widget, popup);
}

fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
    ))
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH.min(width));
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    let desc_text = truncate_text(desc, desc_width);
    Line::from(vec![
        Span::styled(
            key_text,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(desc_text, Style::default().fg(COLOR_MUTED)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn status_badge(status: TaskStatus) -> Span<'static> {
    Span::styled(
        format!("● {status}"),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

fn priority_span(priority: Priority) -> Span<'static> {
    Span::styled(
        priority.as_str(),
        Style::default()
            .fg(priority_color(priority))
            .add_modifier(Modifier::BOLD),
    )
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::ToDo => COLOR_WARNING,
        TaskStatus::InProgress => COLOR_INFO,
        TaskStatus::NotStarted => COLOR_ORANGE,
        TaskStatus::Completed => COLOR_SUCCESS,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => COLOR_ERROR,
        Priority::Low => COLOR_SUCCESS,
    }
}

fn pad_text(value: &str, width: usize) -> String {
    let text = truncate_text(value, width);
    format!("{text:width$}")
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(COLOR_MUTED_DARK))
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_MAGENTA)
            .add_modifier(Modifier::BOLD),
    ))
}

fn id_style() -> Style {
    Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::store::TaskStore;

    fn render_to_text(app: &mut AppState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn priority_and_status_colours() {
        assert_eq!(priority_color(Priority::High), COLOR_ERROR);
        assert_eq!(priority_color(Priority::Low), COLOR_SUCCESS);
        assert_eq!(status_color(TaskStatus::ToDo), COLOR_WARNING);
        assert_eq!(status_color(TaskStatus::InProgress), COLOR_INFO);
        assert_eq!(status_color(TaskStatus::NotStarted), COLOR_ORANGE);
        assert_eq!(status_color(TaskStatus::Completed), COLOR_SUCCESS);
    }

    #[test]
    fn truncate_and_pad() {
        assert_eq!(truncate_text("Construction Tender 1", 10), "Constru...");
        assert_eq!(truncate_text("abc", 2), "ab");
        assert_eq!(pad_text("Low", 5), "Low  ");
    }

    #[test]
    fn board_shows_lane_titles_and_counts() {
        let mut app = AppState::new(
            TaskStore::seeded(),
            ViewMode::Board,
            String::new(),
            crate::detail::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        );
        let text = render_to_text(&mut app, 160, 40);
        assert!(text.contains("To - Do List (3)"));
        assert!(text.contains("In Progress (3)"));
        assert!(text.contains("Not Started (3)"));
        assert!(text.contains("Completed (3)"));
        assert!(text.contains("12 Comments"));
    }

    #[test]
    fn missing_task_renders_not_found() {
        let mut app = AppState::new(
            TaskStore::seeded(),
            ViewMode::Board,
            String::new(),
            crate::detail::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        );
        app.detail = Some(DetailScreen::Missing(99));
        let text = render_to_text(&mut app, 100, 20);
        assert!(text.contains(NOT_FOUND_MESSAGE));
        assert!(text.contains("(#99)"));
    }
}
