use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use taskdeck_core::derive::{Tone, priority_tone, status_tone};
use taskdeck_core::nav::{ViewId, sidebar};
use taskdeck_core::views::{
    TaskCard, TaskDetail, analytics, dashboard, notification_list, project_viewer,
    selected_detail, task_board, team_overview,
};

use super::app::App;
use crate::output::bar;

const SIDEBAR_WIDTH: u16 = 24;

const HINTS: &str = "Tab/1-9 screen  j/k move  Enter open  f/p/t filter  r/a read  q quit";
const OVERLAY_HINTS: &str = "s next status  1-4 set status  j/k subtask  space toggle  Esc close";

pub const fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::White,
        Tone::Muted => Color::DarkGray,
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Yellow,
        Tone::Caution => Color::LightRed,
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
    }
}

pub fn draw(frame: &mut Frame<'_>, app: &App<'_>) {
    let [main, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [nav, content] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(main);

    draw_sidebar(frame, app, nav);
    draw_content(frame, app, content);
    if let Some(detail) = selected_detail(&app.state, &app.session) {
        draw_overlay(frame, app, &detail, content);
    }
    draw_status(frame, app, status);
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let side = sidebar(
        app.session.user,
        app.state.active_view(),
        app.state.unread_count(),
    );
    let mut items: Vec<ListItem<'_>> = side
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut spans = vec![Span::raw(format!("{} {}", i + 1, item.label))];
            if let Some(n) = item.badge {
                spans.push(Span::styled(
                    format!(" ({n})"),
                    Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            let line = Line::from(spans);
            if item.active {
                ListItem::new(line).style(Style::new().fg(Color::Black).bg(Color::Cyan))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::styled(
        format!("{} ({})", side.initials, side.role),
        Style::new().fg(Color::DarkGray),
    )));
    if let Some(dept) = &side.department {
        items.push(ListItem::new(Line::styled(
            dept.clone(),
            Style::new().fg(Color::DarkGray),
        )));
    }

    let list = List::new(items).block(Block::bordered().title(side.user_name));
    frame.render_widget(list, area);
}

fn card_item(card: &TaskCard) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{:<11}", card.status.as_str()),
            Style::new().fg(tone_color(card.status_tone)),
        ),
        Span::styled(
            format!("{:<7}", card.priority.as_str()),
            Style::new().fg(tone_color(card.priority_tone)),
        ),
        Span::styled(
            format!("{} ", card.due_date.format("%b %d")),
            Style::new().fg(tone_color(card.due_tone)),
        ),
        Span::raw(card.title.clone()),
    ];
    if let Some(sub) = card.subtasks {
        spans.push(Span::styled(
            format!("  {}/{}", sub.completed, sub.total),
            Style::new().fg(Color::DarkGray),
        ));
    }
    if !card.assignees.is_empty() {
        let mut who = card.assignees.join(" ");
        if card.more_assignees > 0 {
            who.push_str(&format!(" +{}", card.more_assignees));
        }
        spans.push(Span::styled(
            format!("  {who}"),
            Style::new().fg(Color::DarkGray),
        ));
    }
    if card.recurring {
        spans.push(Span::styled("  (recurring)", Style::new().fg(Color::Cyan)));
    }
    ListItem::new(Line::from(spans))
}

fn heading(text: impl Into<String>) -> ListItem<'static> {
    ListItem::new(Line::styled(
        text.into(),
        Style::new().add_modifier(Modifier::BOLD),
    ))
}

/// Draw a list where only some items are selectable rows. `row_index`
/// maps each selectable item to its position in `items`.
fn draw_list(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'static>>,
    row_index: &[usize],
    cursor: usize,
) {
    let list = List::new(items)
        .block(Block::bordered().title(title.to_string()))
        .highlight_symbol("► ")
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected(row_index.get(cursor).copied());
    frame.render_stateful_widget(list, area, &mut state);
}

/// Split content into a fixed header paragraph and a list below it.
fn header_and_list(area: Rect, header_lines: usize) -> [Rect; 2] {
    let height = u16::try_from(header_lines).unwrap_or(u16::MAX).saturating_add(2);
    Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area)
}

fn draw_content(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = app.state.active_view();
    match view {
        ViewId::Dashboard => draw_dashboard(frame, app, area),
        ViewId::Tasks => draw_tasks(frame, app, area),
        ViewId::Team => draw_team(frame, app, area),
        ViewId::Analytics => draw_analytics(frame, app, area),
        ViewId::Viewer => draw_viewer(frame, app, area),
        ViewId::Notifications => draw_notifications(frame, app, area),
        ViewId::Settings => draw_settings(frame, app, area),
    }
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = dashboard(&app.state, &app.session);
    let mut header = vec![
        Line::styled(view.greeting.clone(), Style::new().add_modifier(Modifier::BOLD)),
        Line::from(vec![
            Span::styled(
                format!("In progress {}", view.stats.in_progress),
                Style::new().fg(Color::Cyan),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Overdue {}", view.stats.overdue),
                Style::new().fg(Color::Red),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Completed {}", view.stats.completed),
                Style::new().fg(Color::Green),
            ),
            Span::raw(format!("   Total {}   Due today {}", view.stats.total, view.due_today)),
        ]),
    ];
    for m in &view.milestones {
        header.push(Line::raw(format!(
            "{} {} {}%  {}",
            bar(m.progress.percent, 10),
            m.title,
            m.progress.percent,
            m.project_title.as_deref().unwrap_or("-")
        )));
    }

    let [top, bottom] = header_and_list(area, header.len());
    frame.render_widget(
        Paragraph::new(header).block(Block::bordered().title("Dashboard")),
        top,
    );

    let mut items = vec![heading(format!(
        "Overdue ({} of {})",
        view.overdue.len(),
        view.overdue_total
    ))];
    let mut rows = Vec::new();
    for card in &view.overdue {
        rows.push(items.len());
        items.push(card_item(card));
    }
    items.push(heading("Upcoming"));
    for card in &view.upcoming {
        rows.push(items.len());
        items.push(card_item(card));
    }
    draw_list(frame, bottom, "Work", items, &rows, app.cursor);
}

fn draw_tasks(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = task_board(&app.state, &app.session, app.filter);
    let show = |v: Option<&str>| v.unwrap_or("all").to_string();
    let header = vec![Line::raw(format!(
        "status: {}  priority: {}  type: {}   showing {} of {}",
        show(view.filter.status.map(|s| s.as_str())),
        show(view.filter.priority.map(|p| p.as_str())),
        show(view.filter.task_type.map(|t| t.as_str())),
        view.shown,
        view.total
    ))];

    let [top, bottom] = header_and_list(area, header.len());
    frame.render_widget(
        Paragraph::new(header).block(Block::bordered().title("My Tasks")),
        top,
    );

    let mut items = Vec::new();
    let mut rows = Vec::new();
    for col in &view.columns {
        items.push(heading(format!("{} ({})", col.label, col.tasks.len())));
        for card in &col.tasks {
            rows.push(items.len());
            items.push(card_item(card));
        }
    }
    draw_list(frame, bottom, "Board", items, &rows, app.cursor);
}

fn draw_team(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = team_overview(&app.state, &app.session);
    let mut header: Vec<Line<'_>> = view
        .members
        .iter()
        .map(|m| {
            Line::raw(format!(
                "{:<3} {:<18} {:>2} tasks {:>2} done {:>2} overdue {:>5.1}h {} {:>3}%",
                m.initials,
                m.name,
                m.stats.total_tasks,
                m.stats.completed_tasks,
                m.stats.overdue_tasks,
                m.stats.total_hours,
                bar(m.stats.completion_rate, 10),
                m.stats.completion_rate
            ))
        })
        .collect();
    for p in &view.active_projects {
        header.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", p.status.as_str()),
                Style::new().fg(tone_color(p.status_tone)),
            ),
            Span::raw(format!(
                "{} {}% {}",
                bar(p.progress.percent, 10),
                p.progress.percent,
                p.title
            )),
        ]));
    }

    let [top, bottom] = header_and_list(area, header.len());
    frame.render_widget(
        Paragraph::new(header).block(Block::bordered().title("Team Overview")),
        top,
    );

    let items: Vec<_> = view.attention.iter().map(card_item).collect();
    let rows: Vec<_> = (0..items.len()).collect();
    let title = format!(
        "Needs attention: {} overdue, {} in review",
        view.overdue_total, view.in_review
    );
    draw_list(frame, bottom, &title, items, &rows, app.cursor);
}

fn draw_analytics(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let s = analytics(&app.state, &app.session);
    let mut lines = vec![
        Line::styled(
            format!(
                "{} tasks, {} completed  {} {}%",
                s.total_tasks,
                s.completed_tasks,
                bar(s.completion_rate, 20),
                s.completion_rate
            ),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("By type", Style::new().add_modifier(Modifier::BOLD)),
    ];
    for b in &s.by_type {
        lines.push(Line::raw(format!(
            "  {:<14} {:>3}  {} {:>3}%",
            b.key.as_str(),
            b.count,
            bar(b.percent, 20),
            b.percent
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("By priority", Style::new().add_modifier(Modifier::BOLD)));
    for b in &s.by_priority {
        lines.push(Line::raw(format!(
            "  {:<14} {:>3}  {} {:>3}%",
            b.key.as_str(),
            b.count,
            bar(b.percent, 20),
            b.percent
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Team performance",
        Style::new().add_modifier(Modifier::BOLD),
    ));
    for m in &s.members {
        lines.push(Line::raw(format!(
            "  {:<18} {:>2}/{:<2} {} {:>3}%",
            m.name,
            m.completed,
            m.total,
            bar(m.rate, 20),
            m.rate
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "Time: {:.1}h estimated, {:.1}h actual, {}% efficiency",
        s.time.estimated_hours, s.time.actual_hours, s.time.efficiency
    )));

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Analytics")),
        area,
    );
}

fn draw_viewer(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = project_viewer(&app.state, &app.session);
    let header = vec![Line::raw(format!(
        "{} projects  {} milestones  {} completed tasks",
        view.counts.projects, view.counts.milestones, view.counts.completed_tasks
    ))];
    let [top, bottom] = header_and_list(area, header.len());
    frame.render_widget(
        Paragraph::new(header).block(Block::bordered().title("Project View")),
        top,
    );

    let mut items = Vec::new();
    let mut rows = Vec::new();
    for p in &view.projects {
        items.push(heading(format!(
            "{} [{}] {} {}%",
            p.title,
            p.status,
            bar(p.progress.percent, 10),
            p.progress.percent
        )));
        for m in &p.milestones {
            items.push(ListItem::new(Line::styled(
                format!("  {} ({}) {}%", m.title, m.status, m.progress.percent),
                Style::new().fg(Color::Cyan),
            )));
            for card in &m.tasks {
                rows.push(items.len());
                items.push(card_item(card));
            }
        }
    }
    draw_list(frame, bottom, "Projects", items, &rows, app.cursor);
}

fn draw_notifications(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let view = notification_list(&app.state, &app.session);
    let items: Vec<_> = view
        .items
        .iter()
        .map(|n| {
            let dot = if n.read { "  " } else { "* " };
            let style = if n.read {
                Style::new().fg(Color::DarkGray)
            } else {
                Style::new().fg(tone_color(n.tone))
            };
            ListItem::new(Line::from(vec![
                Span::styled(dot, Style::new().fg(Color::Red)),
                Span::styled(n.message.clone(), style),
                Span::styled(
                    format!("  {}", n.created_at.format("%b %d %H:%M")),
                    Style::new().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let rows: Vec<_> = (0..items.len()).collect();
    let title = format!("Notifications: {}", view.summary);
    draw_list(frame, area, &title, items, &rows, app.cursor);
}

fn draw_settings(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let ws = app.ws;
    let d = &app.session.display;
    let lines = vec![
        Line::raw(format!("User            {} ({})", ws.user.name, ws.user.id)),
        Line::raw(format!("Role            {}", ws.user.role)),
        Line::raw(format!("Dataset         {}", ws.source.describe())),
        Line::raw(format!("Enforce roles   {}", ws.enforce_roles)),
        Line::raw(format!("Due soon        {} days", d.due_soon_days)),
        Line::raw(format!("Upcoming limit  {}", d.upcoming_limit)),
        Line::raw(format!("Overdue preview {}", d.overdue_preview)),
        Line::raw(format!("Attention limit {}", d.attention_limit)),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Settings")),
        area,
    );
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn draw_overlay(frame: &mut Frame<'_>, app: &App<'_>, d: &TaskDetail, area: Rect) {
    let label = Style::new().fg(Color::DarkGray);
    let kv = |k: &str, v: String| {
        Line::from(vec![Span::styled(format!("{k:<11}"), label), Span::raw(v)])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                d.status.label(),
                Style::new().fg(tone_color(status_tone(d.status))),
            ),
            Span::raw("  "),
            Span::styled(
                d.priority.as_str(),
                Style::new().fg(tone_color(priority_tone(d.priority))),
            ),
            Span::raw(format!("  {}", d.task_type)),
        ]),
        kv("Due", d.due_date.format("%b %d, %Y %H:%M").to_string()),
    ];
    if let Some(project) = &d.project {
        lines.push(kv("Project", project.clone()));
    }
    if let Some(milestone) = &d.milestone {
        lines.push(kv("Milestone", milestone.clone()));
    }
    if let Some(recurring) = &d.recurring {
        lines.push(kv("Repeats", recurring.clone()));
    }
    let names: Vec<_> = d.assignees.iter().map(|a| a.name.as_str()).collect();
    lines.push(kv("Assignees", names.join(", ")));
    if let Some(h) = d.hours {
        lines.push(kv("Hours", format!("{}/{}h", h.actual, h.estimated)));
    }
    if !d.tags.is_empty() {
        lines.push(kv("Tags", d.tags.join(", ")));
    }
    if !d.description.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(d.description.clone()));
    }
    if !d.subtasks.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Subtasks {} {}%", bar(d.subtask_progress, 10), d.subtask_progress),
            Style::new().add_modifier(Modifier::BOLD),
        ));
        for (i, s) in d.subtasks.iter().enumerate() {
            let mark = if s.completed { 'x' } else { ' ' };
            let pointer = if i == app.subtask_cursor { "► " } else { "  " };
            lines.push(Line::raw(format!("{pointer}[{mark}] {}", s.title)));
        }
    }
    if !d.attachments.is_empty() {
        lines.push(kv("Files", d.attachments.join(", ")));
    }
    if let Some(notes) = &d.internal_notes {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Internal: {notes}"),
            Style::new().fg(Color::Yellow),
        ));
    }
    if !d.can_edit {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Read-only for your role.", label));
    }

    let popup = popup_area(area, 80, 80);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!("{}  {}", d.id, d.title))),
        popup,
    );
}

fn draw_status(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let line = match app.status() {
        Some(msg) => Line::styled(msg.to_string(), Style::new().add_modifier(Modifier::BOLD)),
        None if app.state.selected_task_id().is_some() => {
            Line::styled(OVERLAY_HINTS, Style::new().fg(Color::Yellow))
        }
        None => Line::styled(HINTS, Style::new().fg(Color::Yellow)),
    };
    frame.render_widget(Paragraph::new(line), area);
}
