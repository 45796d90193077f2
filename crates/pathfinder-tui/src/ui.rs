use pathfinder_core::content::{self, Plan, Section};
use pathfinder_core::dashboard::{ItemKind, PROGRESS_SUMMARY, ROADMAP_TITLE};
use pathfinder_core::{ChatAuthor, ChatMessage, Conversation, Route};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormRow, InputMode, InputTarget, NoticeKind, PickerKind, FORM_ROWS};

const ACCENT: Color = Color::Cyan;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn sections(lines: &mut Vec<Line<'static>>, items: &[Section], numbered: bool) {
    for (i, section) in items.iter().enumerate() {
        let title = if numbered {
            format!("{}. {}", i + 1, section.title)
        } else {
            format!("• {}", section.title)
        };
        lines.push(Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(format!("  {}", section.body)));
        lines.push(Line::default());
    }
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Rect of the given size centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, navbar, body, footer
    let [header_area, nav_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_navbar(app, frame, nav_area);

    if app.form_visible() {
        let title = if app.route() == Route::ProfileSetup {
            " Tell us about yourself "
        } else {
            " Edit Profile (Esc to close) "
        };
        render_profile_form(app, frame, body_area, title);
    } else {
        match app.route() {
            Route::Landing => render_landing(app, frame, body_area),
            Route::UseCase => render_use_case(app, frame, body_area),
            Route::Subscription => render_plans(app, frame, body_area),
            Route::Login | Route::Signup => render_entry(app, frame, body_area),
            Route::Dashboard => render_dashboard(app, frame, body_area),
            Route::Roadmap => render_roadmap(app, frame, body_area),
            Route::Profile => render_profile(app, frame, body_area),
            Route::NotFound => render_not_found(app, frame, body_area),
            Route::ProfileSetup => {}
        }
    }

    render_footer(app, frame, footer_area);

    if app.show_assistant {
        render_assistant(app, frame, body_area);
    }
    if app.picker.is_some() {
        render_picker(app, frame, area);
    }
    if app.input_target == Some(InputTarget::GoTo) {
        render_goto(app, frame, area);
    }
    render_notice(app, frame, body_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let user = match &app.profile {
        Some(profile) => format!(" {} ", profile.display_name()),
        None => " guest ".to_string(),
    };

    let title = Line::from(vec![
        Span::styled(" Pathfinder ", Style::default().fg(ACCENT).bold()),
        Span::styled(format!("{} ", app.router.current().path), Style::default().fg(Color::White)),
        Span::styled(user, Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_navbar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, item) in app.navbar().iter().enumerate() {
        let active = matches!(item.action, crate::app::NavAction::Go(route) if route == app.route());
        let style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(item.label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => format!(" {} ", app.route().title().to_uppercase()),
        InputMode::Editing => " INPUT ".to_string(),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    let pairs: Vec<(&'static str, &'static str)> = if app.input_mode == InputMode::Editing {
        vec![("Enter", "submit"), ("Esc", "cancel")]
    } else if app.picker.is_some() {
        vec![("j/k", "move"), ("Space", "choose"), ("Esc", "close")]
    } else if app.form_visible() {
        vec![("j/k", "field"), ("Enter", "edit"), ("d", "clear"), ("Ctrl-S", "save")]
    } else {
        match app.route() {
            Route::Landing | Route::UseCase | Route::Subscription => {
                vec![("j/k", "scroll"), ("Enter", "get started")]
            }
            Route::Login | Route::Signup => vec![("Enter", "set up profile")],
            Route::Dashboard => vec![("j/k", "item"), ("Enter", "expand"), ("r", "roadmap"), ("e", "edit profile")],
            Route::Roadmap => vec![("i", "type"), ("j/k", "scroll")],
            Route::Profile => vec![("e", "edit profile")],
            Route::NotFound => vec![("Enter", "home")],
            Route::ProfileSetup => vec![],
        }
    };
    for (key, label) in pairs {
        spans.extend(hint(key, label));
    }
    if app.input_mode == InputMode::Normal {
        spans.extend(hint("1-9", "nav"));
        spans.extend(hint(":", "go"));
        spans.extend(hint("a", "assistant"));
        spans.extend(hint("q", "quit"));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_scrolled(app: &App, frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title));
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_landing(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        heading(content::LANDING_HEADLINE),
        Line::from(content::LANDING_TAGLINE),
        Line::default(),
        Line::from(Span::styled("[Enter] Start Your Personalized Path", Style::default().fg(Color::Green))),
        Line::default(),
        heading(content::PROBLEM_TITLE),
        Line::default(),
    ];
    sections(&mut lines, content::PROBLEMS, false);
    lines.push(heading(content::SOLUTION_TITLE));
    lines.push(Line::default());
    sections(&mut lines, content::SOLUTIONS, false);
    lines.push(heading(content::LANDING_CLOSING.title));
    lines.push(Line::from(content::LANDING_CLOSING.body));

    render_scrolled(app, frame, area, "Home", lines);
}

fn render_use_case(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        heading(content::USE_CASE_TITLE),
        Line::from(content::USE_CASE_INTRO),
        Line::default(),
    ];
    sections(&mut lines, content::USE_CASE_STEPS, true);
    lines.push(heading(content::USE_CASE_CLOSING));
    lines.push(Line::from(Span::styled("[Enter] Sign up", Style::default().fg(Color::Green))));

    render_scrolled(app, frame, area, "Use Case", lines);
}

fn plan_lines(plan: &Plan) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(plan.price, Style::default().bold()),
            Span::styled(" /month", Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(plan.tagline, Style::default().italic())),
        Line::default(),
    ];
    lines.extend(plan.features.iter().map(|f| Line::from(format!("✓ {}", f))));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("[Enter] {}", plan.call_to_action),
        Style::default().fg(Color::Green),
    )));
    lines
}

fn render_plans(app: &App, frame: &mut Frame, area: Rect) {
    let [intro_area, plans_area, faq_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(14),
        Constraint::Min(0),
    ])
    .areas(area);

    let intro = Paragraph::new(vec![heading(content::PLANS_TITLE), Line::from(content::PLANS_INTRO)])
        .wrap(Wrap { trim: true });
    frame.render_widget(intro, intro_area);

    let columns = Layout::horizontal(vec![Constraint::Ratio(1, content::PLANS.len() as u32); content::PLANS.len()])
        .split(plans_area);
    for (plan, column) in content::PLANS.iter().zip(columns.iter()) {
        let border = if plan.recommended { ACCENT } else { Color::DarkGray };
        let title = if plan.recommended {
            format!(" {} (most popular) ", plan.name)
        } else {
            format!(" {} ", plan.name)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        frame.render_widget(
            Paragraph::new(plan_lines(plan)).block(block).wrap(Wrap { trim: true }),
            *column,
        );
    }

    let mut faq = Vec::new();
    for item in content::FAQS {
        faq.push(Line::from(Span::styled(item.question, Style::default().bold())));
        faq.push(Line::from(item.answer));
        faq.push(Line::default());
    }
    render_scrolled(app, frame, faq_area, "Frequently Asked Questions", faq);
}

fn render_entry(app: &App, frame: &mut Frame, area: Rect) {
    let (title, lead) = match app.route() {
        Route::Signup => ("Create Your Account", "Start with a profile and get a personalized roadmap."),
        _ => ("Welcome Back", "Pathfinder keeps your profile on this device. No password needed."),
    };
    let mut lines = vec![heading(title), Line::default(), Line::from(lead), Line::default()];
    if let Some(pending) = app.router.pending_destination() {
        lines.push(Line::from(Span::styled(
            format!("You'll continue to {} afterwards.", pending),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "[Enter] Set up your profile",
        Style::default().fg(Color::Green).bold(),
    )));

    let popup = centered(area, 60, lines.len() as u16 + 2);
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), popup);
}

fn form_row_value(app: &App, row: FormRow) -> String {
    match row {
        FormRow::Skills => {
            if app.form.skills().is_empty() {
                "(none)".to_string()
            } else {
                app.form.skills().iter().cloned().collect::<Vec<_>>().join(", ")
            }
        }
        FormRow::CustomSkill => "Enter to type a skill not in the list".to_string(),
        FormRow::Submit => String::new(),
        FormRow::ResumeFile => match app.form.resume_file() {
            Some(file) => file.name.clone(),
            None => "Enter a path to a .pdf, .doc or .docx (max 5 MB)".to_string(),
        },
        other => other
            .field()
            .map(|f| app.form.text(f).to_string())
            .unwrap_or_default(),
    }
}

fn render_profile_form(app: &mut App, frame: &mut Frame, area: Rect, title: &str) {
    let editing_row = match app.input_target {
        Some(InputTarget::Field(field)) => FORM_ROWS.iter().position(|r| r.field() == Some(field)),
        Some(InputTarget::CustomSkill) => FORM_ROWS.iter().position(|r| *r == FormRow::CustomSkill),
        Some(InputTarget::ResumePath) => FORM_ROWS.iter().position(|r| *r == FormRow::ResumeFile),
        _ => None,
    };

    let items: Vec<ListItem> = FORM_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if *row == FormRow::Submit {
                return ListItem::new(Line::from(Span::styled(
                    format!("[ {} ]", row.label()),
                    Style::default().fg(Color::Green).bold(),
                )));
            }
            let value = if editing_row == Some(i) {
                Span::styled(format!("{}▏", app.input.value()), Style::default().fg(Color::Yellow))
            } else {
                Span::raw(form_row_value(app, *row))
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{:<28}", row.label()), Style::default().fg(Color::Gray)),
                value,
            ])];
            if let Some(error) = row.field().and_then(|f| app.form.error(f)) {
                lines.push(Line::from(Span::styled(
                    format!("{:<28}{}", "", error),
                    Style::default().fg(Color::Red),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title.to_string());
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.form_state);
}

fn render_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(kind) = app.picker else { return };
    let items = app.picker_items_for(kind);
    let title = match kind {
        PickerKind::ProgrammingLanguage => " Preferred Programming Language ",
        PickerKind::SpokenLanguage => " Preferred Spoken Language ",
        PickerKind::Skills => " Skills (Space to toggle, Esc when done) ",
    };

    let popup = centered(area, 46, items.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let chosen = match kind {
                PickerKind::ProgrammingLanguage => app.form.programming_language() == Some(item.as_str()),
                PickerKind::SpokenLanguage => app.form.spoken_language() == Some(item.as_str()),
                PickerKind::Skills => app.form.has_skill(item),
            };
            let mark = if chosen { "[x]" } else { "[ ]" };
            let style = if chosen {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} {} ", mark, item)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title);
    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup, &mut app.picker_state);
}

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let [stats_area, list_area] = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

    let stats = app.dashboard.stats();
    let cards = [
        ("Days Active", stats.days_active),
        ("Courses Completed", stats.courses_completed),
        ("Current Streak", stats.current_streak),
    ];
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(stats_area);
    for ((label, value), column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", label));
        let text = Paragraph::new(Line::from(Span::styled(value.to_string(), Style::default().fg(ACCENT).bold())));
        frame.render_widget(text.block(block), *column);
    }

    let expanded = app.dashboard.expanded();
    let items: Vec<ListItem> = app
        .dashboard
        .items()
        .iter()
        .map(|item| {
            let status = if item.completed {
                Span::styled(" ✓ ", Style::default().fg(Color::Green))
            } else {
                Span::raw("   ")
            };
            let kind_style = match item.kind {
                ItemKind::Course => Style::default().fg(Color::Blue),
                ItemKind::Project => Style::default().fg(Color::Magenta),
            };
            let mut lines = vec![Line::from(vec![
                status,
                Span::styled(item.title, Style::default().bold()),
                Span::raw("  "),
                Span::styled(format!("[{}]", item.kind.label()), kind_style),
                Span::styled(format!(" {}", item.duration), Style::default().fg(Color::Gray)),
            ])];
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(progress_bar(item.progress, 20), Style::default().fg(ACCENT)),
                Span::raw(format!(" {:>3}%", item.progress)),
            ]));

            if expanded == Some(item.id) {
                lines.push(Line::from(format!("   {}", item.description)));
                if let Some(module) = item.current_module {
                    lines.push(Line::from(Span::styled(
                        format!("   Current module: {}", module),
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines.push(Line::from("   Resources:"));
                for resource in item.resources {
                    lines.push(Line::from(format!("     - {}", resource)));
                }
                lines.push(Line::from(Span::styled(
                    format!("   [{}]", item.action_label()),
                    Style::default().fg(Color::Green),
                )));
            }
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ({}% overall) ", ROADMAP_TITLE, app.dashboard.overall_progress()));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.dashboard_state);
}

fn chat_lines(conversation: &Conversation, animation_frame: u8, pending_label: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    for msg in conversation.messages() {
        push_message(&mut lines, msg);
    }
    if conversation.is_pending() {
        lines.push(Line::from(Span::styled(
            "Pathfinder:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("{}{}", pending_label, dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn push_message(lines: &mut Vec<Line<'static>>, msg: &ChatMessage) {
    let (label, color) = match msg.author {
        ChatAuthor::User => ("You:", Color::Cyan),
        ChatAuthor::System => ("Pathfinder:", Color::Yellow),
    };
    lines.push(Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {}", msg.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    for line in msg.text.lines() {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::default());
}

/// Text input box with horizontal scrolling; places the cursor when editing
fn render_input(app: &App, frame: &mut Frame, area: Rect, title: &str, active: bool) {
    let border = if active { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title.to_string());

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = if active { app.input.cursor() } else { 0 };
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = if active {
        app.input.value().chars().skip(scroll_offset).take(inner_width).collect()
    } else {
        String::new()
    };
    frame.render_widget(
        Paragraph::new(visible_text).style(Style::default().fg(ACCENT)).block(block),
        area,
    );

    if active {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_roadmap(app: &mut App, frame: &mut Frame, area: Rect) {
    let [intro_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Describe your experience, goals, and interests to get a personalized learning roadmap",
            Style::default().fg(Color::Gray),
        )),
        intro_area,
    );

    // Inner size for scroll calculations
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Roadmap Generator ");
    let chat = Paragraph::new(chat_lines(&app.roadmap_chat, app.animation_frame, "Generating your roadmap"))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    let active = app.input_target == Some(InputTarget::RoadmapChat);
    render_input(app, frame, input_area, " Your goals (i to type, Enter to send) ", active);
}

fn render_profile(app: &App, frame: &mut Frame, area: Rect) {
    let [details_area, progress_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let mut lines = Vec::new();
    if let Some(profile) = &app.profile {
        lines.push(heading(profile.display_name()));
        let rows = [
            ("Email", profile.email.as_str()),
            ("Location", profile.location.as_str()),
            ("Programming language", profile.preferred_programming_language.as_str()),
            ("Spoken language", profile.preferred_spoken_language.as_str()),
            ("Resume link", profile.resume_link.as_deref().unwrap_or("")),
            ("Resume file", profile.resume_file_name.as_deref().unwrap_or("")),
        ];
        for (label, value) in rows {
            let value = if value.is_empty() { "-" } else { value };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<22}", label), Style::default().fg(Color::Gray)),
                Span::raw(value.to_string()),
            ]));
        }
        lines.push(Line::default());
        if !profile.bio.is_empty() {
            lines.push(Line::from(profile.bio.clone()));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled("Skills", Style::default().bold())));
        lines.push(Line::from(profile.skills.iter().cloned().collect::<Vec<_>>().join(" · ")));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Profile ");
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), details_area);

    let summary = PROGRESS_SUMMARY;
    let mut progress = vec![
        Line::from(format!(
            "Courses completed  {}/{}",
            summary.courses_completed, summary.total_courses
        )),
        Line::from(format!("Days active        {}", summary.days_active)),
        Line::default(),
        Line::from(vec![
            Span::styled(progress_bar(summary.percentage, 20), Style::default().fg(ACCENT)),
            Span::raw(format!(" {}%", summary.percentage)),
        ]),
        Line::default(),
        Line::from(Span::styled("Badges", Style::default().bold())),
    ];
    progress.extend(summary.badges.iter().map(|b| Line::from(format!("★ {}", b))));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Learning Progress ");
    frame.render_widget(Paragraph::new(progress).block(block), progress_area);
}

fn render_not_found(app: &App, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("404", Style::default().fg(ACCENT).bold())),
        Line::from(content::NOT_FOUND_TITLE),
        Line::default(),
        Line::from(Span::styled(app.router.current().path.clone(), Style::default().fg(Color::Gray))),
        Line::from(content::NOT_FOUND_BODY),
        Line::default(),
        Line::from(Span::styled("[Enter] Return Home", Style::default().fg(Color::Green))),
    ];
    let popup = centered(area, 60, lines.len() as u16 + 2);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

/// Floating assistant in the bottom right corner of the body
fn render_assistant(app: &App, frame: &mut Frame, area: Rect) {
    let width = 48.min(area.width);
    let height = 18.min(area.height);
    let panel = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );
    frame.render_widget(Clear, panel);

    let [chat_area, input_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(panel);

    let lines = chat_lines(&app.assistant, app.animation_frame, "Typing");
    // Always follow the newest message
    let total = crate::app::chat_line_count(
        app.assistant.messages(),
        app.assistant.is_pending(),
        chat_area.width.saturating_sub(2) as usize,
    );
    let scroll = total.saturating_sub(chat_area.height.saturating_sub(2));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Pathfinder Assistant (Esc to close) ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        chat_area,
    );

    let active = app.input_target == Some(InputTarget::AssistantChat);
    render_input(app, frame, input_area, " Ask (i to type) ", active);
}

fn render_goto(app: &App, frame: &mut Frame, area: Rect) {
    let popup = centered(area, 50, 3);
    frame.render_widget(Clear, popup);
    render_input(app, frame, popup, " Go to path ", true);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = &app.notice else { return };
    let color = match notice.kind {
        NoticeKind::Info => Color::Blue,
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };

    let mut lines = vec![Line::from(Span::styled(notice.title.clone(), Style::default().bold()))];
    if let Some(detail) = &notice.detail {
        lines.push(Line::from(detail.clone()));
    }

    let width = 44.min(area.width);
    let height = (lines.len() as u16 + 2 + 1).min(area.height);
    let toast = Rect::new(area.x + area.width - width, area.y, width, height);
    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)))
            .wrap(Wrap { trim: true }),
        toast,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_core::{Config, MemoryStorage, Session};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Session::new(Arc::new(MemoryStorage::new())), &Config::new())
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(100, 4), "████");
    }

    #[test]
    fn test_guest_navbar_rendered() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Sign Up"));
        assert!(!screen.contains("Logout"));
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = app();
        app.go(Route::ProfileSetup);
        app.form.select_programming_language("Java");
        app.form.toggle_skill("AWS");
        app.submit_form();

        for route in Route::all() {
            app.go(route);
            draw(&mut app);
        }
        app.navigate("/missing");
        assert!(draw(&mut app).contains("Page Not Found"));
    }

    #[test]
    fn test_dashboard_shows_action_when_expanded() {
        let mut app = app();
        app.go(Route::ProfileSetup);
        app.form.select_programming_language("Java");
        app.form.toggle_skill("AWS");
        app.submit_form();
        app.notice = None;

        app.toggle_selected_item();
        assert!(draw(&mut app).contains("Review Material"));
    }
}
