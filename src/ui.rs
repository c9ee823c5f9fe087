use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, InputMode, MENU_ITEMS};
use crate::message::Sender;
use crate::theme;

const ATTRIBUTION: &str = "Created by: Janet M. Bulao | CS 3-1";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: app bar, chat, language field, prompt field, footer
    let [header_area, chat_area, lang_area, prompt_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_language_field(app, frame, lang_area);
    render_prompt_field(app, frame, prompt_area);
    render_footer(app, frame, footer_area);

    if app.show_menu {
        render_menu(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" TranSpeak ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[t] {}", app.theme.icon()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled("[m] menu", Style::default().fg(Color::Gray)),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store inner dimensions for scroll/wrap calculations
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(theme::panel_bg(app.theme)))
        .title(" Chat ");

    let message_style = Style::default().fg(theme::message_fg(app.theme));
    let sender_style = Style::default().fg(theme::sender_fg(app.theme));

    let chat_text = if app.chat.is_empty() && !app.submitting() {
        Text::from(Span::styled(
            "Type a message and a language code to translate and speak it...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in app.chat.iter() {
            let label = match msg.sender {
                Sender::You => Span::styled(
                    msg.sender.label(),
                    sender_style.add_modifier(Modifier::BOLD),
                ),
                Sender::Translation => Span::styled(
                    format!("{} [{}]", msg.sender.label(), msg.language_code),
                    sender_style.add_modifier(Modifier::BOLD),
                ),
            };
            lines.push(Line::from(label));
            for line in msg.text.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), message_style)));
            }
            lines.push(Line::default());
        }

        if app.submitting() {
            lines.push(Line::from(Span::styled(
                Sender::Translation.label(),
                sender_style.add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Translating{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn field_border(app: &App, field: Field) -> Style {
    if app.input_mode == InputMode::Editing && app.focus == field {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_language_field(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(app, Field::Language))
        .title(" Language code (es, fr, ...) ");

    let input = Paragraph::new(app.lang_input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(input, area);

    if app.input_mode == InputMode::Editing && app.focus == Field::Language && !app.submitting() {
        set_field_cursor(frame, area, app.lang_cursor);
    }
}

fn render_prompt_field(app: &App, frame: &mut Frame, area: Rect) {
    let title = if app.submitting() {
        " Message (translating...) "
    } else {
        " Message (Enter to send) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(app, Field::Prompt))
        .title(title);

    let input = Paragraph::new(app.prompt_input.as_str())
        .style(Style::default().fg(theme::message_fg(app.theme)))
        .block(block);
    frame.render_widget(input, area);

    if app.input_mode == InputMode::Editing && app.focus == Field::Prompt && !app.submitting() {
        set_field_cursor(frame, area, app.prompt_cursor);
    }
}

fn set_field_cursor(frame: &mut Frame, area: Rect, cursor: usize) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let x = area.x + 1 + cursor.min(inner_width) as u16;
    frame.set_cursor_position((x, area.y + 1));
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", ATTRIBUTION),
            Style::default()
                .fg(theme::footer_fg(app.theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    match app.input_mode {
        InputMode::Normal => spans.extend(vec![
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" l ", key_style),
            Span::styled(" lang ", label_style),
            Span::styled(" t ", key_style),
            Span::styled(" theme ", label_style),
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]),
        InputMode::Editing => spans.extend(vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" field ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ]),
    }

    let footer = Paragraph::new(Line::from(spans));
    frame.render_widget(footer, area);
}

fn render_menu(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup_width = 24.min(area.width.saturating_sub(4));
    let popup_height = (MENU_ITEMS.len() + 2) as u16;

    // Anchored under the app bar, right-aligned like a popup menu button
    let popup_x = area.width.saturating_sub(popup_width + 1);
    let popup_area = Rect::new(popup_x, 1, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Menu ");

    let items: Vec<ListItem> = MENU_ITEMS.iter().map(|item| ListItem::new(*item)).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.menu_state);
}
