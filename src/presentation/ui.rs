use crate::application::{App, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Home => render_home(f, app),
        Screen::Quiz => render_quiz(f, app),
        Screen::Results => render_results(f, app),
    }
}

fn render_home(f: &mut Frame, app: &App) {
    let area = f.area();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "DevQuiz",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from("Test your developer knowledge"),
        Line::from(""),
        Line::from(format!("{} questions", app.bank.len())),
        Line::from(format!("Best score: {}", app.best_score)),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: start quiz | q: quit",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("DevQuiz"));
    f.render_widget(home, area);
}

fn render_quiz(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(question) = app.current_question() else {
        return;
    };

    let header = Paragraph::new(format!(
        "{} | {} | {}/{}",
        question.kind.display_name(),
        format_time(session.elapsed_seconds),
        session.current_index + 1,
        app.bank.len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, chunks[0]);

    let progress = session.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(progress)
        .label(format!("{}%", (progress * 100.0).round() as u32));
    f.render_widget(gauge, chunks[1]);

    let prompt = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, chunks[2]);

    render_choices(f, app, chunks[3]);
    render_quiz_status(f, app, session.is_last_question(), chunks[4]);
}

fn render_choices(f: &mut Frame, app: &App, area: Rect) {
    let Some(question) = app.current_question() else {
        return;
    };

    let mut lines = Vec::new();
    for (position, choice) in question.choices.iter().enumerate() {
        let selected = app.is_choice_selected(&choice.key);
        let marker = if selected { "[x]" } else { "[ ]" };

        let mut style = Style::default();
        if selected {
            style = style.fg(Color::Green);
        }
        if position == app.highlighted_choice {
            style = style.bg(Color::Blue).fg(Color::White);
        }

        lines.push(Line::from(Span::styled(
            format!(" {} {}  {}", marker, choice.key, choice.text),
            style,
        )));
        lines.push(Line::from(""));
    }

    let choices = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Choices"));
    f.render_widget(choices, area);
}

fn render_quiz_status(f: &mut Frame, app: &App, last_question: bool, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        let next_label = if last_question { "finish" } else { "next" };
        if app.answered_current() {
            format!("↑↓: move | Enter/Space: select | →: {} | ←: previous | Esc: home", next_label)
        } else {
            "↑↓: move | Enter/Space: select | select an answer to continue".to_string()
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(if app.status_message.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    f.render_widget(status, area);
}

fn render_results(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let Some(result) = app.result.as_ref() else {
        return;
    };

    let message = if result.is_perfect() {
        "Perfect Score!"
    } else if result.percentage() >= 70 {
        "Great Job!"
    } else {
        "Keep Learning!"
    };
    let message_color = if result.is_perfect() {
        Color::Green
    } else if result.percentage() >= 70 {
        Color::Yellow
    } else {
        Color::Red
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}", result.score, result.total),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{}%", result.percentage())),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(message_color))),
        Line::from(""),
        Line::from(format!("Best: {}", result.best_score)),
        Line::from(format!("Time: {}", format_time(result.elapsed_seconds))),
        Line::from(format!("Accuracy: {}%", result.percentage())),
    ];

    if result.is_new_high_score {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "★ New High Score!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let summary = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(summary, chunks[0]);

    let text = app
        .status_message
        .clone()
        .unwrap_or_else(|| "s: share | r: try again | h: home".to_string());
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[1]);
}

fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(600), "10:00");
    }
}
