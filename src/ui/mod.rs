//! Terminal front end: the presentation adapter for a session.

pub mod game_common;
pub mod hud;
pub mod playfield;

use crate::core::session::Session;
use game_common::{
    game_layout, render_info_panel_frame, render_modal, render_outer_frame, render_status_bar,
    GameLayout,
};
use hud::Hud;
use playfield::{render_playfield, TerminalSurface, PLAYER_COLOR, WALL_COLOR};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Surface for the play area of a screen of size `screen`.
pub fn surface_for(session: &Session, screen: Rect) -> TerminalSurface {
    TerminalSurface::new(session.config.field, game_layout(screen).content)
}

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, session: &Session, hud: &Hud) {
    let layout = game_layout(frame.size());
    let surface = TerminalSurface::new(session.config.field, layout.content);

    render_outer_frame(frame, &layout, " Wallrun ");
    render_playfield(frame, &surface, session);
    render_status(frame, &layout, session, hud);
    render_info_panel(frame, &layout, session, hud);

    if let Some(final_score) = hud.game_over {
        render_modal(
            frame,
            layout.content,
            "💥 Game Over!",
            Color::Red,
            &format!("Final score: {}", final_score),
        );
    }
}

fn render_status(frame: &mut Frame, layout: &GameLayout, session: &Session, hud: &Hud) {
    if hud.awaiting_ack() {
        render_status_bar(
            frame,
            layout.status_bar,
            &hud.score_text,
            Color::Red,
            &[("[Any key]", "Continue")],
        );
    } else if hud.start_visible {
        render_status_bar(
            frame,
            layout.status_bar,
            "Press Enter to start!",
            Color::Yellow,
            &[("[Enter/Space]", "Start"), ("[Q/Esc]", "Quit")],
        );
    } else if session.is_running() {
        render_status_bar(
            frame,
            layout.status_bar,
            &hud.score_text,
            Color::Green,
            &[("[WASD/Arrows]", "Move"), ("[Q/Esc]", "Quit")],
        );
    }
}

fn render_info_panel(frame: &mut Frame, layout: &GameLayout, session: &Session, hud: &Hud) {
    let inner = render_info_panel_frame(frame, layout.info_panel);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(
            " Wallrun ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(session.score.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::styled(
                format!("{:.1}s", hud.seconds_survived(session.config.tick_interval_ms)),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Walls: ", label),
            Span::styled(hud.walls_spawned.to_string(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(PLAYER_COLOR)),
            Span::styled("you", label),
        ]),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(WALL_COLOR)),
            Span::styled("wall", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
