use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::theme::{Palette, ThemeState};

pub const TITLE: &str = "minidash";

/// Rows taken by the banner: FIGlet title + spacer + theme line.
pub const BANNER_HEIGHT: u16 = 8;

/// Page title and the theme button
pub struct Banner;

pub struct BannerProps<'a> {
    pub theme: &'a ThemeState,
}

fn title_fill(palette: &Palette) -> Fill {
    let [(r0, g0, b0), (r1, g1, b1)] = palette.banner;
    let stops = vec![
        artbox::ColorStop::new(0.0, ArtColor::rgb(r0, g0, b0)),
        artbox::ColorStop::new(1.0, ArtColor::rgb(r1, g1, b1)),
    ];
    Fill::Linear(LinearGradient::new(5.0, stops))
}

/// `[ Light ]  data-theme="light"`
pub fn theme_line(theme: &ThemeState, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[ {} ]", theme.label()),
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  data-theme=\"{}\"", theme.current()),
            Style::default().fg(palette.muted),
        ),
    ])
    .centered()
}

impl Component<Action> for Banner {
    type Props<'a> = BannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Theme button
        ])
        .split(area);

        let palette = props.theme.palette();
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill(&palette));
        frame.render_widget(ArtBox::new(&renderer, TITLE), chunks[0]);

        frame.render_widget(
            Paragraph::new(theme_line(props.theme, &palette)),
            chunks[2],
        );
    }
}
