use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::fragment;
use crate::state::{DisplayOutput, Region};
use crate::theme::Palette;

/// One bordered output region
pub struct RegionPanel;

pub struct RegionPanelProps<'a> {
    pub region: Region,
    pub output: &'a DisplayOutput,
    pub palette: Palette,
    /// Shown while the region is still empty
    pub hint: &'a str,
}

impl Component<Action> for RegionPanel {
    type Props<'a> = RegionPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::bordered()
            .title(format!(" {} ", props.region.title()))
            .border_style(Style::default().fg(palette.muted))
            .style(Style::default().bg(palette.panel).fg(palette.fg));

        let text_style = match props.output {
            DisplayOutput::Empty | DisplayOutput::Loading => Style::default().fg(palette.muted),
            DisplayOutput::Message(_) => Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
            DisplayOutput::Image { .. } => Style::default().fg(palette.accent),
            DisplayOutput::Weather(_) | DisplayOutput::Conversion(_) => {
                Style::default().fg(palette.fg)
            }
        };

        let lines: Vec<Line> = match props.output {
            DisplayOutput::Empty => vec![Line::from(props.hint.to_string())],
            output => fragment::plain(output).into_iter().map(Line::from).collect(),
        };

        let paragraph = Paragraph::new(lines)
            .style(text_style)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
