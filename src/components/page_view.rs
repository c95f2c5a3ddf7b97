use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection,
    StatusBarStyle, TextInput, TextInputProps, TextInputStyle,
};

use super::{Banner, BannerProps, Component, RegionPanel, RegionPanelProps, BANNER_HEIGHT};
use crate::action::Action;
use crate::state::{AppState, Focus, Region};
use crate::theme::Palette;

const LABEL_WIDTH: u16 = 10;

/// Props for PageView - read-only view of state
pub struct PageViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole page: banner, four regions, inputs and key hints
pub struct PageView {
    city: TextInput,
    from: TextInput,
    to: TextInput,
    amount: TextInput,
}

/// Static description of one input field
struct Field {
    label: &'static str,
    placeholder: &'static str,
    on_change: fn(String) -> Action,
    on_submit: fn(String) -> Action,
}

fn input_field(focus: Focus) -> Field {
    match focus {
        Focus::City => Field {
            label: "City",
            placeholder: "Enter a city...",
            on_change: Action::WeatherCityChange,
            on_submit: submit_weather,
        },
        Focus::From => Field {
            label: "From",
            placeholder: "USD",
            on_change: Action::CurrencyFromChange,
            on_submit: submit_currency,
        },
        Focus::To => Field {
            label: "To",
            placeholder: "EUR",
            on_change: Action::CurrencyToChange,
            on_submit: submit_currency,
        },
        Focus::Amount => Field {
            label: "Amount",
            placeholder: "Amount",
            on_change: Action::CurrencyAmountChange,
            on_submit: submit_currency,
        },
    }
}

fn submit_weather(_: String) -> Action {
    Action::WeatherFetch
}

fn submit_currency(_: String) -> Action {
    Action::CurrencyConvert
}

fn cursor_render(_: usize) -> Action {
    Action::Render
}

fn input_style(palette: &Palette, is_focused: bool) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(if is_focused { palette.panel } else { palette.bg }),
            fg: Some(palette.fg),
        },
        placeholder_style: Some(Style::default().fg(palette.muted)),
        cursor_style: Some(Style::default().bg(palette.accent).fg(palette.bg)),
    }
}

/// Keys that work regardless of which input has focus
fn page_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::F(1) => Some(Action::ThemeToggle),
        KeyCode::F(2) => Some(Action::DogFetch),
        KeyCode::F(3) => Some(Action::CatFetch),
        KeyCode::F(4) => Some(Action::WeatherFetch),
        KeyCode::F(5) => Some(Action::CurrencyConvert),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        Self {
            city: TextInput::new(),
            from: TextInput::new(),
            to: TextInput::new(),
            amount: TextInput::new(),
        }
    }

    fn input_mut(&mut self, focus: Focus) -> &mut TextInput {
        match focus {
            Focus::City => &mut self.city,
            Focus::From => &mut self.from,
            Focus::To => &mut self.to,
            Focus::Amount => &mut self.amount,
        }
    }

    fn render_input(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        focus: Focus,
        is_focused: bool,
    ) {
        let palette = state.theme.palette();
        let field = input_field(focus);
        let chunks =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).split(area);

        let label_style = if is_focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("{}:", field.label), label_style))),
            chunks[0],
        );

        let props = TextInputProps {
            value: state.input(focus),
            placeholder: field.placeholder,
            is_focused,
            style: input_style(&palette, is_focused),
            on_change: field.on_change,
            on_submit: field.on_submit,
            on_cursor_move: Some(cursor_render),
        };
        self.input_mut(focus).render(frame, chunks[1], props);
    }
}

impl Component<Action> for PageView {
    type Props<'a> = PageViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        if let Some(action) = page_key(key.code, key.modifiers) {
            return vec![action];
        }

        // All other keys go to the focused input
        let state = props.state;
        let field = input_field(state.focus);
        let input_props = TextInputProps {
            value: state.focused_input(),
            placeholder: field.placeholder,
            is_focused: true,
            style: input_style(&state.theme.palette(), true),
            on_change: field.on_change,
            on_submit: field.on_submit,
            on_cursor_move: Some(cursor_render),
        };
        self.input_mut(state.focus)
            .handle_event(event, input_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PageViewProps<'_>) {
        let state = props.state;
        let palette = state.theme.palette();
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        let rows = Layout::vertical([
            Constraint::Length(BANNER_HEIGHT), // Title + theme button
            Constraint::Min(4),                // Dog | Cat
            Constraint::Min(8),                // Weather | Currency
            Constraint::Length(1),             // Help bar
        ])
        .split(area);

        let mut banner = Banner;
        banner.render(frame, rows[0], BannerProps { theme: &state.theme });

        let images = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        let mut panel = RegionPanel;
        panel.render(
            frame,
            images[0],
            RegionPanelProps {
                region: Region::Dog,
                output: &state.dog,
                palette,
                hint: "Press F2 to fetch a dog",
            },
        );
        panel.render(
            frame,
            images[1],
            RegionPanelProps {
                region: Region::Cat,
                output: &state.cat,
                palette,
                hint: "Press F3 to fetch a cat",
            },
        );

        let forms = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        let weather = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(forms[0]);
        self.render_input(
            frame,
            weather[0],
            state,
            Focus::City,
            props.is_focused && state.focus == Focus::City,
        );
        panel.render(
            frame,
            weather[1],
            RegionPanelProps {
                region: Region::Weather,
                output: &state.weather,
                palette,
                hint: "Type a city, then Enter or F4",
            },
        );

        let currency = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(forms[1]);
        for (slot, focus) in [Focus::From, Focus::To, Focus::Amount].into_iter().enumerate() {
            self.render_input(
                frame,
                currency[slot],
                state,
                focus,
                props.is_focused && state.focus == focus,
            );
        }
        panel.render(
            frame,
            currency[3],
            RegionPanelProps {
                region: Region::Currency,
                output: &state.currency,
                palette,
                hint: "Fill the fields, then Enter or F5",
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            rows[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("F1", "theme"),
                    StatusBarHint::new("F2", "dog"),
                    StatusBarHint::new("F3", "cat"),
                    StatusBarHint::new("F4", "weather"),
                    StatusBarHint::new("F5", "convert"),
                    StatusBarHint::new("Tab", "next field"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
