//! Render tests using RenderHarness

use tui_dispatch::testing::*;
use minidash::{
    components::{
        Banner, BannerProps, Component, PageView, PageViewProps, RegionPanel, RegionPanelProps,
    },
    state::{AppState, DisplayOutput, Region, Species},
    theme::{SOLARIZED_THEMES, ThemeState},
};

fn render_panel(region: Region, output: &DisplayOutput) -> String {
    let mut render = RenderHarness::new(50, 8);
    let mut panel = RegionPanel;
    let palette = ThemeState::default().palette();

    render.render_to_string_plain(|frame| {
        let props = RegionPanelProps {
            region,
            output,
            palette,
            hint: "Press F2",
        };
        panel.render(frame, frame.area(), props);
    })
}

#[test]
fn test_empty_panel_shows_hint() {
    let output = render_panel(Region::Dog, &DisplayOutput::Empty);
    assert!(output.contains("Dog"), "title:\n{output}");
    assert!(output.contains("Press F2"), "hint:\n{output}");
}

#[test]
fn test_image_panel_shows_url() {
    let output = render_panel(
        Region::Cat,
        &DisplayOutput::image(Species::Cat, "https://cdn2.thecatapi.com/x.jpg"),
    );
    assert!(output.contains("Cat image:"), "output:\n{output}");
    assert!(output.contains("thecatapi.com/x.jpg"), "output:\n{output}");
}

#[test]
fn test_message_panel() {
    let output = render_panel(Region::Currency, &DisplayOutput::message("Invalid currency."));
    assert!(output.contains("Currency"));
    assert!(output.contains("Invalid currency."));
}

#[test]
fn test_banner_shows_theme_button() {
    let mut render = RenderHarness::new(80, 8);
    let mut banner = Banner;
    let theme = ThemeState::new(SOLARIZED_THEMES).unwrap();

    let output = render.render_to_string_plain(|frame| {
        banner.render(frame, frame.area(), BannerProps { theme: &theme });
    });

    assert!(output.contains("[ Light ]"), "output:\n{output}");
    assert!(output.contains("data-theme=\"light\""), "output:\n{output}");
}

#[test]
fn test_page_renders_all_regions() {
    let mut render = RenderHarness::new(100, 40);
    let mut component = PageView::new();
    let state = AppState {
        city_input: "Berlin".into(),
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = PageViewProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    for title in ["Dog", "Cat", "Weather", "Currency"] {
        assert!(output.contains(title), "missing {title}:\n{output}");
    }
    assert!(output.contains("Berlin"), "city input:\n{output}");
    assert!(output.contains("Amount:"), "labels:\n{output}");
}
