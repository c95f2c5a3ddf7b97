//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::currency::Conversion;
use crate::theme::ThemeState;

pub const LOADING_TEXT: &str = "Loading...";
pub const CITY_NOT_FOUND: &str = "City not found!";
pub const WEATHER_ERROR: &str = "Error fetching weather.";
pub const INVALID_CURRENCY: &str = "Invalid currency.";
pub const RATE_ERROR: &str = "Error fetching rate.";

/// Which image provider to call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn name(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }

    /// `alt` text of the rendered image.
    pub fn alt(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Species::Dog => "Failed to load dog image.",
            Species::Cat => "Failed to load cat image.",
        }
    }

    pub fn region(&self) -> Region {
        match self {
            Species::Dog => Region::Dog,
            Species::Cat => Region::Cat,
        }
    }
}

/// The four output regions of the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Region {
    Dog,
    Cat,
    Weather,
    Currency,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Dog, Region::Cat, Region::Weather, Region::Currency];

    pub fn title(&self) -> &'static str {
        match self {
            Region::Dog => "Dog",
            Region::Cat => "Cat",
            Region::Weather => "Weather",
            Region::Currency => "Currency",
        }
    }
}

/// Current conditions as shown in the weather region
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    /// Place name as the user typed it (trimmed), not as the geocoder resolved it
    pub city: String,
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// degrees
    pub wind_direction: f64,
    /// `YYYY-MM-DD HH:MM` in the location's local time
    pub time: String,
}

/// Content of one output region. Every write replaces the previous value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DisplayOutput {
    /// Nothing requested yet
    #[default]
    Empty,
    Loading,
    Image {
        url: String,
        alt: String,
    },
    Weather(WeatherReport),
    Conversion(Conversion),
    /// A fixed user-facing message (validation, not-found or failure text)
    Message(String),
}

impl DisplayOutput {
    pub fn image(species: Species, url: impl Into<String>) -> Self {
        DisplayOutput::Image {
            url: url.into(),
            alt: species.alt().to_string(),
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        DisplayOutput::Message(text.into())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayOutput::Loading)
    }
}

/// Text field that receives typed characters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    City,
    From,
    To,
    Amount,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::City => Focus::From,
            Focus::From => Focus::To,
            Focus::To => Focus::Amount,
            Focus::Amount => Focus::City,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::City => Focus::Amount,
            Focus::From => Focus::City,
            Focus::To => Focus::From,
            Focus::Amount => Focus::To,
        }
    }
}

/// Application state - everything the page needs to render
///
/// Each output region is written only by its own operation's actions, so
/// in-flight requests for different regions never touch the same field.
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Theme ---
    #[debug(section = "Theme", label = "Active", debug_fmt)]
    pub theme: ThemeState,

    // --- Output regions ---
    #[debug(section = "Regions", label = "Dog", debug_fmt)]
    pub dog: DisplayOutput,

    #[debug(section = "Regions", label = "Cat", debug_fmt)]
    pub cat: DisplayOutput,

    #[debug(section = "Regions", label = "Weather", debug_fmt)]
    pub weather: DisplayOutput,

    #[debug(section = "Regions", label = "Currency", debug_fmt)]
    pub currency: DisplayOutput,

    // --- Inputs ---
    #[debug(section = "Inputs", label = "City", debug_fmt)]
    pub city_input: String,

    #[debug(section = "Inputs", label = "From", debug_fmt)]
    pub from_input: String,

    #[debug(section = "Inputs", label = "To", debug_fmt)]
    pub to_input: String,

    #[debug(section = "Inputs", label = "Amount", debug_fmt)]
    pub amount_input: String,

    #[debug(section = "Inputs", label = "Focus", debug_fmt)]
    pub focus: Focus,

    // --- Internals (skipped) ---
    /// Sequence number of the last request started, used for task keys
    #[debug(skip)]
    pub request_seq: u64,
}

impl AppState {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    /// Value of the page-level `data-theme` attribute
    pub fn theme_attr(&self) -> &str {
        self.theme.current()
    }

    /// Text of the theme button
    pub fn theme_label(&self) -> String {
        self.theme.label()
    }

    pub fn region(&self, region: Region) -> &DisplayOutput {
        match region {
            Region::Dog => &self.dog,
            Region::Cat => &self.cat,
            Region::Weather => &self.weather,
            Region::Currency => &self.currency,
        }
    }

    pub fn region_mut(&mut self, region: Region) -> &mut DisplayOutput {
        match region {
            Region::Dog => &mut self.dog,
            Region::Cat => &mut self.cat,
            Region::Weather => &mut self.weather,
            Region::Currency => &mut self.currency,
        }
    }

    /// Allocate the sequence number for a new request
    pub fn next_request(&mut self) -> u64 {
        self.request_seq = self.request_seq.wrapping_add(1);
        self.request_seq
    }

    /// Text of the focused input field
    pub fn focused_input(&self) -> &str {
        self.input(self.focus)
    }

    pub fn input(&self, field: Focus) -> &str {
        match field {
            Focus::City => &self.city_input,
            Focus::From => &self.from_input,
            Focus::To => &self.to_input,
            Focus::Amount => &self.amount_input,
        }
    }
}
