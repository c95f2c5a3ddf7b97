//! Actions - every user activation and every async result

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::currency::Conversion;
use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Theme category =====
    /// Advance to the next theme
    ThemeToggle,

    // ===== Dog category =====
    /// Intent: fetch a random dog image (triggers async task)
    DogFetch,

    /// Result: image URL extracted
    DogDidLoad(String),

    /// Result: request or parse failed
    DogDidError(String),

    // ===== Cat category =====
    /// Intent: fetch a random cat image (triggers async task)
    CatFetch,

    /// Result: image URL extracted
    CatDidLoad(String),

    /// Result: request or parse failed
    CatDidError(String),

    // ===== Weather category =====
    /// City input text changed
    WeatherCityChange(String),

    /// Intent: geocode the city input and fetch current conditions
    WeatherFetch,

    /// Result: conditions loaded
    WeatherDidLoad(WeatherReport),

    /// Result: geocoder returned no match
    WeatherDidNotFind,

    /// Result: either request failed or a response was malformed
    WeatherDidError(String),

    // ===== Currency category =====
    /// Source currency input changed
    CurrencyFromChange(String),

    /// Target currency input changed
    CurrencyToChange(String),

    /// Amount input changed
    CurrencyAmountChange(String),

    /// Intent: validate inputs and fetch the rate table
    CurrencyConvert,

    /// Result: conversion computed
    CurrencyDidLoad(Conversion),

    /// Result: provider rejected the source code or lacks the target code
    CurrencyDidReject,

    /// Result: request failed, non-success status, or malformed body
    CurrencyDidError(String),

    // ===== Focus category =====
    /// Move input focus forward
    FocusNext,

    /// Move input focus backward
    FocusPrev,

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement inside an input)
    Render,

    /// Exit the application
    Quit,
}
