//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::currency::ConversionRequest;
use crate::effect::Effect;
use crate::state::{
    AppState, DisplayOutput, Species, CITY_NOT_FOUND, INVALID_CURRENCY, RATE_ERROR, WEATHER_ERROR,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Theme actions =====
        Action::ThemeToggle => {
            state.theme.advance();
            DispatchResult::changed()
        }

        // ===== Image actions =====
        Action::DogFetch => fetch_image(state, Species::Dog),
        Action::CatFetch => fetch_image(state, Species::Cat),

        Action::DogDidLoad(url) => {
            state.dog = DisplayOutput::image(Species::Dog, url);
            DispatchResult::changed()
        }

        Action::CatDidLoad(url) => {
            state.cat = DisplayOutput::image(Species::Cat, url);
            DispatchResult::changed()
        }

        Action::DogDidError(_) => {
            state.dog = DisplayOutput::message(Species::Dog.failure_message());
            DispatchResult::changed()
        }

        Action::CatDidError(_) => {
            state.cat = DisplayOutput::message(Species::Cat.failure_message());
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherCityChange(city) => {
            state.city_input = city;
            DispatchResult::changed()
        }

        Action::WeatherFetch => {
            // Empty names go to the geocoder as-is
            let city = state.city_input.trim().to_string();
            state.weather = DisplayOutput::Loading;
            let request = state.next_request();
            DispatchResult::changed_with(Effect::FetchWeather { city, request })
        }

        Action::WeatherDidLoad(report) => {
            state.weather = DisplayOutput::Weather(report);
            DispatchResult::changed()
        }

        Action::WeatherDidNotFind => {
            state.weather = DisplayOutput::message(CITY_NOT_FOUND);
            DispatchResult::changed()
        }

        Action::WeatherDidError(_) => {
            state.weather = DisplayOutput::message(WEATHER_ERROR);
            DispatchResult::changed()
        }

        // ===== Currency actions =====
        Action::CurrencyFromChange(code) => {
            state.from_input = code;
            DispatchResult::changed()
        }

        Action::CurrencyToChange(code) => {
            state.to_input = code;
            DispatchResult::changed()
        }

        Action::CurrencyAmountChange(amount) => {
            state.amount_input = amount;
            DispatchResult::changed()
        }

        Action::CurrencyConvert => {
            match ConversionRequest::validate(
                &state.from_input,
                &state.to_input,
                &state.amount_input,
            ) {
                Ok(conversion) => {
                    state.currency = DisplayOutput::Loading;
                    let request = state.next_request();
                    DispatchResult::changed_with(Effect::FetchRates {
                        conversion,
                        request,
                    })
                }
                Err(invalid) => {
                    state.currency = DisplayOutput::message(invalid.to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::CurrencyDidLoad(conversion) => {
            state.currency = DisplayOutput::Conversion(conversion);
            DispatchResult::changed()
        }

        Action::CurrencyDidReject => {
            state.currency = DisplayOutput::message(INVALID_CURRENCY);
            DispatchResult::changed()
        }

        Action::CurrencyDidError(_) => {
            state.currency = DisplayOutput::message(RATE_ERROR);
            DispatchResult::changed()
        }

        // ===== Focus actions =====
        Action::FocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            state.focus = state.focus.prev();
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Show the placeholder before the request is issued
fn fetch_image(state: &mut AppState, species: Species) -> DispatchResult<Effect> {
    *state.region_mut(species.region()) = DisplayOutput::Loading;
    let request = state.next_request();
    DispatchResult::changed_with(Effect::FetchImage { species, request })
}
