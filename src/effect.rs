//! Effects - side effects declared by the reducer, and the tasks that run them

use tracing::error;

use crate::action::Action;
use crate::api::{ApiClient, WeatherLookup};
use crate::currency::{Conversion, ConversionRequest};
use crate::state::Species;

/// Side effects that can be triggered by actions
///
/// `request` is unique per activation, so a newer request never cancels an
/// older one still in flight; whichever response arrives last is shown.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch a random image URL for the species
    FetchImage { species: Species, request: u64 },
    /// Geocode the city, then fetch its current conditions
    FetchWeather { city: String, request: u64 },
    /// Fetch the rate table for a validated conversion
    FetchRates {
        conversion: ConversionRequest,
        request: u64,
    },
}

impl Effect {
    /// Key of the spawned task
    pub fn task_key(&self) -> String {
        match self {
            Effect::FetchImage { species, request } => format!("{}_{request}", species.name()),
            Effect::FetchWeather { request, .. } => format!("weather_{request}"),
            Effect::FetchRates { request, .. } => format!("rates_{request}"),
        }
    }

    /// Run the effect to completion and turn the outcome into a result action.
    ///
    /// Transport and parse failures are reported here; semantic outcomes
    /// (not found, unknown currency) are not.
    pub async fn run(self, client: ApiClient) -> Action {
        match self {
            Effect::FetchImage { species, .. } => match client.fetch_image(species).await {
                Ok(url) => match species {
                    Species::Dog => Action::DogDidLoad(url),
                    Species::Cat => Action::CatDidLoad(url),
                },
                Err(e) => {
                    error!(species = species.name(), error = %e, "image fetch failed");
                    match species {
                        Species::Dog => Action::DogDidError(e.to_string()),
                        Species::Cat => Action::CatDidError(e.to_string()),
                    }
                }
            },
            Effect::FetchWeather { city, .. } => match client.lookup_weather(&city).await {
                Ok(WeatherLookup::Found(report)) => Action::WeatherDidLoad(report),
                Ok(WeatherLookup::NotFound) => Action::WeatherDidNotFind,
                Err(e) => {
                    error!(city = %city, error = %e, "weather lookup failed");
                    Action::WeatherDidError(e.to_string())
                }
            },
            Effect::FetchRates { conversion, .. } => {
                match client.fetch_rates(&conversion.from).await {
                    Ok(table) => match table.rate_for(&conversion.to) {
                        Some(rate) => Action::CurrencyDidLoad(Conversion::new(conversion, rate)),
                        None => Action::CurrencyDidReject,
                    },
                    Err(e) => {
                        error!(from = %conversion.from, to = %conversion.to, error = %e, "rate fetch failed");
                        Action::CurrencyDidError(e.to_string())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_keys_are_per_request() {
        let first = Effect::FetchImage {
            species: Species::Dog,
            request: 1,
        };
        let second = Effect::FetchImage {
            species: Species::Dog,
            request: 2,
        };
        assert_eq!(first.task_key(), "dog_1");
        assert_ne!(first.task_key(), second.task_key());
        assert_eq!(
            Effect::FetchWeather {
                city: "Oslo".into(),
                request: 7
            }
            .task_key(),
            "weather_7"
        );
    }
}
