//! HTTP clients for the dog, cat, geocoding, forecast and exchange-rate APIs
//!
//! Every network call returns `Result<_, FetchError>`; response bodies are
//! decoded by the pure `parse_*` functions so they can be tested without a
//! network.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::currency::RateTable;
use crate::state::{Species, WeatherReport};

const USER_AGENT: &str = concat!("minidash/", env!("CARGO_PKG_VERSION"));

/// Base URLs of the five upstream services
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub dog: String,
    pub cat: String,
    pub geocode: String,
    pub forecast: String,
    pub rates: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dog: "https://dog.ceo/api/breeds/image/random".into(),
            cat: "https://api.thecatapi.com/v1/images/search".into(),
            geocode: "https://nominatim.openstreetmap.org/search".into(),
            forecast: "https://api.open-meteo.com/v1/forecast".into(),
            rates: "https://open.er-api.com/v6/latest".into(),
        }
    }
}

impl Endpoints {
    /// Point every service at one local server (`{base}/dog`, `{base}/cat`, ...).
    pub fn local(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            dog: format!("{base}/dog"),
            cat: format!("{base}/cat"),
            geocode: format!("{base}/search"),
            forecast: format!("{base}/forecast"),
            rates: format!("{base}/latest"),
        }
    }

    pub fn image(&self, species: Species) -> &str {
        match species {
            Species::Dog => &self.dog,
            Species::Cat => &self.cat,
        }
    }

    pub fn geocode_url(&self, place: &str) -> String {
        format!(
            "{}?format=json&q={}",
            self.geocode,
            urlencoding::encode(place)
        )
    }

    pub fn forecast_url(&self, point: GeoPoint) -> String {
        format!(
            "{}?latitude={}&longitude={}&current_weather=true&timezone=auto",
            self.forecast, point.lat, point.lon
        )
    }

    pub fn rates_url(&self, from: &str) -> String {
        format!(
            "{}/{}",
            self.rates.trim_end_matches('/'),
            urlencoding::encode(from)
        )
    }
}

/// Fetch failure taxonomy: transport, status, shape
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("response parse error: {0}")]
    Decode(String),
    #[error("unrecognized timestamp: {0}")]
    Timestamp(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error.to_string())
    }
}

/// Coordinates of the first geocoding hit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Outcome of a full weather lookup
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherLookup {
    Found(WeatherReport),
    /// The geocoder answered with an empty list
    NotFound,
}

/// `current_weather` block of the forecast response
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub time: String,
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct DogResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

/// Nominatim sends coordinates as strings; other geocoders send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Result<f64, FetchError> {
        match self {
            Coordinate::Number(value) => Ok(*value),
            Coordinate::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| FetchError::Decode(format!("invalid coordinate {text:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: Coordinate,
    lon: Coordinate,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
}

// ============================================================================
// Parsers
// ============================================================================

/// Dog API: `{ "message": "<url>" }`
pub fn parse_dog(body: &str) -> Result<String, FetchError> {
    let data: DogResponse = serde_json::from_str(body)?;
    Ok(data.message)
}

/// Cat API: `[ { "url": "<url>" }, ... ]`, first element wins
pub fn parse_cat(body: &str) -> Result<String, FetchError> {
    let data: Vec<CatImage> = serde_json::from_str(body)?;
    data.into_iter()
        .next()
        .map(|image| image.url)
        .ok_or_else(|| FetchError::Decode("empty image list".into()))
}

pub fn parse_image(species: Species, body: &str) -> Result<String, FetchError> {
    match species {
        Species::Dog => parse_dog(body),
        Species::Cat => parse_cat(body),
    }
}

/// Geocoder: array of hits, first one wins.
///
/// Any JSON without a non-empty length (empty array, error object, number,
/// null, empty string) is `Ok(None)`, the same as zero results.
pub fn parse_geocode(body: &str) -> Result<Option<GeoPoint>, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let first = match value {
        serde_json::Value::Array(hits) => match hits.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        serde_json::Value::String(text) if !text.is_empty() => {
            return Err(FetchError::Decode(format!("unexpected geocoder text {text:?}")));
        }
        _ => return Ok(None),
    };
    let hit: GeocodeHit = serde_json::from_value(first)?;
    Ok(Some(GeoPoint {
        lat: hit.lat.value()?,
        lon: hit.lon.value()?,
    }))
}

pub fn parse_forecast(body: &str) -> Result<CurrentWeather, FetchError> {
    let data: ForecastResponse = serde_json::from_str(body)?;
    Ok(data.current_weather)
}

/// Exchange rates: a body without `rates` is only acceptable when it
/// reports `result: "error"`.
pub fn parse_rates(body: &str) -> Result<RateTable, FetchError> {
    let data: RatesResponse = serde_json::from_str(body)?;
    let rejected = data.result.as_deref() == Some("error");
    match data.rates {
        Some(rates) => Ok(RateTable { rejected, rates }),
        None if rejected => Ok(RateTable {
            rejected,
            rates: HashMap::new(),
        }),
        None => Err(FetchError::Decode("missing rates".into())),
    }
}

/// Reformat a forecast timestamp (`2025-11-09T12:00`) as `2025-11-09 12:00`.
///
/// The forecast is requested with `timezone=auto`, so the value is already
/// in the location's local time and is not shifted.
pub fn format_local_time(raw: &str) -> Result<String, FetchError> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .ok_or_else(|| FetchError::Timestamp(raw.to_string()))
}

pub fn weather_report(city: &str, current: CurrentWeather) -> Result<WeatherReport, FetchError> {
    Ok(WeatherReport {
        city: city.to_string(),
        temperature: current.temperature,
        wind_speed: current.windspeed,
        wind_direction: current.winddirection,
        time: format_local_time(&current.time)?,
    })
}

// ============================================================================
// Client
// ============================================================================

/// Shared HTTP client; cheap to clone into tasks
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, endpoints })
    }

    /// GET `url` and return the status and body text
    async fn get(&self, url: &str) -> Result<(reqwest::StatusCode, String), FetchError> {
        debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Random image URL. The status code is not inspected; the body decides.
    pub async fn fetch_image(&self, species: Species) -> Result<String, FetchError> {
        let (_, body) = self.get(self.endpoints.image(species)).await?;
        parse_image(species, &body)
    }

    pub async fn geocode(&self, place: &str) -> Result<Option<GeoPoint>, FetchError> {
        let (_, body) = self.get(&self.endpoints.geocode_url(place)).await?;
        parse_geocode(&body)
    }

    pub async fn current_weather(&self, point: GeoPoint) -> Result<CurrentWeather, FetchError> {
        let (_, body) = self.get(&self.endpoints.forecast_url(point)).await?;
        parse_forecast(&body)
    }

    /// Geocode `city`, then fetch conditions for the first hit.
    ///
    /// The forecast call is only made when the geocoder found something.
    pub async fn lookup_weather(&self, city: &str) -> Result<WeatherLookup, FetchError> {
        let Some(point) = self.geocode(city).await? else {
            return Ok(WeatherLookup::NotFound);
        };
        let current = self.current_weather(point).await?;
        Ok(WeatherLookup::Found(weather_report(city, current)?))
    }

    /// Rate table for `from`; any non-success status is an error.
    pub async fn fetch_rates(&self, from: &str) -> Result<RateTable, FetchError> {
        let (status, body) = self.get(&self.endpoints.rates_url(from)).await?;
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        parse_rates(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dog() {
        assert_eq!(parse_dog(r#"{"message":"dog.jpg","status":"success"}"#).unwrap(), "dog.jpg");
        assert!(matches!(parse_dog(r#"{"status":"success"}"#), Err(FetchError::Decode(_))));
        assert!(matches!(parse_dog("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_parse_cat_takes_first() {
        let body = r#"[{"id":"a","url":"cat.jpg"},{"id":"b","url":"other.jpg"}]"#;
        assert_eq!(parse_cat(body).unwrap(), "cat.jpg");
    }

    #[test]
    fn test_parse_cat_shape_is_not_dog_shape() {
        assert!(parse_cat(r#"{"url":"cat.jpg"}"#).is_err());
        assert!(parse_cat("[]").is_err());
        assert!(parse_dog(r#"[{"message":"dog.jpg"}]"#).is_err());
    }

    #[test]
    fn test_parse_geocode() {
        let body = r#"[{"lat":"51.5073219","lon":"-0.1276474","display_name":"London"}]"#;
        let point = parse_geocode(body).unwrap().unwrap();
        assert_eq!(point.lat, 51.5073219);
        assert_eq!(point.lon, -0.1276474);

        let numeric = parse_geocode(r#"[{"lat":10.5,"lon":20}]"#).unwrap().unwrap();
        assert_eq!(numeric, GeoPoint { lat: 10.5, lon: 20.0 });

        assert_eq!(parse_geocode("[]").unwrap(), None);
        assert!(parse_geocode(r#"[{"lat":"north","lon":"0"}]"#).is_err());
        assert!(parse_geocode("<html>").is_err());
        assert!(parse_geocode(r#""London""#).is_err());
        assert!(parse_geocode(r#"[{"name":"no coordinates"}]"#).is_err());
    }

    #[test]
    fn test_parse_geocode_without_results() {
        for body in [r#"{"error":"Unable to geocode"}"#, "null", "42", r#""""#, "[]"] {
            assert_eq!(parse_geocode(body).unwrap(), None, "body {body}");
        }
    }

    #[test]
    fn test_parse_forecast() {
        let body = r#"{"latitude":1.0,"current_weather":{"temperature":20,"windspeed":5.4,"winddirection":90,"weathercode":3,"time":"2025-11-09T12:00"}}"#;
        let current = parse_forecast(body).unwrap();
        assert_eq!(current.temperature, 20.0);
        assert_eq!(current.windspeed, 5.4);
        assert_eq!(current.winddirection, 90.0);
        assert_eq!(current.time, "2025-11-09T12:00");

        assert!(parse_forecast(r#"{"error":true,"reason":"bad"}"#).is_err());
    }

    #[test]
    fn test_format_local_time() {
        assert_eq!(format_local_time("2025-11-09T12:00").unwrap(), "2025-11-09 12:00");
        assert_eq!(format_local_time("2025-01-02T03:04:59").unwrap(), "2025-01-02 03:04");
        assert_eq!(format_local_time("2025-11-09 12:00").unwrap(), "2025-11-09 12:00");
        assert!(matches!(format_local_time("soon"), Err(FetchError::Timestamp(_))));
    }

    #[test]
    fn test_parse_rates() {
        let table = parse_rates(r#"{"result":"success","rates":{"EUR":0.85,"USD":1}}"#).unwrap();
        assert!(!table.rejected);
        assert_eq!(table.rate_for("EUR"), Some(0.85));

        let rejected = parse_rates(r#"{"result":"error","error-type":"unsupported-code"}"#).unwrap();
        assert!(rejected.rejected);
        assert_eq!(rejected.rate_for("EUR"), None);

        assert!(matches!(parse_rates(r#"{"result":"success"}"#), Err(FetchError::Decode(_))));
        assert!(parse_rates("not json").is_err());
    }

    #[test]
    fn test_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.geocode_url("New York"),
            "https://nominatim.openstreetmap.org/search?format=json&q=New%20York"
        );
        assert_eq!(
            endpoints.forecast_url(GeoPoint { lat: 50.45, lon: 30.52 }),
            "https://api.open-meteo.com/v1/forecast?latitude=50.45&longitude=30.52&current_weather=true&timezone=auto"
        );
        assert_eq!(endpoints.rates_url("USD"), "https://open.er-api.com/v6/latest/USD");

        let local = Endpoints::local("http://127.0.0.1:9000/");
        assert_eq!(local.image(Species::Cat), "http://127.0.0.1:9000/cat");
        assert_eq!(local.rates_url("EUR"), "http://127.0.0.1:9000/latest/EUR");
    }
}
