//! Region content as HTML fragments and as plain lines for the terminal

use crate::state::{DisplayOutput, Region, WeatherReport, LOADING_TEXT};

/// The HTML the page writes into `region`.
///
/// Image regions wrap their placeholder and failure text in `<small>`;
/// values are inserted verbatim.
pub fn html(region: Region, output: &DisplayOutput) -> String {
    let small = matches!(region, Region::Dog | Region::Cat);
    match output {
        DisplayOutput::Empty => String::new(),
        DisplayOutput::Loading if small => format!("<small>{LOADING_TEXT}</small>"),
        DisplayOutput::Loading => LOADING_TEXT.to_string(),
        DisplayOutput::Image { url, alt } => format!(r#"<img src="{url}" alt="{alt}">"#),
        DisplayOutput::Weather(report) => weather_html(report),
        DisplayOutput::Conversion(conversion) => format!(
            "{} <br><small>{}</small>",
            conversion.headline(),
            conversion.rate_line()
        ),
        DisplayOutput::Message(text) if small => format!("<small>{text}</small>"),
        DisplayOutput::Message(text) => text.clone(),
    }
}

fn weather_html(report: &WeatherReport) -> String {
    weather_fields(report)
        .iter()
        .map(|(label, value)| format!("<strong>{label}:</strong> {value}"))
        .collect::<Vec<_>>()
        .join("<br>\n")
}

/// Labeled weather values in display order
pub fn weather_fields(report: &WeatherReport) -> [(&'static str, String); 5] {
    [
        ("City", report.city.clone()),
        ("Temperature", format!("{}°C", report.temperature)),
        ("Wind Speed", format!("{} km/h", report.wind_speed)),
        ("Wind Direction", format!("{}°", report.wind_direction)),
        ("Time", report.time.clone()),
    ]
}

/// Plain-text rendition used by the terminal view
pub fn plain(output: &DisplayOutput) -> Vec<String> {
    match output {
        DisplayOutput::Empty => Vec::new(),
        DisplayOutput::Loading => vec![LOADING_TEXT.to_string()],
        DisplayOutput::Image { url, alt } => vec![format!("{alt} image:"), url.clone()],
        DisplayOutput::Weather(report) => weather_fields(report)
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect(),
        DisplayOutput::Conversion(conversion) => {
            vec![conversion.headline(), conversion.rate_line()]
        }
        DisplayOutput::Message(text) => vec![text.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Conversion;
    use crate::state::Species;

    fn test_city() -> WeatherReport {
        WeatherReport {
            city: "TestCity".into(),
            temperature: 20.0,
            wind_speed: 5.0,
            wind_direction: 90.0,
            time: "2025-11-09 12:00".into(),
        }
    }

    #[test]
    fn test_image_fragments() {
        let dog = DisplayOutput::image(Species::Dog, "dog.jpg");
        assert_eq!(html(Region::Dog, &dog), r#"<img src="dog.jpg" alt="Dog">"#);
        assert_eq!(
            html(Region::Cat, &DisplayOutput::Loading),
            "<small>Loading...</small>"
        );
        assert_eq!(
            html(
                Region::Cat,
                &DisplayOutput::message(Species::Cat.failure_message())
            ),
            "<small>Failed to load cat image.</small>"
        );
    }

    #[test]
    fn test_weather_fragment() {
        let fragment = html(Region::Weather, &DisplayOutput::Weather(test_city()));
        assert!(fragment.contains("<strong>City:</strong> TestCity"));
        assert!(fragment.contains("20°C"));
        assert!(fragment.contains("5 km/h"));
        assert!(fragment.contains("90°"));
        assert!(fragment.contains("2025-11-09 12:00"));

        let city = fragment.find("City:").unwrap();
        let temperature = fragment.find("Temperature:").unwrap();
        let speed = fragment.find("Wind Speed:").unwrap();
        let direction = fragment.find("Wind Direction:").unwrap();
        let time = fragment.find("Time:").unwrap();
        assert!(city < temperature && temperature < speed && speed < direction && direction < time);
    }

    #[test]
    fn test_plain_messages_are_unwrapped() {
        assert_eq!(
            html(Region::Weather, &DisplayOutput::Loading),
            "Loading..."
        );
        assert_eq!(
            html(Region::Currency, &DisplayOutput::message("Enter a valid amount.")),
            "Enter a valid amount."
        );
        assert_eq!(html(Region::Dog, &DisplayOutput::Empty), "");
    }

    #[test]
    fn test_conversion_fragment() {
        let conversion = Conversion {
            from: "USD".into(),
            to: "EUR".into(),
            amount: 10.0,
            rate: 0.85,
        };
        let output = DisplayOutput::Conversion(conversion);
        assert_eq!(
            html(Region::Currency, &output),
            "10 USD = 8.500000 EUR <br><small>(Rate: 1 USD = 0.85 EUR)</small>"
        );
        assert_eq!(
            plain(&output),
            vec!["10 USD = 8.500000 EUR", "(Rate: 1 USD = 0.85 EUR)"]
        );
    }

    #[test]
    fn test_plain_weather_lines() {
        let lines = plain(&DisplayOutput::Weather(test_city()));
        assert_eq!(lines[0], "City: TestCity");
        assert_eq!(lines[1], "Temperature: 20°C");
        assert_eq!(lines[4], "Time: 2025-11-09 12:00");
    }
}
