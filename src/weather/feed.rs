//! Typed model of the CWA `agrWeatherForecasts` feed.
//!
//! The chain down to the location list is required: if the feed stops
//! matching this shape the run fails with a feed-shape error instead of
//! producing an empty table. Everything inside a location is defaulted,
//! so a location with no data yields empty series and is skipped by the
//! merge, not treated as a schema break.

use serde::Deserialize;

use crate::error::ScrapeError;

#[derive(Debug, Deserialize)]
pub struct Feed {
    pub cwaopendata: OpenData,
}

#[derive(Debug, Deserialize)]
pub struct OpenData {
    pub resources: Resources,
}

#[derive(Debug, Deserialize)]
pub struct Resources {
    pub resource: Resource,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    pub data: ResourceData,
}

#[derive(Debug, Deserialize)]
pub struct ResourceData {
    #[serde(rename = "agrWeatherForecasts")]
    pub agr_weather_forecasts: AgrForecasts,
}

#[derive(Debug, Deserialize)]
pub struct AgrForecasts {
    #[serde(rename = "weatherForecasts")]
    pub weather_forecasts: ForecastSet,
}

#[derive(Debug, Deserialize)]
pub struct ForecastSet {
    pub location: Vec<LocationForecast>,
}

/// One named location with its three independent daily series.
#[derive(Debug, Deserialize)]
pub struct LocationForecast {
    #[serde(rename = "locationName", default)]
    pub name: String,
    #[serde(rename = "weatherElements", default)]
    pub elements: WeatherElements,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherElements {
    #[serde(rename = "MinT", default)]
    pub min_t: ElementSeries,
    #[serde(rename = "MaxT", default)]
    pub max_t: ElementSeries,
    #[serde(rename = "Wx", default)]
    pub wx: ElementSeries,
}

#[derive(Debug, Default, Deserialize)]
pub struct ElementSeries {
    #[serde(default)]
    pub daily: Vec<DailyEntry>,
}

/// One date-stamped reading. `temperature` is set for MinT/MaxT entries,
/// `weather` for Wx entries; the feed reports temperatures as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyEntry {
    #[serde(rename = "dataDate", default)]
    pub date: String,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
}

pub fn parse(json: &str) -> Result<Vec<LocationForecast>, ScrapeError> {
    let feed: Feed = serde_json::from_str(json)?;
    Ok(feed
        .cwaopendata
        .resources
        .resource
        .data
        .agr_weather_forecasts
        .weather_forecasts
        .location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/forecast.json").unwrap()
    }

    #[test]
    fn parses_locations_and_series() {
        let locations = parse(&fixture()).unwrap();
        assert_eq!(locations.len(), 2);

        let taipei = &locations[0];
        assert_eq!(taipei.name, "臺北市");
        assert_eq!(taipei.elements.min_t.daily.len(), 1);
        assert_eq!(taipei.elements.min_t.daily[0].date, "20240101");
        assert_eq!(
            taipei.elements.min_t.daily[0].temperature.as_deref(),
            Some("15")
        );
        assert_eq!(taipei.elements.wx.daily[0].weather.as_deref(), Some("多雲"));
    }

    #[test]
    fn missing_series_defaults_to_empty() {
        let locations = parse(&fixture()).unwrap();
        let kaohsiung = &locations[1];
        assert!(kaohsiung.elements.min_t.daily.is_empty());
        assert_eq!(kaohsiung.elements.max_t.daily.len(), 1);
    }

    #[test]
    fn broken_nesting_is_a_feed_shape_error() {
        let err = parse(r#"{"cwaopendata": {}}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::FeedShape(_)));
    }

    #[test]
    fn location_without_elements_still_parses() {
        let json = r#"{
            "cwaopendata": { "resources": { "resource": { "data": {
                "agrWeatherForecasts": { "weatherForecasts": {
                    "location": [ { "locationName": "澎湖縣" } ]
                } }
            } } } }
        }"#;
        let locations = parse(json).unwrap();
        assert_eq!(locations[0].name, "澎湖縣");
        assert!(locations[0].elements.wx.daily.is_empty());
    }
}
