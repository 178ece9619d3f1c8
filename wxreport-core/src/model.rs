use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct ObservationRequest {
    pub city: String,
}

/// A single weather observation, as produced by the fetch step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub city: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortIndex {
    #[serde(rename = "hot and humid")]
    HotAndHumid,
    #[serde(rename = "cold")]
    Cold,
    #[serde(rename = "pleasant")]
    Pleasant,
}

impl ComfortIndex {
    /// Classify temperature/humidity. The hot-and-humid arm is checked
    /// first; a reading satisfies exactly one label.
    pub fn classify(temperature_c: f64, humidity_pct: u8) -> Self {
        if temperature_c > 25.0 && humidity_pct > 70 {
            ComfortIndex::HotAndHumid
        } else if temperature_c < 15.0 {
            ComfortIndex::Cold
        } else {
            ComfortIndex::Pleasant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortIndex::HotAndHumid => "hot and humid",
            ComfortIndex::Cold => "cold",
            ComfortIndex::Pleasant => "pleasant",
        }
    }
}

impl std::fmt::Display for ComfortIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn celsius_to_fahrenheit(temperature_c: f64) -> f64 {
    temperature_c * 1.8 + 32.0
}

/// The record persisted by the save step.
///
/// Wire names are pinned: consumers of the artifact read `temperature`,
/// `humidity` and `timestamp` without unit suffixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComfortReport {
    pub city: String,
    #[serde(rename = "temperature")]
    pub temperature_c: f64,
    #[serde(rename = "humidity")]
    pub humidity_pct: u8,
    #[serde(rename = "timestamp")]
    pub observed_at: DateTime<Utc>,
    pub comfort_index: ComfortIndex,
    #[serde(rename = "temperature_fahrenheit")]
    pub temperature_f: f64,
}

impl ComfortReport {
    /// Carry all observation fields through and attach the two derived ones.
    pub fn from_observation(observation: Observation) -> Self {
        let comfort_index =
            ComfortIndex::classify(observation.temperature_c, observation.humidity_pct);
        let temperature_f = celsius_to_fahrenheit(observation.temperature_c);

        Self {
            city: observation.city,
            temperature_c: observation.temperature_c,
            humidity_pct: observation.humidity_pct,
            observed_at: observation.observed_at,
            comfort_index,
            temperature_f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_and_humid_above_both_thresholds() {
        assert_eq!(ComfortIndex::classify(26.0, 71), ComfortIndex::HotAndHumid);
        assert_eq!(ComfortIndex::classify(30.0, 90), ComfortIndex::HotAndHumid);
    }

    #[test]
    fn cold_below_fifteen_any_humidity() {
        assert_eq!(ComfortIndex::classify(14.9, 0), ComfortIndex::Cold);
        assert_eq!(ComfortIndex::classify(10.0, 95), ComfortIndex::Cold);
        assert_eq!(ComfortIndex::classify(-5.0, 50), ComfortIndex::Cold);
    }

    #[test]
    fn pleasant_otherwise() {
        assert_eq!(ComfortIndex::classify(22.0, 75), ComfortIndex::Pleasant);
        assert_eq!(ComfortIndex::classify(20.0, 40), ComfortIndex::Pleasant);
        // Hot but dry falls through to pleasant.
        assert_eq!(ComfortIndex::classify(30.0, 40), ComfortIndex::Pleasant);
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly at a limit, the special arms do not fire.
        assert_eq!(ComfortIndex::classify(25.0, 90), ComfortIndex::Pleasant);
        assert_eq!(ComfortIndex::classify(26.0, 70), ComfortIndex::Pleasant);
        assert_eq!(ComfortIndex::classify(15.0, 10), ComfortIndex::Pleasant);
    }

    #[test]
    fn fahrenheit_conversion() {
        assert!((celsius_to_fahrenheit(22.0) - 71.6).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(-40.0) - -40.0).abs() < 1e-9);
    }

    #[test]
    fn report_carries_observation_fields_through() {
        let observation = Observation {
            city: "Lima".to_string(),
            temperature_c: 22.0,
            humidity_pct: 75,
            observed_at: Utc::now(),
        };
        let observed_at = observation.observed_at;

        let report = ComfortReport::from_observation(observation);

        assert_eq!(report.city, "Lima");
        assert_eq!(report.humidity_pct, 75);
        assert_eq!(report.observed_at, observed_at);
        assert_eq!(report.comfort_index, ComfortIndex::Pleasant);
        assert!((report.temperature_f - 71.6).abs() < 1e-9);
    }

    #[test]
    fn report_wire_format_has_the_six_fields() {
        let report = ComfortReport::from_observation(Observation {
            city: "Lima".to_string(),
            temperature_c: 28.0,
            humidity_pct: 80,
            observed_at: Utc::now(),
        });

        let value = serde_json::to_value(&report).expect("report must serialize");
        let object = value.as_object().expect("report must be a JSON object");

        for field in [
            "city",
            "temperature",
            "humidity",
            "timestamp",
            "comfort_index",
            "temperature_fahrenheit",
        ] {
            assert!(object.contains_key(field), "missing field '{field}'");
        }
        assert_eq!(object.len(), 6);

        assert_eq!(value["comfort_index"], "hot and humid");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn comfort_index_labels() {
        assert_eq!(ComfortIndex::HotAndHumid.as_str(), "hot and humid");
        assert_eq!(ComfortIndex::Cold.as_str(), "cold");
        assert_eq!(ComfortIndex::Pleasant.as_str(), "pleasant");
    }
}
