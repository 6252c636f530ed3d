use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reading::CityReading;

pub const NO_DATA_MESSAGE: &str = "no data to process";

/// Scores above `threshold * BAD_FACTOR` are classified as bad.
pub const BAD_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub threshold: f64,
    pub pm10_weight: f64,
    pub pm25_weight: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            pm10_weight: 0.6,
            pm25_weight: 0.4,
        }
    }
}

impl Parameters {
    /// Unrounded weighted score. Ozone does not take part.
    pub fn weighted_score(&self, reading: &CityReading) -> f64 {
        reading.pm10 * self.pm10_weight + reading.pm25 * self.pm25_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Good,
    Moderate,
    Bad,
}

impl Status {
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score > threshold * BAD_FACTOR {
            Self::Bad
        } else if score > threshold {
            Self::Moderate
        } else {
            Self::Good
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Bad => "bad",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Bad => "Bad",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Good, Self::Moderate, Self::Bad]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityResult {
    pub name: String,
    pub pm10: f64,
    pub pm25: f64,
    pub o3: f64,
    pub score: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assessment {
    NoData { message: &'static str },
    Scored { results: Vec<CityResult> },
}

impl Assessment {
    pub fn results(&self) -> &[CityResult] {
        match self {
            Self::NoData { .. } => &[],
            Self::Scored { results } => results,
        }
    }

    pub fn len(&self) -> usize {
        self.results().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    pub fn get(&self, name: &str) -> Option<&CityResult> {
        self.results().iter().find(|result| result.name == name)
    }
}

/// Rounds the exact binary value to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse::<f64>().unwrap_or(value)
}

/// Scores every named reading. Results keep first-seen order; a repeated
/// name replaces the earlier entry in place.
pub fn score_cities(readings: &[CityReading], params: &Parameters) -> Assessment {
    if readings.is_empty() {
        return Assessment::NoData {
            message: NO_DATA_MESSAGE,
        };
    }

    let mut results: Vec<CityResult> = Vec::with_capacity(readings.len());
    for reading in readings {
        let Some(name) = reading.label() else {
            continue;
        };

        let weighted = params.weighted_score(reading);
        let result = CityResult {
            name: name.to_string(),
            pm10: reading.pm10,
            pm25: reading.pm25,
            o3: reading.o3,
            score: round2(weighted),
            status: Status::classify(weighted, params.threshold),
        };

        match results.iter_mut().find(|existing| existing.name == result.name) {
            Some(existing) => *existing = result,
            None => results.push(result),
        }
    }

    Assessment::Scored { results }
}
