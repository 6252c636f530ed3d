use serde::{Deserialize, Serialize};

/// One city's pollutant snapshot. Missing numeric fields read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CityReading {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub pm25: f64,
    #[serde(default)]
    pub o3: f64,
}

impl CityReading {
    pub fn new(name: impl Into<String>, pm10: f64, pm25: f64, o3: f64) -> Self {
        Self {
            name: Some(name.into()),
            pm10,
            pm25,
            o3,
        }
    }

    /// City name, `None` when absent or empty.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

pub fn sample_cities() -> Vec<CityReading> {
    vec![
        CityReading::new("Seoul", 45.0, 22.0, 0.03),
        CityReading::new("Busan", 38.0, 18.0, 0.02),
        CityReading::new("Incheon", 51.0, 26.0, 0.04),
        CityReading::new("Daegu", 42.0, 20.0, 0.03),
        CityReading::new("Gwangju", 40.0, 19.0, 0.02),
    ]
}
