use airq_core::{CityResult, Status};
use serde::Serialize;

pub const PM10_COLOR: &str = "#636efa";
pub const PM25_COLOR: &str = "#ef553b";

pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::Good => "green",
        Status::Moderate => "yellow",
        Status::Bad => "red",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// One bar per series, side by side within each category.
    Grouped,
    Single,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub category: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub points: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub id: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub mode: BarMode,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub legend: Vec<LegendEntry>,
}

impl BarChart {
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.points.iter())
            .map(|point| point.value)
            .fold(0.0, f64::max)
    }

    pub fn bar_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }
}

fn categories(results: &[CityResult]) -> Vec<String> {
    results.iter().map(|result| result.name.clone()).collect()
}

fn series(
    name: &str,
    results: &[CityResult],
    value: impl Fn(&CityResult) -> f64,
    color: impl Fn(&CityResult) -> &'static str,
) -> BarSeries {
    BarSeries {
        name: name.to_string(),
        points: results
            .iter()
            .map(|result| BarPoint {
                category: result.name.clone(),
                value: value(result),
                color: color(result),
            })
            .collect(),
    }
}

/// PM10 and PM2.5 side by side for every city.
pub fn pollutant_chart(results: &[CityResult]) -> BarChart {
    BarChart {
        id: "pollutant-chart",
        title: "Particulate matter by city",
        y_label: "Concentration",
        mode: BarMode::Grouped,
        categories: categories(results),
        series: vec![
            series("PM10", results, |r| r.pm10, |_| PM10_COLOR),
            series("PM2.5", results, |r| r.pm25, |_| PM25_COLOR),
        ],
        legend: vec![
            LegendEntry {
                label: "PM10",
                color: PM10_COLOR,
            },
            LegendEntry {
                label: "PM2.5",
                color: PM25_COLOR,
            },
        ],
    }
}

/// Weighted score per city, each bar coloured by its status.
pub fn score_chart(results: &[CityResult]) -> BarChart {
    BarChart {
        id: "score-chart",
        title: "Weighted air-quality score by city",
        y_label: "Weighted score",
        mode: BarMode::Single,
        categories: categories(results),
        series: vec![series(
            "Weighted score",
            results,
            |r| r.score,
            |r| status_color(r.status),
        )],
        legend: Status::all()
            .into_iter()
            .map(|status| LegendEntry {
                label: status.label(),
                color: status_color(status),
            })
            .collect(),
    }
}
