use airq_core::{sample_cities, score_cities, Assessment, CityReading, Parameters};
use serde::Serialize;

use crate::chart::{pollutant_chart, score_chart, BarChart};
use crate::table::ResultTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    NoData {
        message: &'static str,
    },
    Ready {
        table: ResultTable,
        pollutant_chart: BarChart,
        score_chart: BarChart,
    },
}

impl DashboardView {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        match assessment {
            Assessment::NoData { message } => Self::NoData { message: *message },
            Assessment::Scored { results } => Self::Ready {
                table: ResultTable::from_assessment(assessment),
                pollutant_chart: pollutant_chart(results),
                score_chart: score_chart(results),
            },
        }
    }

    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            Self::NoData { .. } => None,
            Self::Ready { table, .. } => Some(table),
        }
    }
}

pub fn build_dashboard_from(readings: &[CityReading], params: &Parameters) -> DashboardView {
    DashboardView::from_assessment(&score_cities(readings, params))
}

/// Scores the built-in sample cities with `params`.
pub fn build_dashboard(params: &Parameters) -> DashboardView {
    build_dashboard_from(&sample_cities(), params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airq_core::NO_DATA_MESSAGE;

    #[test]
    fn sample_dashboard_has_five_rows_and_both_charts() {
        let view = build_dashboard(&Parameters::default());
        assert_eq!(view.table().expect("ready view").len(), 5);
        if let DashboardView::Ready {
            pollutant_chart,
            score_chart,
            ..
        } = &view
        {
            assert_eq!(pollutant_chart.categories.len(), 5);
            assert_eq!(score_chart.bar_count(), 5);
        }
    }

    #[test]
    fn empty_readings_give_no_data_view() {
        let view = build_dashboard_from(&[], &Parameters::default());
        assert_eq!(
            view,
            DashboardView::NoData {
                message: NO_DATA_MESSAGE
            }
        );
        assert!(view.table().is_none());
    }

    #[test]
    fn view_serializes_with_status_tag() {
        let value = serde_json::to_value(build_dashboard(&Parameters::default()))
            .expect("serialize view");
        assert_eq!(value["status"], "ready");
        assert_eq!(value["table"]["rows"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["score_chart"]["series"][0]["points"][0]["color"], "green");
    }
}
