use airq_core::Parameters;
use serde::Serialize;

pub const THRESHOLD_PARAM: &str = "threshold";
pub const PM10_WEIGHT_PARAM: &str = "pm10_weight";
pub const PM25_WEIGHT_PARAM: &str = "pm25_weight";

/// A range input bound to one scoring parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

pub fn controls(params: &Parameters) -> [SliderSpec; 3] {
    [
        SliderSpec {
            id: THRESHOLD_PARAM,
            label: "Threshold",
            min: 20.0,
            max: 80.0,
            step: 1.0,
            value: params.threshold,
        },
        SliderSpec {
            id: PM10_WEIGHT_PARAM,
            label: "PM10 weight",
            min: 0.0,
            max: 1.0,
            step: 0.1,
            value: params.pm10_weight,
        },
        SliderSpec {
            id: PM25_WEIGHT_PARAM,
            label: "PM2.5 weight",
            min: 0.0,
            max: 1.0,
            step: 0.1,
            value: params.pm25_weight,
        },
    ]
}
