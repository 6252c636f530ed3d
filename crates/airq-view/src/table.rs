use airq_core::{Assessment, Status};
use serde::Serialize;

pub const TABLE_COLUMNS: [&str; 6] = ["City", "PM10", "PM2.5", "O3", "Weighted score", "Status"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub pm10: f64,
    pub pm25: f64,
    pub o3: f64,
    pub score: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: [&'static str; 6],
    pub rows: Vec<TableRow>,
}

impl ResultTable {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let rows = assessment
            .results()
            .iter()
            .map(|result| TableRow {
                name: result.name.clone(),
                pm10: result.pm10,
                pm25: result.pm25,
                o3: result.o3,
                score: result.score,
                status: result.status,
            })
            .collect();
        Self {
            columns: TABLE_COLUMNS,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airq_core::{sample_cities, score_cities, Parameters};

    #[test]
    fn one_row_per_result_in_result_order() {
        let assessment = score_cities(&sample_cities(), &Parameters::default());
        let table = ResultTable::from_assessment(&assessment);
        assert_eq!(table.len(), assessment.len());
        let names = table
            .rows
            .iter()
            .map(|row| row.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Seoul", "Busan", "Incheon", "Daegu", "Gwangju"]);
    }

    #[test]
    fn rows_carry_ozone_and_status() {
        let assessment = score_cities(&sample_cities(), &Parameters::default());
        let table = ResultTable::from_assessment(&assessment);
        let incheon = table
            .rows
            .iter()
            .find(|row| row.name == "Incheon")
            .expect("incheon row");
        assert_eq!(incheon.o3, 0.04);
        assert_eq!(incheon.score, 41.0);
        assert_eq!(incheon.status, Status::Good);
    }
}
