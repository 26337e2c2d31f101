use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record as seen by clients: wire field name to value.
pub type FieldMap = Map<String, Value>;

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod sales {
    use super::*;

    /// Response body for reads: one field map per matched record.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesList {
        pub records: Vec<FieldMap>,
    }

    /// Response body for create, update and delete.
    ///
    /// `count` is the number of records created or affected. It is absent when
    /// the filter matched nothing (HTTP 404).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesMessage {
        pub message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub count: Option<u64>,
    }
}

pub mod dashboard {
    use super::*;

    /// A dashboard report: either computed data or an explicit "no data".
    ///
    /// Serialized as `{"status": "no_data"}` or
    /// `{"status": "data", "data": ...}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "status", content = "data", rename_all = "snake_case")]
    pub enum Report<T> {
        NoData,
        Data(T),
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ApplicationMeans {
        pub application: String,
        pub mean_sales: f64,
        pub mean_profit: f64,
        pub mean_quantity: Option<f64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ActivityShare {
        pub field_of_activity: String,
        pub total_sales: f64,
        /// Fraction of the grand total, in `[0, 1]`.
        pub share: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DoctorRanking {
        pub doctor_name: String,
        pub mean_sales: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ScatterPoint {
        pub product_name: String,
        pub discount: Option<f64>,
        pub profit: f64,
        pub quantity: Option<i32>,
    }

    /// Mean sales per state, indexed by field of activity.
    ///
    /// Points missing from a series are gaps: the state has no record for
    /// that field of activity.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct StackedSeries {
        pub categories: Vec<String>,
        pub series: Vec<StateSeries>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct StateSeries {
        pub state: String,
        pub points: Vec<SeriesPoint>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SeriesPoint {
        pub field_of_activity: String,
        pub mean_sales: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Summary {
        pub doctor_count: u64,
        pub product_count: u64,
        pub total_sales: f64,
        pub mean_profit: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Dashboard {
        pub application_means: Report<Vec<ApplicationMeans>>,
        pub activity_share: Report<Vec<ActivityShare>>,
        pub top_doctors: Report<Vec<DoctorRanking>>,
        pub product_scatter: Report<Vec<ScatterPoint>>,
        pub state_series: Report<StackedSeries>,
        pub summary: Summary,
    }
}
