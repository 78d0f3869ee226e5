use serde::{Deserialize, Serialize};

/// One supplier row as computed by the backend pipeline.
///
/// The backend serializes its processed dataset records verbatim, so field
/// names on the wire are PascalCase column names. `failure_prob`,
/// `combined_score` and `distance_km` are derived server-side relative to
/// the selected distribution center; the client never computes or edits
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    #[serde(rename = "SupplierID")]
    pub supplier_id: String,
    #[serde(rename = "SupplierName")]
    pub supplier_name: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "LeadTimeDays")]
    pub lead_time_days: f64,
    #[serde(rename = "PastReliability")]
    pub past_reliability: f64,
    #[serde(rename = "Capacity")]
    pub capacity: f64,
    #[serde(rename = "WeatherRisk")]
    pub weather_risk: f64,
    #[serde(rename = "WarRisk")]
    pub war_risk: f64,
    #[serde(rename = "FailureProb")]
    pub failure_prob: f64,
    #[serde(rename = "CombinedScore")]
    pub combined_score: f64,
    #[serde(rename = "DistanceKM")]
    pub distance_km: f64,
}

/// A candidate distribution-center warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    #[serde(rename = "WarehouseID")]
    pub warehouse_id: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}
