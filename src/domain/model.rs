use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A plausible cost interval for one component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub const ZERO: CostRange = CostRange { min: 0.0, max: 0.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Same value on both bounds.
    pub const fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

impl std::ops::Add for CostRange {
    type Output = CostRange;

    fn add(self, rhs: CostRange) -> CostRange {
        CostRange {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

impl std::ops::AddAssign for CostRange {
    fn add_assign(&mut self, rhs: CostRange) {
        self.min += rhs.min;
        self.max += rhs.max;
    }
}

impl std::iter::Sum for CostRange {
    fn sum<I: Iterator<Item = CostRange>>(iter: I) -> CostRange {
        iter.fold(CostRange::ZERO, |acc, r| acc + r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    Rainwater,
    Hvac,
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemKind::Rainwater => write!(f, "rainwater"),
            SystemKind::Hvac => write!(f, "hvac"),
        }
    }
}

// 缺少的數值欄位以 NaN 表示，交由驗證器回報 MissingField
fn missing() -> f64 {
    f64::NAN
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainwaterRequest {
    #[serde(default = "missing")]
    pub roof_area_sqft: f64,
    #[serde(default = "missing")]
    pub annual_rainfall_inches: f64,
    #[serde(default = "missing")]
    pub piping_length_feet: f64,
    #[serde(default)]
    pub potable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gallons: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gutter_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piping_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_size: Option<String>,
    #[serde(default)]
    pub include_excavation: bool,
    #[serde(default = "default_true")]
    pub include_pressure_tank: bool,
}

impl RainwaterRequest {
    pub fn new(roof_area_sqft: f64, annual_rainfall_inches: f64, piping_length_feet: f64) -> Self {
        Self {
            roof_area_sqft,
            annual_rainfall_inches,
            piping_length_feet,
            potable: false,
            storage_gallons: None,
            roof_type: None,
            gutter_material: None,
            piping_material: None,
            tank_material: None,
            pump_size: None,
            include_excavation: false,
            include_pressure_tank: true,
        }
    }

    pub fn potable(mut self, potable: bool) -> Self {
        self.potable = potable;
        self
    }

    pub fn with_storage_gallons(mut self, gallons: f64) -> Self {
        self.storage_gallons = Some(gallons);
        self
    }

    pub fn with_roof_type(mut self, key: &str) -> Self {
        self.roof_type = Some(key.to_string());
        self
    }

    pub fn with_gutter_material(mut self, key: &str) -> Self {
        self.gutter_material = Some(key.to_string());
        self
    }

    pub fn with_piping_material(mut self, key: &str) -> Self {
        self.piping_material = Some(key.to_string());
        self
    }

    pub fn with_tank_material(mut self, key: &str) -> Self {
        self.tank_material = Some(key.to_string());
        self
    }

    pub fn with_pump_size(mut self, key: &str) -> Self {
        self.pump_size = Some(key.to_string());
        self
    }

    pub fn include_excavation(mut self, include: bool) -> Self {
        self.include_excavation = include;
        self
    }

    pub fn include_pressure_tank(mut self, include: bool) -> Self {
        self.include_pressure_tank = include;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HvacRequest {
    #[serde(default = "missing")]
    pub num_units: f64,
    #[serde(default = "missing")]
    pub tons_per_unit: f64,
    #[serde(default = "missing")]
    pub days_per_year: f64,
    #[serde(default = "missing")]
    pub piping_length_feet: f64,
    #[serde(default)]
    pub potable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gallons: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piping_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_type: Option<String>,
}

impl HvacRequest {
    pub fn new(
        num_units: f64,
        tons_per_unit: f64,
        days_per_year: f64,
        piping_length_feet: f64,
    ) -> Self {
        Self {
            num_units,
            tons_per_unit,
            days_per_year,
            piping_length_feet,
            potable: false,
            storage_gallons: None,
            piping_material: None,
            tank_type: None,
            pump_type: None,
        }
    }

    pub fn potable(mut self, potable: bool) -> Self {
        self.potable = potable;
        self
    }

    pub fn with_storage_gallons(mut self, gallons: f64) -> Self {
        self.storage_gallons = Some(gallons);
        self
    }

    pub fn with_piping_material(mut self, key: &str) -> Self {
        self.piping_material = Some(key.to_string());
        self
    }

    pub fn with_tank_type(mut self, key: &str) -> Self {
        self.tank_type = Some(key.to_string());
        self
    }

    pub fn with_pump_type(mut self, key: &str) -> Self {
        self.pump_type = Some(key.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum CalculatorRequest {
    Rainwater(RainwaterRequest),
    Hvac(HvacRequest),
}

impl CalculatorRequest {
    pub fn system(&self) -> SystemKind {
        match self {
            CalculatorRequest::Rainwater(_) => SystemKind::Rainwater,
            CalculatorRequest::Hvac(_) => SystemKind::Hvac,
        }
    }
}

impl From<RainwaterRequest> for CalculatorRequest {
    fn from(request: RainwaterRequest) -> Self {
        CalculatorRequest::Rainwater(request)
    }
}

impl From<HvacRequest> for CalculatorRequest {
    fn from(request: HvacRequest) -> Self {
        CalculatorRequest::Hvac(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainwaterBreakdown {
    #[serde(serialize_with = "serialize_amount")]
    pub gutter_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub tank_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub piping_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub filter_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub pump_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub pressure_tank_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub misc_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub excavation_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HvacBreakdown {
    #[serde(serialize_with = "serialize_amount")]
    pub tank_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub piping_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub filter_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub pump_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub hvac_unit_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub misc_cost: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
}

/// Per-component averages, shaped by system type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Breakdown {
    Rainwater(RainwaterBreakdown),
    Hvac(HvacBreakdown),
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        match self {
            Breakdown::Rainwater(b) => b.total,
            Breakdown::Hvac(b) => b.total,
        }
    }

    /// Line items in display order, ending with the total.
    pub fn line_items(&self) -> Vec<(&'static str, f64)> {
        match self {
            Breakdown::Rainwater(b) => vec![
                ("gutter_cost", b.gutter_cost),
                ("tank_cost", b.tank_cost),
                ("piping_cost", b.piping_cost),
                ("filter_cost", b.filter_cost),
                ("pump_cost", b.pump_cost),
                ("pressure_tank_cost", b.pressure_tank_cost),
                ("misc_cost", b.misc_cost),
                ("excavation_cost", b.excavation_cost),
                ("total", b.total),
            ],
            Breakdown::Hvac(b) => vec![
                ("tank_cost", b.tank_cost),
                ("piping_cost", b.piping_cost),
                ("filter_cost", b.filter_cost),
                ("pump_cost", b.pump_cost),
                ("hvac_unit_cost", b.hvac_unit_cost),
                ("misc_cost", b.misc_cost),
                ("total", b.total),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResponse {
    #[serde(serialize_with = "serialize_amount")]
    pub cost_range_min: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub cost_range_max: f64,
    pub annual_water_collection: f64,
    pub tank_size: f64,
    pub breakdown: Breakdown,
}

// 整數金額輸出為 JSON 整數
fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= EXACT_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Half-away-from-zero to a whole currency unit.
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_range_sum_and_average() {
        let total: CostRange = [CostRange::new(50.0, 150.0), CostRange::new(20.0, 50.0)]
            .into_iter()
            .sum();
        assert_eq!(total, CostRange::new(70.0, 200.0));
        assert_eq!(total.average(), 135.0);
        assert_eq!(CostRange::new(0.6, 1.0).scale(1000.0).min, 600.0);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_currency(2.5), 3.0);
        assert_eq!(round_currency(-2.5), -3.0);
        assert_eq!(round_tenth(33891.24), 33891.2);
        assert_eq!(round_tenth(1.25), 1.3);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: CalculatorRequest = serde_json::from_value(serde_json::json!({
            "system": "rainwater",
            "roof_area_sqft": 1500,
            "annual_rainfall_inches": 20,
            "piping_length_feet": 40
        }))
        .unwrap();

        let CalculatorRequest::Rainwater(rain) = request else {
            panic!("expected rainwater request");
        };
        assert_eq!(rain.roof_area_sqft, 1500.0);
        assert!(rain.include_pressure_tank);
        assert!(!rain.include_excavation);
        assert!(rain.roof_type.is_none());
    }

    #[test]
    fn test_absent_required_field_becomes_nan() {
        let request: HvacRequest = serde_json::from_value(serde_json::json!({
            "num_units": 2,
            "tons_per_unit": 3,
            "piping_length_feet": 80
        }))
        .unwrap();
        assert!(request.days_per_year.is_nan());
    }

    #[test]
    fn test_breakdown_serializes_flat() {
        let breakdown = Breakdown::Hvac(HvacBreakdown {
            tank_cost: 425.0,
            piping_cost: 420.0,
            filter_cost: 100.0,
            pump_cost: 640.0,
            hvac_unit_cost: 150.0,
            misc_cost: 550.0,
            total: 2285.0,
        });
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["hvac_unit_cost"], 150);
        assert!(json.get("gutter_cost").is_none());
        assert_eq!(breakdown.line_items().last(), Some(&("total", 2285.0)));
    }
}
