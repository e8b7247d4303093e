//! Advisory request checks. The estimators never call these; callers decide
//! whether to block estimation on a non-empty list.

use crate::domain::model::{CalculatorRequest, HvacRequest, RainwaterRequest};
use crate::utils::validation::{
    check_optional_positive, check_positive, check_whole_number, check_within, Violation,
};

pub fn validate_rainwater(request: &RainwaterRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_positive(&mut violations, "roof_area_sqft", "Roof area", request.roof_area_sqft);
    check_positive(
        &mut violations,
        "annual_rainfall_inches",
        "Annual rainfall",
        request.annual_rainfall_inches,
    );
    check_positive(
        &mut violations,
        "piping_length_feet",
        "Piping length",
        request.piping_length_feet,
    );
    check_optional_positive(
        &mut violations,
        "storage_gallons",
        "Storage gallons",
        request.storage_gallons,
    );

    violations
}

pub fn validate_hvac(request: &HvacRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if check_positive(&mut violations, "num_units", "Number of units", request.num_units) {
        check_whole_number(&mut violations, "num_units", "Number of units", request.num_units);
    }
    check_positive(&mut violations, "tons_per_unit", "Tons per unit", request.tons_per_unit);
    check_within(
        &mut violations,
        "days_per_year",
        "Days per year",
        request.days_per_year,
        1.0,
        365.0,
    );
    check_positive(
        &mut violations,
        "piping_length_feet",
        "Piping length",
        request.piping_length_feet,
    );
    check_optional_positive(
        &mut violations,
        "storage_gallons",
        "Storage gallons",
        request.storage_gallons,
    );

    violations
}

pub fn validate_request(request: &CalculatorRequest) -> Vec<Violation> {
    match request {
        CalculatorRequest::Rainwater(rain) => validate_rainwater(rain),
        CalculatorRequest::Hvac(hvac) => validate_hvac(hvac),
    }
}
