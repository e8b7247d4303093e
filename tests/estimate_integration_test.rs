use harvest_estimator::app::report::{self, EstimateReport, OutputFormat};
use harvest_estimator::{
    estimate_hvac, estimate_rainwater, Breakdown, CalculatorRequest, CalculatorResponse,
    EstimatorEngine, EstimatorError, HvacRequest, RainwaterRequest, SystemKind,
};

#[test]
fn test_rainwater_reference_estimate() {
    let engine = EstimatorEngine::builtin();
    let request: CalculatorRequest = RainwaterRequest::new(2000.0, 32.0, 100.0).into();

    let response = engine.run(&request).unwrap();

    assert_eq!(response.cost_range_min, 7235.0);
    assert_eq!(response.cost_range_max, 13416.0);
    assert_eq!(response.tank_size, 5000.0);
    assert!((response.annual_water_collection - 33891.2).abs() < 1e-6);
    assert_eq!(response.breakdown.total(), 10326.0);
    assert!(matches!(response.breakdown, Breakdown::Rainwater(_)));
}

#[test]
fn test_hvac_reference_estimate() {
    let engine = EstimatorEngine::builtin();
    let request: CalculatorRequest = HvacRequest::new(2.0, 3.0, 200.0, 80.0).into();

    let response = engine.run(&request).unwrap();

    assert_eq!(response.cost_range_min, 1330.0);
    assert_eq!(response.cost_range_max, 3240.0);
    assert_eq!(response.annual_water_collection, 3600.0);
    assert_eq!(response.tank_size, 100.0);
    assert_eq!(response.breakdown.total(), 2285.0);
    assert!(matches!(response.breakdown, Breakdown::Hvac(_)));
}

#[test]
fn test_engine_matches_free_functions() {
    let engine = EstimatorEngine::builtin();
    let rain = RainwaterRequest::new(1450.0, 41.0, 75.0)
        .potable(true)
        .with_tank_material("fiberglass");
    let hvac = HvacRequest::new(5.0, 4.0, 250.0, 120.0).with_pump_type("sump_transfer");

    assert_eq!(engine.estimate(&rain), estimate_rainwater(&rain));
    assert_eq!(engine.estimate(&hvac), estimate_hvac(&hvac));
}

#[test]
fn test_run_reports_every_violation() {
    let engine = EstimatorEngine::builtin();
    let request = RainwaterRequest::new(0.0, -3.0, 50.0).with_storage_gallons(-10.0);

    match engine.run(&request) {
        Err(EstimatorError::ValidationError { violations }) => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
            assert_eq!(
                fields,
                vec!["roof_area_sqft", "annual_rainfall_inches", "storage_gallons"]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_request_from_json() {
    let json = r#"{
        "system": "hvac",
        "num_units": 3,
        "tons_per_unit": 2.5,
        "days_per_year": 180,
        "piping_length_feet": 45,
        "tank_type": "indoor_sump"
    }"#;

    let request: CalculatorRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.system(), SystemKind::Hvac);

    let engine = EstimatorEngine::builtin();
    let response = engine.run(&request).unwrap();
    // 3 * 2.5 * 3 * 180 = 4050 gallons a year
    assert_eq!(response.annual_water_collection, 4050.0);
}

#[test]
fn test_missing_json_field_is_flagged() {
    let json = r#"{ "system": "rainwater", "annual_rainfall_inches": 30, "piping_length_feet": 20 }"#;

    let request: CalculatorRequest = serde_json::from_str(json).unwrap();
    let err = EstimatorEngine::builtin().run(&request).unwrap_err();

    assert!(err.to_string().contains("Roof area is required"));
}

fn assert_whole_amounts(response: &CalculatorResponse) {
    let mut amounts = response.breakdown.line_items();
    amounts.push(("cost_range_min", response.cost_range_min));
    amounts.push(("cost_range_max", response.cost_range_max));

    for (item, amount) in amounts {
        assert!(amount >= 0.0, "{} is negative: {}", item, amount);
        assert_eq!(amount.fract(), 0.0, "{} is not a whole amount: {}", item, amount);
    }
}

#[test]
fn test_cost_range_properties_hold_across_inputs() {
    let engine = EstimatorEngine::builtin();
    let roofs = ["asphalt_shingles", "metal", "tile", "metal"];
    let tanks = [
        "polyethylene_above_ground",
        "fiberglass",
        "concrete_underground",
        "fiberglass",
    ];
    let mut floored = 0;

    for (i, area) in [150.0, 900.0, 2400.0, 7800.0].iter().enumerate() {
        for rainfall in [4.0, 19.5, 48.0] {
            let request = RainwaterRequest::new(*area, rainfall, 30.0 + i as f64 * 40.0)
                .with_roof_type(roofs[i])
                .with_tank_material(tanks[i])
                .potable(i % 2 == 0)
                .include_excavation(i % 3 == 0);
            let response = engine.run(&request).unwrap();

            assert!(response.cost_range_min <= response.cost_range_max);
            assert!(response.breakdown.total() >= response.cost_range_min);
            assert!(response.breakdown.total() <= response.cost_range_max);
            assert_whole_amounts(&response);

            if response.annual_water_collection < 1000.0 {
                assert_eq!(response.tank_size, 1000.0);
                floored += 1;
            } else {
                assert!((1000.0..=5000.0).contains(&response.tank_size));
            }
        }
    }

    // 150 sqft at 4 in collects about 318 gallons
    assert_eq!(floored, 1);

    for units in [1.0, 4.0, 12.0] {
        for days in [1.0, 120.0, 365.0] {
            let request = HvacRequest::new(units, 3.5, days, 60.0).potable(units > 2.0);
            let response = engine.run(&request).unwrap();

            assert!(response.cost_range_min <= response.cost_range_max);
            assert!(response.breakdown.total() >= response.cost_range_min);
            assert!(response.breakdown.total() <= response.cost_range_max);
            assert_whole_amounts(&response);

            let weekly = response.annual_water_collection / 365.0 * 7.0;
            if weekly < 100.0 {
                assert_eq!(response.tank_size, 100.0);
                floored += 1;
            } else {
                assert!((100.0..=2000.0).contains(&response.tank_size));
            }
        }
    }

    // every single-day run, 1 unit for 120 or 365 days, 4 units for 120 days
    assert_eq!(floored, 1 + 6);
}

#[test]
fn test_render_formats() {
    let response = estimate_hvac(&HvacRequest::new(2.0, 3.0, 200.0, 80.0));
    let reports = vec![
        EstimateReport::new(SystemKind::Hvac, "built-in", response.clone()).for_scenario("a"),
        EstimateReport::new(SystemKind::Hvac, "built-in", response).for_scenario("b"),
    ];

    let json: serde_json::Value =
        serde_json::from_str(&report::render(&reports, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["scenario"], "b");
    assert_eq!(json[0]["response"]["breakdown"]["hvac_unit_cost"], 150.0);

    let tsv = report::render(&reports, OutputFormat::Tsv).unwrap();
    let mut lines = tsv.lines();
    assert_eq!(lines.next(), Some("scenario\tsystem\titem\tamount"));
    assert!(tsv.contains("a\thvac\ttotal\t2285"));
    assert!(tsv.contains("b\thvac\tcost_range_max\t3240"));
}

#[test]
fn test_json_amounts_are_integers() {
    let response = estimate_hvac(&HvacRequest::new(2.0, 3.0, 200.0, 80.0));
    let report = EstimateReport::new(SystemKind::Hvac, "built-in", response.clone());

    let json = report::render(&[report], OutputFormat::Json).unwrap();
    assert!(json.contains("\"cost_range_min\": 1330,"));
    assert!(json.contains("\"hvac_unit_cost\": 150,"));
    assert!(json.contains("\"tank_size\": 100.0"));

    let compact = serde_json::to_string(&response).unwrap();
    let parsed: CalculatorResponse = serde_json::from_str(&compact).unwrap();
    assert_eq!(parsed, response);
}
