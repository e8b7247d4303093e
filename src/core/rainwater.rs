use crate::core::tables::{
    Choice, CostTables, GutterMaterial, PipingMaterial, PumpSize, RainwaterTables, RoofType,
    TankMaterial,
};
use crate::core::validators;
use crate::domain::model::{
    round_currency, round_tenth, Breakdown, CalculatorResponse, CostRange, RainwaterBreakdown,
    RainwaterRequest, SystemKind,
};
use crate::domain::ports::Estimate;
use crate::utils::validation::Violation;

/// Prices a rooftop rainwater system using the built-in tables.
pub fn estimate_rainwater(request: &RainwaterRequest) -> CalculatorResponse {
    estimate_rainwater_with(request, CostTables::builtin())
}

pub fn estimate_rainwater_with(request: &RainwaterRequest, tables: &CostTables) -> CalculatorResponse {
    let t: &RainwaterTables = &tables.rainwater;

    let roof = RoofType::resolve(request.roof_type.as_deref());
    let gutter = GutterMaterial::resolve(request.gutter_material.as_deref());
    let piping = PipingMaterial::resolve(request.piping_material.as_deref());
    let tank = TankMaterial::resolve(request.tank_material.as_deref());
    let pump = PumpSize::resolve(request.pump_size.as_deref());

    let rainfall_gallons = request.roof_area_sqft
        * request.annual_rainfall_inches
        * t.gallons_per_sqft_inch
        * t.roof_efficiency.get(roof);
    let tank_size = supplied_storage(request.storage_gallons)
        .unwrap_or_else(|| t.tank_bounds.clamp(rainfall_gallons));

    // 以正方形屋頂估算周長
    let gutter_length = request.roof_area_sqft.sqrt() * 4.0;
    let gutter_cost = t.gutters.get(gutter).per_foot().scale(gutter_length);

    let piping_cost = t
        .piping
        .get(piping)
        .per_foot()
        .scale(request.piping_length_feet);

    let tank_cost = t.tanks.get(tank).scale(tank_size);

    let filtration = &t.filtration;
    let mut filter_cost: CostRange = [
        filtration.sediment_housing,
        filtration.sediment_cartridge,
        filtration.first_flush_diverter,
    ]
    .into_iter()
    .sum();
    if request.potable {
        filter_cost += filtration.uv_disinfection + filtration.carbon_filter;
    }

    let mut pump_cost = t.pumps.get(pump).installed();
    if request.include_pressure_tank {
        pump_cost += t.pressure_tank;
    }

    let excavation_cost = if request.include_excavation {
        t.misc.excavation_underground
    } else {
        CostRange::ZERO
    };
    let misc_cost =
        t.misc.valves_unions_brackets_electrical + t.misc.permitting_inspection + excavation_cost;

    let total = gutter_cost + piping_cost + tank_cost + filter_cost + pump_cost + misc_cost;

    tracing::debug!(
        roof = roof.key(),
        gutter = gutter.key(),
        piping = piping.key(),
        tank = tank.key(),
        pump = pump.key(),
        rainfall_gallons,
        tank_size,
        gutter_length,
        "Rainwater estimate: {:.2}..{:.2}",
        total.min,
        total.max
    );

    let pressure_tank_cost = if request.include_pressure_tank {
        round_currency(t.pressure_tank.average())
    } else {
        0.0
    };

    let breakdown = RainwaterBreakdown {
        gutter_cost: round_currency(gutter_cost.average()),
        tank_cost: round_currency(tank_cost.average()),
        piping_cost: round_currency(piping_cost.average()),
        filter_cost: round_currency(filter_cost.average()),
        pump_cost: round_currency(pump_cost.average()),
        pressure_tank_cost,
        // 開挖費用另列一項，但仍計入總額
        misc_cost: round_currency(misc_cost.average() - excavation_cost.average()),
        excavation_cost: round_currency(excavation_cost.average()),
        total: round_currency(total.average()),
    };

    CalculatorResponse {
        cost_range_min: round_currency(total.min),
        cost_range_max: round_currency(total.max),
        annual_water_collection: round_tenth(rainfall_gallons),
        tank_size: round_tenth(tank_size),
        breakdown: Breakdown::Rainwater(breakdown),
    }
}

/// An explicit tank size counts only when it is non-zero and a number.
pub(crate) fn supplied_storage(storage_gallons: Option<f64>) -> Option<f64> {
    storage_gallons.filter(|gallons| *gallons != 0.0 && !gallons.is_nan())
}

impl Estimate for RainwaterRequest {
    fn system(&self) -> SystemKind {
        SystemKind::Rainwater
    }

    fn estimate_with(&self, tables: &CostTables) -> CalculatorResponse {
        estimate_rainwater_with(self, tables)
    }

    fn violations(&self) -> Vec<Violation> {
        validators::validate_rainwater(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(response: &CalculatorResponse) -> &RainwaterBreakdown {
        match &response.breakdown {
            Breakdown::Rainwater(b) => b,
            Breakdown::Hvac(_) => panic!("expected rainwater breakdown"),
        }
    }

    #[test]
    fn test_default_selections() {
        let response = estimate_rainwater(&RainwaterRequest::new(2000.0, 32.0, 100.0));

        assert!((response.annual_water_collection - 33891.2).abs() < 1e-6);
        assert_eq!(response.tank_size, 5000.0);
        assert_eq!(response.cost_range_min, 7235.0);
        assert_eq!(response.cost_range_max, 13416.0);

        let b = breakdown(&response);
        assert_eq!(b.gutter_cost, 2326.0);
        assert_eq!(b.piping_cost, 850.0);
        assert_eq!(b.tank_cost, 4000.0);
        assert_eq!(b.filter_cost, 200.0);
        assert_eq!(b.pump_cost, 2250.0);
        assert_eq!(b.pressure_tank_cost, 350.0);
        assert_eq!(b.misc_cost, 700.0);
        assert_eq!(b.excavation_cost, 0.0);
        assert_eq!(b.total, 10326.0);
    }

    #[test]
    fn test_potable_adds_uv_and_carbon() {
        let response =
            estimate_rainwater(&RainwaterRequest::new(2000.0, 32.0, 100.0).potable(true));
        // (100 + 950 + 300 + 1500) / 2
        assert_eq!(breakdown(&response).filter_cost, 1425.0);
        assert_eq!(response.cost_range_min, 7235.0 + 950.0);
        assert_eq!(response.cost_range_max, 13416.0 + 1500.0);
    }

    #[test]
    fn test_excavation_is_reported_separately() {
        let response = estimate_rainwater(
            &RainwaterRequest::new(2000.0, 32.0, 100.0).include_excavation(true),
        );
        let b = breakdown(&response);
        assert_eq!(b.misc_cost, 700.0);
        assert_eq!(b.excavation_cost, 3000.0);
        assert_eq!(response.cost_range_min, 7235.0 + 1000.0);
        assert_eq!(response.cost_range_max, 13416.0 + 5000.0);
        assert_eq!(b.total, 10326.0 + 3000.0);
    }

    #[test]
    fn test_without_pressure_tank() {
        let response = estimate_rainwater(
            &RainwaterRequest::new(2000.0, 32.0, 100.0).include_pressure_tank(false),
        );
        let b = breakdown(&response);
        assert_eq!(b.pressure_tank_cost, 0.0);
        assert_eq!(b.pump_cost, 1900.0);
        assert_eq!(response.cost_range_min, 7235.0 - 200.0);
    }

    #[test]
    fn test_tank_clamps() {
        let small = estimate_rainwater(&RainwaterRequest::new(400.0, 2.0, 10.0).with_roof_type("metal"));
        assert!((small.annual_water_collection - 448.6).abs() < 1e-6);
        assert_eq!(small.tank_size, 1000.0);

        let mid = estimate_rainwater(&RainwaterRequest::new(1000.0, 4.0, 10.0).with_roof_type("metal"));
        assert!((mid.annual_water_collection - 2242.8).abs() < 1e-6);
        assert!((mid.tank_size - 2242.8).abs() < 1e-6);
    }

    #[test]
    fn test_storage_override_is_echoed() {
        let response = estimate_rainwater(
            &RainwaterRequest::new(2000.0, 32.0, 100.0).with_storage_gallons(2500.04),
        );
        assert_eq!(response.tank_size, 2500.0);
        // poly tank: 2500.04 * 0.6 .. 2500.04 * 1.0
        assert_eq!(breakdown(&response).tank_cost, 2000.0);
    }

    #[test]
    fn test_zero_storage_falls_back_to_computed_size() {
        let response = estimate_rainwater(
            &RainwaterRequest::new(2000.0, 32.0, 100.0).with_storage_gallons(0.0),
        );
        assert_eq!(response.tank_size, 5000.0);
    }

    #[test]
    fn test_unknown_materials_match_defaults() {
        let defaults = estimate_rainwater(&RainwaterRequest::new(1200.0, 18.0, 60.0));
        let unknown = estimate_rainwater(
            &RainwaterRequest::new(1200.0, 18.0, 60.0)
                .with_roof_type("unobtainium")
                .with_gutter_material("gold")
                .with_piping_material("bamboo")
                .with_tank_material("balloon")
                .with_pump_size("jet_engine"),
        );
        assert_eq!(defaults, unknown);
    }

    #[test]
    fn test_premium_selections() {
        let response = estimate_rainwater(
            &RainwaterRequest::new(1600.0, 10.0, 50.0)
                .with_roof_type("tile")
                .with_gutter_material("galvanized_steel")
                .with_piping_material("copper")
                .with_tank_material("concrete_underground")
                .with_pump_size("small_booster"),
        );
        let b = breakdown(&response);
        // sqrt(1600) * 4 = 160 ft at 12..20 per ft
        assert_eq!(b.gutter_cost, 2560.0);
        // 50 ft at 10.75..17.75 per ft, 712.5 rounds away from zero
        assert_eq!(b.piping_cost, 713.0);
        // 1600 * 10 * 0.623 * 0.8 = 7974.4 -> clamped to 5000 gallons at 2.5..5.0
        assert_eq!(response.tank_size, 5000.0);
        assert_eq!(b.tank_cost, 18750.0);
        assert_eq!(b.pump_cost, 1550.0);
    }

    #[test]
    fn test_nan_input_propagates() {
        let response = estimate_rainwater(&RainwaterRequest::new(f64::NAN, 30.0, 10.0));
        assert!(response.annual_water_collection.is_nan());
        assert!(response.tank_size.is_nan());
        assert!(response.cost_range_min.is_nan());
    }
}
