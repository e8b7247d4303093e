use crate::core::rainwater::supplied_storage;
use crate::core::tables::{Choice, CostTables, HvacPipingMaterial, HvacPumpType, HvacTankType};
use crate::core::validators;
use crate::domain::model::{
    round_currency, round_tenth, Breakdown, CalculatorResponse, CostRange, HvacBreakdown,
    HvacRequest, SystemKind,
};
use crate::domain::ports::Estimate;
use crate::utils::validation::Violation;

const DAYS_PER_YEAR: f64 = 365.0;
/// Default storage holds one week of average daily production.
const STORAGE_DAYS: f64 = 7.0;

/// Prices an HVAC condensate recovery system using the built-in tables.
pub fn estimate_hvac(request: &HvacRequest) -> CalculatorResponse {
    estimate_hvac_with(request, CostTables::builtin())
}

pub fn estimate_hvac_with(request: &HvacRequest, tables: &CostTables) -> CalculatorResponse {
    let t = &tables.hvac;

    let piping = HvacPipingMaterial::resolve(request.piping_material.as_deref());
    let tank = HvacTankType::resolve(request.tank_type.as_deref());
    let pump = HvacPumpType::resolve(request.pump_type.as_deref());

    let total_condensate = request.num_units
        * request.tons_per_unit
        * t.condensate_gal_per_ton_day
        * request.days_per_year;
    let tank_size = supplied_storage(request.storage_gallons).unwrap_or_else(|| {
        t.tank_bounds
            .clamp(total_condensate / DAYS_PER_YEAR * STORAGE_DAYS)
    });

    let piping_cost = t
        .piping
        .get(piping)
        .per_foot()
        .scale(request.piping_length_feet);

    let tank_cost = t.tanks.get(tank).cost_for(tank_size);

    let mut filter_cost = t.filtration.sediment_filter;
    if request.potable {
        filter_cost += t.filtration.carbon_filter_optional + t.filtration.uv_if_potable;
    }

    let pump_cost = t.pumps.get(pump).installed();

    let misc_cost: CostRange = [
        t.misc.mounting_brackets_electrical,
        t.misc.valves_unions_overflow,
        t.misc.permitting_plumbing_tie_in,
    ]
    .into_iter()
    .sum();

    let hvac_unit_cost = CostRange::point(request.num_units * t.unit_connection_cost);

    let total = piping_cost + tank_cost + filter_cost + pump_cost + misc_cost + hvac_unit_cost;

    tracing::debug!(
        piping = piping.key(),
        tank = tank.key(),
        pump = pump.key(),
        total_condensate,
        tank_size,
        "HVAC estimate: {:.2}..{:.2}",
        total.min,
        total.max
    );

    let breakdown = HvacBreakdown {
        tank_cost: round_currency(tank_cost.average()),
        piping_cost: round_currency(piping_cost.average()),
        filter_cost: round_currency(filter_cost.average()),
        pump_cost: round_currency(pump_cost.average()),
        hvac_unit_cost: round_currency(hvac_unit_cost.min),
        misc_cost: round_currency(misc_cost.average()),
        total: round_currency(total.average()),
    };

    CalculatorResponse {
        cost_range_min: round_currency(total.min),
        cost_range_max: round_currency(total.max),
        annual_water_collection: round_tenth(total_condensate),
        tank_size: round_tenth(tank_size),
        breakdown: Breakdown::Hvac(breakdown),
    }
}

impl Estimate for HvacRequest {
    fn system(&self) -> SystemKind {
        SystemKind::Hvac
    }

    fn estimate_with(&self, tables: &CostTables) -> CalculatorResponse {
        estimate_hvac_with(self, tables)
    }

    fn violations(&self) -> Vec<Violation> {
        validators::validate_hvac(self)
    }
}
