//! Pricing constants for both harvesting systems.
//!
//! Every material or equipment choice is an enum variant; callers pass the
//! choice as a string key and [`Choice::resolve`] maps unknown or absent keys
//! to the category default instead of failing. Table structs are
//! `#[serde(default)]` so a TOML override file only needs the values it changes.

use crate::domain::model::CostRange;
use crate::domain::ports::TableSource;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_negative, validate_ordered, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A string-keyed choice within one pricing category.
pub trait Choice: Copy + Default + PartialEq + 'static {
    const CATEGORY: &'static str;
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.key() == key)
    }

    fn resolve(key: Option<&str>) -> Self {
        match key {
            None => Self::default(),
            Some(key) => Self::from_key(key).unwrap_or_else(|| {
                let fallback = Self::default();
                tracing::debug!(
                    "Unknown {} '{}', using default '{}'",
                    Self::CATEGORY,
                    key,
                    fallback.key()
                );
                fallback
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoofType {
    #[default]
    AsphaltShingles,
    Metal,
    Tile,
}

impl Choice for RoofType {
    const CATEGORY: &'static str = "roof_type";
    const ALL: &'static [Self] = &[RoofType::AsphaltShingles, RoofType::Metal, RoofType::Tile];

    fn key(self) -> &'static str {
        match self {
            RoofType::AsphaltShingles => "asphalt_shingles",
            RoofType::Metal => "metal",
            RoofType::Tile => "tile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GutterMaterial {
    Vinyl,
    #[default]
    Aluminum,
    GalvanizedSteel,
}

impl Choice for GutterMaterial {
    const CATEGORY: &'static str = "gutter_material";
    const ALL: &'static [Self] = &[
        GutterMaterial::Vinyl,
        GutterMaterial::Aluminum,
        GutterMaterial::GalvanizedSteel,
    ];

    fn key(self) -> &'static str {
        match self {
            GutterMaterial::Vinyl => "vinyl",
            GutterMaterial::Aluminum => "aluminum",
            GutterMaterial::GalvanizedSteel => "galvanized_steel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipingMaterial {
    #[default]
    Pvc,
    Hdpe,
    Copper,
}

impl Choice for PipingMaterial {
    const CATEGORY: &'static str = "piping_material";
    const ALL: &'static [Self] = &[PipingMaterial::Pvc, PipingMaterial::Hdpe, PipingMaterial::Copper];

    fn key(self) -> &'static str {
        match self {
            PipingMaterial::Pvc => "pvc",
            PipingMaterial::Hdpe => "hdpe",
            PipingMaterial::Copper => "copper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TankMaterial {
    #[default]
    PolyethyleneAboveGround,
    Fiberglass,
    ConcreteUnderground,
}

impl Choice for TankMaterial {
    const CATEGORY: &'static str = "tank_material";
    const ALL: &'static [Self] = &[
        TankMaterial::PolyethyleneAboveGround,
        TankMaterial::Fiberglass,
        TankMaterial::ConcreteUnderground,
    ];

    fn key(self) -> &'static str {
        match self {
            TankMaterial::PolyethyleneAboveGround => "polyethylene_above_ground",
            TankMaterial::Fiberglass => "fiberglass",
            TankMaterial::ConcreteUnderground => "concrete_underground",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PumpSize {
    SmallBooster,
    #[default]
    MidSizedWholeHouse,
}

impl Choice for PumpSize {
    const CATEGORY: &'static str = "pump_size";
    const ALL: &'static [Self] = &[PumpSize::SmallBooster, PumpSize::MidSizedWholeHouse];

    fn key(self) -> &'static str {
        match self {
            PumpSize::SmallBooster => "small_booster",
            PumpSize::MidSizedWholeHouse => "mid_sized_whole_house",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HvacPipingMaterial {
    #[default]
    PvcTubing,
    FlexibleCondensate,
    CopperRare,
}

impl Choice for HvacPipingMaterial {
    const CATEGORY: &'static str = "hvac piping_material";
    const ALL: &'static [Self] = &[
        HvacPipingMaterial::PvcTubing,
        HvacPipingMaterial::FlexibleCondensate,
        HvacPipingMaterial::CopperRare,
    ];

    fn key(self) -> &'static str {
        match self {
            HvacPipingMaterial::PvcTubing => "pvc_tubing",
            HvacPipingMaterial::FlexibleCondensate => "flexible_condensate",
            HvacPipingMaterial::CopperRare => "copper_rare",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HvacTankType {
    #[default]
    SmallPoly100To500,
    LargePoly1000Plus,
    IndoorSump,
}

impl Choice for HvacTankType {
    const CATEGORY: &'static str = "tank_type";
    const ALL: &'static [Self] = &[
        HvacTankType::SmallPoly100To500,
        HvacTankType::LargePoly1000Plus,
        HvacTankType::IndoorSump,
    ];

    fn key(self) -> &'static str {
        match self {
            HvacTankType::SmallPoly100To500 => "small_poly_100_500",
            HvacTankType::LargePoly1000Plus => "large_poly_1000_plus",
            HvacTankType::IndoorSump => "indoor_sump",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HvacPumpType {
    #[default]
    SmallCondensate,
    SumpTransfer,
}

impl Choice for HvacPumpType {
    const CATEGORY: &'static str = "pump_type";
    const ALL: &'static [Self] = &[HvacPumpType::SmallCondensate, HvacPumpType::SumpTransfer];

    fn key(self) -> &'static str {
        match self {
            HvacPumpType::SmallCondensate => "small_condensate",
            HvacPumpType::SumpTransfer => "sump_transfer",
        }
    }
}

/// Per-foot material and labor rates; `fittings` is a flat per-foot adder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearRate {
    pub material_min: f64,
    pub material_max: f64,
    pub labor_min: f64,
    pub labor_max: f64,
    #[serde(default)]
    pub fittings: f64,
}

impl LinearRate {
    const fn new(material_min: f64, material_max: f64, labor_min: f64, labor_max: f64) -> Self {
        Self {
            material_min,
            material_max,
            labor_min,
            labor_max,
            fittings: 0.0,
        }
    }

    const fn with_fittings(mut self, fittings: f64) -> Self {
        self.fittings = fittings;
        self
    }

    pub fn per_foot(&self) -> CostRange {
        CostRange::new(
            self.material_min + self.labor_min + self.fittings,
            self.material_max + self.labor_max + self.fittings,
        )
    }

    fn validate(&self, field: &str) -> Result<()> {
        validate_ordered(&format!("{}.material", field), self.material_min, self.material_max)?;
        validate_ordered(&format!("{}.labor", field), self.labor_min, self.labor_max)?;
        validate_non_negative(&format!("{}.fittings", field), self.fittings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PumpRate {
    pub pump_min: f64,
    pub pump_max: f64,
    pub install_min: f64,
    pub install_max: f64,
}

impl PumpRate {
    const fn new(pump_min: f64, pump_max: f64, install_min: f64, install_max: f64) -> Self {
        Self {
            pump_min,
            pump_max,
            install_min,
            install_max,
        }
    }

    /// Pump plus installation.
    pub fn installed(&self) -> CostRange {
        CostRange::new(
            self.pump_min + self.install_min,
            self.pump_max + self.install_max,
        )
    }

    fn validate(&self, field: &str) -> Result<()> {
        validate_ordered(&format!("{}.pump", field), self.pump_min, self.pump_max)?;
        validate_ordered(&format!("{}.install", field), self.install_min, self.install_max)
    }
}

/// HVAC tanks are priced either as a fixed unit or per gallon of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TankPricing {
    PerGallon {
        per_gallon_min: f64,
        per_gallon_max: f64,
    },
    Fixed {
        min: f64,
        max: f64,
    },
}

impl TankPricing {
    pub fn cost_for(&self, tank_size: f64) -> CostRange {
        match *self {
            TankPricing::PerGallon {
                per_gallon_min,
                per_gallon_max,
            } => CostRange::new(tank_size * per_gallon_min, tank_size * per_gallon_max),
            TankPricing::Fixed { min, max } => CostRange::new(min, max),
        }
    }

    fn validate(&self, field: &str) -> Result<()> {
        match *self {
            TankPricing::PerGallon {
                per_gallon_min,
                per_gallon_max,
            } => validate_ordered(field, per_gallon_min, per_gallon_max),
            TankPricing::Fixed { min, max } => validate_ordered(field, min, max),
        }
    }
}

/// Floor and ceiling applied to a computed tank size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GallonBounds {
    pub min: f64,
    pub max: f64,
}

impl GallonBounds {
    // NaN passes through untouched
    pub fn clamp(&self, gallons: f64) -> f64 {
        if gallons < self.min {
            self.min
        } else if gallons > self.max {
            self.max
        } else {
            gallons
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoofEfficiencyTable {
    pub asphalt_shingles: f64,
    pub metal: f64,
    pub tile: f64,
}

impl Default for RoofEfficiencyTable {
    fn default() -> Self {
        Self {
            asphalt_shingles: 0.85,
            metal: 0.90,
            tile: 0.80,
        }
    }
}

impl RoofEfficiencyTable {
    pub fn get(&self, roof: RoofType) -> f64 {
        match roof {
            RoofType::AsphaltShingles => self.asphalt_shingles,
            RoofType::Metal => self.metal,
            RoofType::Tile => self.tile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GutterTable {
    pub vinyl: LinearRate,
    pub aluminum: LinearRate,
    pub galvanized_steel: LinearRate,
}

impl Default for GutterTable {
    fn default() -> Self {
        Self {
            vinyl: LinearRate::new(3.0, 5.0, 4.0, 8.0),
            aluminum: LinearRate::new(5.0, 9.0, 4.0, 8.0),
            galvanized_steel: LinearRate::new(8.0, 12.0, 4.0, 8.0),
        }
    }
}

impl GutterTable {
    pub fn get(&self, material: GutterMaterial) -> &LinearRate {
        match material {
            GutterMaterial::Vinyl => &self.vinyl,
            GutterMaterial::Aluminum => &self.aluminum,
            GutterMaterial::GalvanizedSteel => &self.galvanized_steel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipingTable {
    pub pvc: LinearRate,
    pub hdpe: LinearRate,
    pub copper: LinearRate,
}

impl Default for PipingTable {
    fn default() -> Self {
        Self {
            pvc: LinearRate::new(1.50, 3.0, 3.0, 6.0).with_fittings(1.75),
            hdpe: LinearRate::new(2.0, 4.0, 3.0, 6.0).with_fittings(1.75),
            copper: LinearRate::new(6.0, 10.0, 3.0, 6.0).with_fittings(1.75),
        }
    }
}

impl PipingTable {
    pub fn get(&self, material: PipingMaterial) -> &LinearRate {
        match material {
            PipingMaterial::Pvc => &self.pvc,
            PipingMaterial::Hdpe => &self.hdpe,
            PipingMaterial::Copper => &self.copper,
        }
    }
}

/// Rainwater tank prices are per gallon of capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TankTable {
    pub polyethylene_above_ground: CostRange,
    pub fiberglass: CostRange,
    pub concrete_underground: CostRange,
}

impl Default for TankTable {
    fn default() -> Self {
        Self {
            polyethylene_above_ground: CostRange::new(0.60, 1.00),
            fiberglass: CostRange::new(1.50, 2.50),
            concrete_underground: CostRange::new(2.50, 5.00),
        }
    }
}

impl TankTable {
    pub fn get(&self, material: TankMaterial) -> &CostRange {
        match material {
            TankMaterial::PolyethyleneAboveGround => &self.polyethylene_above_ground,
            TankMaterial::Fiberglass => &self.fiberglass,
            TankMaterial::ConcreteUnderground => &self.concrete_underground,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltrationTable {
    pub sediment_housing: CostRange,
    pub sediment_cartridge: CostRange,
    pub carbon_filter: CostRange,
    pub uv_disinfection: CostRange,
    pub first_flush_diverter: CostRange,
}

impl Default for FiltrationTable {
    fn default() -> Self {
        Self {
            sediment_housing: CostRange::new(50.0, 150.0),
            sediment_cartridge: CostRange::new(20.0, 50.0),
            carbon_filter: CostRange::new(150.0, 300.0),
            uv_disinfection: CostRange::new(800.0, 1200.0),
            first_flush_diverter: CostRange::new(30.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PumpTable {
    pub small_booster: PumpRate,
    pub mid_sized_whole_house: PumpRate,
}

impl Default for PumpTable {
    fn default() -> Self {
        Self {
            small_booster: PumpRate::new(300.0, 600.0, 500.0, 1000.0),
            mid_sized_whole_house: PumpRate::new(800.0, 1500.0, 500.0, 1000.0),
        }
    }
}

impl PumpTable {
    pub fn get(&self, size: PumpSize) -> &PumpRate {
        match size {
            PumpSize::SmallBooster => &self.small_booster,
            PumpSize::MidSizedWholeHouse => &self.mid_sized_whole_house,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RainwaterMiscTable {
    pub valves_unions_brackets_electrical: CostRange,
    pub permitting_inspection: CostRange,
    pub excavation_underground: CostRange,
}

impl Default for RainwaterMiscTable {
    fn default() -> Self {
        Self {
            valves_unions_brackets_electrical: CostRange::new(300.0, 600.0),
            permitting_inspection: CostRange::new(100.0, 400.0),
            excavation_underground: CostRange::new(1000.0, 5000.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RainwaterTables {
    /// Gallons collected per square foot per inch of rain.
    pub gallons_per_sqft_inch: f64,
    pub tank_bounds: GallonBounds,
    pub roof_efficiency: RoofEfficiencyTable,
    pub gutters: GutterTable,
    pub piping: PipingTable,
    pub tanks: TankTable,
    pub filtration: FiltrationTable,
    pub pumps: PumpTable,
    pub pressure_tank: CostRange,
    pub misc: RainwaterMiscTable,
}

impl Default for RainwaterTables {
    fn default() -> Self {
        Self {
            gallons_per_sqft_inch: 0.623,
            tank_bounds: GallonBounds {
                min: 1000.0,
                max: 5000.0,
            },
            roof_efficiency: RoofEfficiencyTable::default(),
            gutters: GutterTable::default(),
            piping: PipingTable::default(),
            tanks: TankTable::default(),
            filtration: FiltrationTable::default(),
            pumps: PumpTable::default(),
            pressure_tank: CostRange::new(200.0, 500.0),
            misc: RainwaterMiscTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacPipingTable {
    pub pvc_tubing: LinearRate,
    pub flexible_condensate: LinearRate,
    pub copper_rare: LinearRate,
}

impl Default for HvacPipingTable {
    fn default() -> Self {
        Self {
            pvc_tubing: LinearRate::new(0.50, 1.50, 2.0, 4.0).with_fittings(1.25),
            flexible_condensate: LinearRate::new(0.70, 2.0, 2.0, 4.0).with_fittings(1.25),
            copper_rare: LinearRate::new(5.0, 8.0, 2.0, 4.0).with_fittings(1.25),
        }
    }
}

impl HvacPipingTable {
    pub fn get(&self, material: HvacPipingMaterial) -> &LinearRate {
        match material {
            HvacPipingMaterial::PvcTubing => &self.pvc_tubing,
            HvacPipingMaterial::FlexibleCondensate => &self.flexible_condensate,
            HvacPipingMaterial::CopperRare => &self.copper_rare,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacTankTable {
    pub small_poly_100_500: TankPricing,
    pub large_poly_1000_plus: TankPricing,
    pub indoor_sump: TankPricing,
}

impl Default for HvacTankTable {
    fn default() -> Self {
        Self {
            small_poly_100_500: TankPricing::Fixed {
                min: 150.0,
                max: 700.0,
            },
            large_poly_1000_plus: TankPricing::PerGallon {
                per_gallon_min: 0.70,
                per_gallon_max: 1.00,
            },
            indoor_sump: TankPricing::Fixed {
                min: 200.0,
                max: 500.0,
            },
        }
    }
}

impl HvacTankTable {
    pub fn get(&self, tank: HvacTankType) -> &TankPricing {
        match tank {
            HvacTankType::SmallPoly100To500 => &self.small_poly_100_500,
            HvacTankType::LargePoly1000Plus => &self.large_poly_1000_plus,
            HvacTankType::IndoorSump => &self.indoor_sump,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacFiltrationTable {
    pub sediment_filter: CostRange,
    pub carbon_filter_optional: CostRange,
    pub uv_if_potable: CostRange,
}

impl Default for HvacFiltrationTable {
    fn default() -> Self {
        Self {
            sediment_filter: CostRange::new(50.0, 150.0),
            carbon_filter_optional: CostRange::new(150.0, 300.0),
            uv_if_potable: CostRange::new(700.0, 1200.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacPumpTable {
    pub small_condensate: PumpRate,
    pub sump_transfer: PumpRate,
}

impl Default for HvacPumpTable {
    fn default() -> Self {
        Self {
            small_condensate: PumpRate::new(80.0, 200.0, 300.0, 700.0),
            sump_transfer: PumpRate::new(200.0, 500.0, 300.0, 700.0),
        }
    }
}

impl HvacPumpTable {
    pub fn get(&self, pump: HvacPumpType) -> &PumpRate {
        match pump {
            HvacPumpType::SmallCondensate => &self.small_condensate,
            HvacPumpType::SumpTransfer => &self.sump_transfer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacMiscTable {
    pub mounting_brackets_electrical: CostRange,
    pub valves_unions_overflow: CostRange,
    pub permitting_plumbing_tie_in: CostRange,
}

impl Default for HvacMiscTable {
    fn default() -> Self {
        Self {
            mounting_brackets_electrical: CostRange::new(150.0, 300.0),
            valves_unions_overflow: CostRange::new(100.0, 300.0),
            permitting_plumbing_tie_in: CostRange::new(50.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HvacTables {
    /// Condensate gallons per ton of cooling per operating day.
    pub condensate_gal_per_ton_day: f64,
    /// Flat connection charge per HVAC unit.
    pub unit_connection_cost: f64,
    pub tank_bounds: GallonBounds,
    pub piping: HvacPipingTable,
    pub tanks: HvacTankTable,
    pub filtration: HvacFiltrationTable,
    pub pumps: HvacPumpTable,
    pub misc: HvacMiscTable,
}

impl Default for HvacTables {
    fn default() -> Self {
        Self {
            condensate_gal_per_ton_day: 3.0,
            unit_connection_cost: 75.0,
            tank_bounds: GallonBounds {
                min: 100.0,
                max: 2000.0,
            },
            piping: HvacPipingTable::default(),
            tanks: HvacTankTable::default(),
            filtration: HvacFiltrationTable::default(),
            pumps: HvacPumpTable::default(),
            misc: HvacMiscTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostTables {
    pub rainwater: RainwaterTables,
    pub hvac: HvacTables,
}

impl CostTables {
    /// Process-wide built-in tables, created on first use.
    pub fn builtin() -> &'static CostTables {
        static BUILTIN: OnceLock<CostTables> = OnceLock::new();
        BUILTIN.get_or_init(CostTables::default)
    }
}

impl TableSource for CostTables {
    fn tables(&self) -> &CostTables {
        self
    }
}

fn validate_cost_range(field: &str, range: &CostRange) -> Result<()> {
    validate_ordered(field, range.min, range.max)
}

fn validate_positive_constant(field: &str, value: f64) -> Result<()> {
    if !(value > 0.0) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

impl Validate for RainwaterTables {
    fn validate(&self) -> Result<()> {
        validate_positive_constant("rainwater.gallons_per_sqft_inch", self.gallons_per_sqft_inch)?;
        validate_ordered("rainwater.tank_bounds", self.tank_bounds.min, self.tank_bounds.max)?;

        for roof in RoofType::ALL {
            let field = format!("rainwater.roof_efficiency.{}", roof.key());
            let efficiency = self.roof_efficiency.get(*roof);
            validate_positive_constant(&field, efficiency)?;
            validate_range(&field, efficiency, 0.0, 1.0)?;
        }
        for gutter in GutterMaterial::ALL {
            self.gutters
                .get(*gutter)
                .validate(&format!("rainwater.gutters.{}", gutter.key()))?;
        }
        for piping in PipingMaterial::ALL {
            self.piping
                .get(*piping)
                .validate(&format!("rainwater.piping.{}", piping.key()))?;
        }
        for tank in TankMaterial::ALL {
            validate_cost_range(&format!("rainwater.tanks.{}", tank.key()), self.tanks.get(*tank))?;
        }
        for pump in PumpSize::ALL {
            self.pumps
                .get(*pump)
                .validate(&format!("rainwater.pumps.{}", pump.key()))?;
        }

        let filtration = &self.filtration;
        validate_cost_range("rainwater.filtration.sediment_housing", &filtration.sediment_housing)?;
        validate_cost_range("rainwater.filtration.sediment_cartridge", &filtration.sediment_cartridge)?;
        validate_cost_range("rainwater.filtration.carbon_filter", &filtration.carbon_filter)?;
        validate_cost_range("rainwater.filtration.uv_disinfection", &filtration.uv_disinfection)?;
        validate_cost_range("rainwater.filtration.first_flush_diverter", &filtration.first_flush_diverter)?;

        validate_cost_range("rainwater.pressure_tank", &self.pressure_tank)?;

        let misc = &self.misc;
        validate_cost_range(
            "rainwater.misc.valves_unions_brackets_electrical",
            &misc.valves_unions_brackets_electrical,
        )?;
        validate_cost_range("rainwater.misc.permitting_inspection", &misc.permitting_inspection)?;
        validate_cost_range("rainwater.misc.excavation_underground", &misc.excavation_underground)
    }
}

impl Validate for HvacTables {
    fn validate(&self) -> Result<()> {
        validate_positive_constant("hvac.condensate_gal_per_ton_day", self.condensate_gal_per_ton_day)?;
        validate_non_negative("hvac.unit_connection_cost", self.unit_connection_cost)?;
        validate_ordered("hvac.tank_bounds", self.tank_bounds.min, self.tank_bounds.max)?;

        for piping in HvacPipingMaterial::ALL {
            self.piping
                .get(*piping)
                .validate(&format!("hvac.piping.{}", piping.key()))?;
        }
        for tank in HvacTankType::ALL {
            self.tanks
                .get(*tank)
                .validate(&format!("hvac.tanks.{}", tank.key()))?;
        }
        for pump in HvacPumpType::ALL {
            self.pumps
                .get(*pump)
                .validate(&format!("hvac.pumps.{}", pump.key()))?;
        }

        let filtration = &self.filtration;
        validate_cost_range("hvac.filtration.sediment_filter", &filtration.sediment_filter)?;
        validate_cost_range("hvac.filtration.carbon_filter_optional", &filtration.carbon_filter_optional)?;
        validate_cost_range("hvac.filtration.uv_if_potable", &filtration.uv_if_potable)?;

        let misc = &self.misc;
        validate_cost_range("hvac.misc.mounting_brackets_electrical", &misc.mounting_brackets_electrical)?;
        validate_cost_range("hvac.misc.valves_unions_overflow", &misc.valves_unions_overflow)?;
        validate_cost_range("hvac.misc.permitting_plumbing_tie_in", &misc.permitting_plumbing_tie_in)
    }
}

impl Validate for CostTables {
    fn validate(&self) -> Result<()> {
        self.rainwater.validate()?;
        self.hvac.validate()
    }
}
