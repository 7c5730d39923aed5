use airco_thermo::HumidAir;
use uom::si::{
    f64::{MassRate, Power},
    mass_rate::kilogram_per_second,
    power::watt,
};

use super::DesignError;

/// Loads and conditions of one zone in one season.
///
/// Loads are heat gains to the space, so a heating load is a negative
/// `q_sen`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Season {
    pub q_sen: Power,
    pub q_lat: Power,
    /// Air state maintained in the zone.
    pub zone_air: HumidAir,
    /// Dry air exhausted directly from the zone instead of returned.
    pub m_exhaust: MassRate,
    /// Design supply flow, used to clamp part-load flows.
    pub m_supply: Option<MassRate>,
}

impl Season {
    #[must_use]
    pub fn new(q_sen: Power, q_lat: Power, zone_air: HumidAir) -> Self {
        Self {
            q_sen,
            q_lat,
            zone_air,
            m_exhaust: MassRate::new::<kilogram_per_second>(0.0),
            m_supply: None,
        }
    }

    #[must_use]
    pub fn with_exhaust(mut self, m_exhaust: MassRate) -> Self {
        self.m_exhaust = m_exhaust;
        self
    }

    #[must_use]
    pub fn with_design_flow(mut self, m_supply: MassRate) -> Self {
        self.m_supply = Some(m_supply);
        self
    }

    pub(super) fn is_heating(&self) -> bool {
        self.q_sen.get::<watt>() < 0.0
    }
}

/// A zone served by a VAV box.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub summer: Option<Season>,
    pub winter: Option<Season>,
    /// Whether the box can reheat air above the system supply temperature.
    pub reheat_coil: bool,
}

impl Zone {
    /// Creates a zone with a reheat coil and no season data.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summer: None,
            winter: None,
            reheat_coil: true,
        }
    }

    #[must_use]
    pub fn with_summer(mut self, season: Season) -> Self {
        self.summer = Some(season);
        self
    }

    #[must_use]
    pub fn with_winter(mut self, season: Season) -> Self {
        self.winter = Some(season);
        self
    }

    #[must_use]
    pub fn without_reheat(mut self) -> Self {
        self.reheat_coil = false;
        self
    }

    pub(super) fn summer(&self) -> Result<&Season, DesignError> {
        self.summer.as_ref().ok_or_else(|| DesignError::MissingSeason {
            zone: self.name.clone(),
            season: "summer",
        })
    }

    pub(super) fn winter(&self) -> Result<&Season, DesignError> {
        self.winter.as_ref().ok_or_else(|| DesignError::MissingSeason {
            zone: self.name.clone(),
            season: "winter",
        })
    }
}

/// Flow and states computed for one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneResult {
    pub name: String,
    pub mass_rate: MassRate,
    /// Air delivered to the zone, after any reheat.
    pub supply_air: HumidAir,
    /// Air leaving the zone.
    pub return_air: HumidAir,
    /// Heat added by the zone's reheat coil.
    pub reheat: Power,
}
