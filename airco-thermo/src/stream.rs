use airco_core::constraint::{Constrained, ConstraintError, NonNegative};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Power, VolumeRate},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    specific_volume::cubic_meter_per_kilogram,
    volume_rate::cubic_meter_per_second,
};

use crate::HumidAir;

/// A humid air stream: a state carried by a dry-air mass flow.
///
/// Zero flow is allowed so that a closed damper or an idle zone can still
/// take part in a mixing balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirStream {
    pub state: HumidAir,
    pub mass_rate: Constrained<MassRate, NonNegative>,
}

impl AirStream {
    /// Creates a stream from a state and a dry-air mass flow.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `mass_rate` is negative.
    pub fn new(state: HumidAir, mass_rate: MassRate) -> Result<Self, ConstraintError> {
        Ok(Self {
            state,
            mass_rate: NonNegative::new(mass_rate)?,
        })
    }

    #[must_use]
    pub fn mass_rate(&self) -> MassRate {
        self.mass_rate.into_inner()
    }

    /// Returns the volume flow of humid air, `ṁ · v`.
    #[must_use]
    pub fn volume_rate(&self) -> VolumeRate {
        let m = self.mass_rate().get::<kilogram_per_second>();
        let v = self.state.specific_volume().get::<cubic_meter_per_kilogram>();
        VolumeRate::new::<cubic_meter_per_second>(m * v)
    }

    /// Returns the enthalpy flow, `ṁ · h`.
    #[must_use]
    pub fn enthalpy_rate(&self) -> Power {
        let m = self.mass_rate().get::<kilogram_per_second>();
        Power::new::<watt>(m * self.state.enthalpy().get::<joule_per_kilogram>())
    }

    /// Returns the flow of water vapor, `ṁ · W`.
    #[must_use]
    pub fn water_rate(&self) -> MassRate {
        self.mass_rate() * self.state.humidity_ratio().get::<ratio>()
    }
}
