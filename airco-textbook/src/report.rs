use airco_core::units::SpecificEnthalpy;
use serde::{Deserialize, Serialize};
use uom::si::f64::{
    MassDensity, MassRate, Power, Pressure, Ratio, SpecificHeatCapacity, SpecificVolume,
    TemperatureInterval, ThermodynamicTemperature, VolumeRate,
};

/// The results of one worked problem.
///
/// Entries are grouped into parts, one per textbook question, and keep the
/// order in which they were computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One labeled result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub part: String,
    pub label: String,
    pub value: Value,
}

/// A computed quantity, tagged with its kind so it can be displayed in any
/// unit system.
///
/// Quantities serialize as their SI base-unit value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "si", rename_all = "snake_case")]
pub enum Value {
    Temperature(ThermodynamicTemperature),
    TemperatureDifference(TemperatureInterval),
    /// Mass of water vapor per mass of dry air.
    HumidityRatio(Ratio),
    /// A dimensionless fraction such as relative humidity or a sensible heat ratio.
    Fraction(Ratio),
    Pressure(Pressure),
    MassRate(MassRate),
    VolumeRate(VolumeRate),
    Power(Power),
    Density(MassDensity),
    SpecificVolume(SpecificVolume),
    SpecificEnthalpy(SpecificEnthalpy),
    SpecificHeat(SpecificHeatCapacity),
}

impl Value {
    #[must_use]
    pub fn as_temperature(&self) -> Option<ThermodynamicTemperature> {
        match self {
            Self::Temperature(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the ratio held by a humidity ratio or fraction.
    #[must_use]
    pub fn as_ratio(&self) -> Option<Ratio> {
        match self {
            Self::HumidityRatio(r) | Self::Fraction(r) => Some(*r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mass_rate(&self) -> Option<MassRate> {
        match self {
            Self::MassRate(m) => Some(*m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_volume_rate(&self) -> Option<VolumeRate> {
        match self {
            Self::VolumeRate(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_power(&self) -> Option<Power> {
        match self {
            Self::Power(q) => Some(*q),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_specific_enthalpy(&self) -> Option<SpecificEnthalpy> {
        match self {
            Self::SpecificEnthalpy(h) => Some(*h),
            _ => None,
        }
    }
}

impl Report {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Starts a new part; entries added through the returned handle belong to it.
    pub fn part(&mut self, name: impl Into<String>) -> Part<'_> {
        Part {
            report: self,
            name: name.into(),
        }
    }

    /// Returns the value labeled `label` within part `part`.
    #[must_use]
    pub fn get(&self, part: &str, label: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|entry| entry.part == part && entry.label == label)
            .map(|entry| entry.value)
    }

    /// Returns the part names in order of first appearance.
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !parts.contains(&entry.part.as_str()) {
                parts.push(&entry.part);
            }
        }
        parts
    }
}

/// Appends entries to one part of a [`Report`].
#[derive(Debug)]
pub struct Part<'a> {
    report: &'a mut Report,
    name: String,
}

impl Part<'_> {
    pub fn add(&mut self, label: impl Into<String>, value: Value) -> &mut Self {
        self.report.entries.push(Entry {
            part: self.name.clone(),
            label: label.into(),
            value,
        });
        self
    }

    pub fn temperature(&mut self, label: &str, t: ThermodynamicTemperature) -> &mut Self {
        self.add(label, Value::Temperature(t))
    }

    pub fn humidity_ratio(&mut self, label: &str, w: Ratio) -> &mut Self {
        self.add(label, Value::HumidityRatio(w))
    }

    pub fn fraction(&mut self, label: &str, x: Ratio) -> &mut Self {
        self.add(label, Value::Fraction(x))
    }

    pub fn mass_rate(&mut self, label: &str, m: MassRate) -> &mut Self {
        self.add(label, Value::MassRate(m))
    }

    pub fn volume_rate(&mut self, label: &str, v: VolumeRate) -> &mut Self {
        self.add(label, Value::VolumeRate(v))
    }

    pub fn power(&mut self, label: &str, q: Power) -> &mut Self {
        self.add(label, Value::Power(q))
    }

    pub fn specific_enthalpy(&mut self, label: &str, h: SpecificEnthalpy) -> &mut Self {
        self.add(label, Value::SpecificEnthalpy(h))
    }
}
