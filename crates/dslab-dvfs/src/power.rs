//! CPU power models.

use dyn_clone::{clone_trait_object, DynClone};

/// A model for estimating the power consumption of CPU based on its frequency and utilization.
pub trait CpuPowerModel: DynClone {
    /// Returns CPU power consumption in W.
    ///
    /// * `frequency` - current CPU frequency in MHz.
    /// * `utilization` - current CPU utilization, should be passed as a float in 0.0-1.0 range.
    fn get_power(&self, frequency: f64, utilization: f64) -> f64;
}

clone_trait_object!(CpuPowerModel);

/// CMOS power model with voltage scaled linearly with frequency.
///
/// Power is computed as `P = P_static + C * V^2 * f * u`,
/// where `V = V_min + (V_max - V_min) * f / f_max`.
///
/// The utilization is used as is, so the caller must keep it within 0.0-1.0.
#[derive(Clone, Debug)]
pub struct CmosCpuPowerModel {
    static_power: f64,
    capacitance: f64,
    min_voltage: f64,
    max_voltage: f64,
    max_frequency: f64,
}

impl CmosCpuPowerModel {
    /// Creates a CMOS power model.
    ///
    /// * `static_power` - The power consumed regardless of the load in W.
    /// * `capacitance` - The effective switched capacitance.
    /// * `min_voltage` - The supply voltage at 0 MHz in V.
    /// * `max_voltage` - The supply voltage at `max_frequency` in V.
    /// * `max_frequency` - The frequency in MHz at which `max_voltage` is reached.
    pub fn new(static_power: f64, capacitance: f64, min_voltage: f64, max_voltage: f64, max_frequency: f64) -> Self {
        Self {
            static_power,
            capacitance,
            min_voltage,
            max_voltage,
            max_frequency,
        }
    }

    /// Returns the supply voltage at the given frequency.
    pub fn voltage(&self, frequency: f64) -> f64 {
        self.min_voltage + (frequency / self.max_frequency) * (self.max_voltage - self.min_voltage)
    }

    /// Returns the dynamic (switching) part of power consumption.
    pub fn dynamic_power(&self, frequency: f64, utilization: f64) -> f64 {
        let voltage = self.voltage(frequency);
        self.capacitance * voltage * voltage * frequency * utilization
    }
}

impl Default for CmosCpuPowerModel {
    /// 0.2 W of static power, C = 1e-8, voltage from 0.5 V at 0 MHz to 1.0 V at 2000 MHz.
    fn default() -> Self {
        Self::new(0.2, 1e-8, 0.5, 1.0, 2000.)
    }
}

impl CpuPowerModel for CmosCpuPowerModel {
    fn get_power(&self, frequency: f64, utilization: f64) -> f64 {
        self.static_power + self.dynamic_power(frequency, utilization)
    }
}

/// Computes power in W using the default [`CmosCpuPowerModel`].
pub fn power(frequency: u32, utilization: f64) -> f64 {
    CmosCpuPowerModel::default().get_power(frequency as f64, utilization)
}
