//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};

/// Snapshot of the battery state
#[derive(Clone, Copy, PartialEq)]
pub struct BatteryInfo {
    /// Battery percentage (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last observed state
    info: BatteryInfo,
}

impl Battery {
    /// Configure battery settings on boot and take the first sample
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        let mut config = BatteryConfig {
            adc,
            pin_charge_indication: charge_pin,
        };
        let info = BatteryInfo {
            percent: Self::percent_from_voltage(Self::voltage(&mut config.adc).await),
            charging: config.pin_charge_indication.is_low(),
        };
        Self { config, info }
    }

    /// Return the last observed state. Call `update()` first for fresh data.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Re-read the hardware. Return whether or not the values changed.
    pub async fn update(&mut self) -> bool {
        let info = BatteryInfo {
            percent: Self::percent_from_voltage(Self::voltage(&mut self.config.adc).await),
            charging: self.config.pin_charge_indication.is_low(),
        };
        let changed = info != self.info;
        self.info = info;
        changed
    }

    /// Battery voltage in millivolts
    async fn voltage(adc: &mut Saadc<'static, 1>) -> u16 {
        let mut buf = [0; 1];
        adc.sample(&mut buf).await;
        // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
        // Use u32 during calculation to prevent overflow
        (buf[0] as u32 * 2000 / 1241) as u16
    }

    /// Battery capacity in percent
    fn percent_from_voltage(voltage: u16) -> u8 {
        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        (match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        }) as u8
    }
}
