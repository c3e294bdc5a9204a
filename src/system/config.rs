//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

/// Chip configuration for the PineTime board.
///
/// `Config` is `non_exhaustive`, so start from the default and adjust.
pub fn system_config() -> Config {
    let mut config = Config::default();

    // Both clock sources have external crystals on this board
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // Enable DC/DC regulator to massively reduce runtime current consumption
    config.dcdc.reg1 = true;

    // Run GPIOTE and timer interrupts below the default priority
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;

    // Allow debugging
    config.debug = Debug::Allowed;

    config
}
