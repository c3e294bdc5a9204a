#![no_std]
#![no_main]

mod peripherals;
mod system;
mod ui;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::{Battery, BatteryInfo},
    button::Button,
    display::Display,
};
use system::{
    config::system_config,
    time::{TimeManager, TimeReference},
};
use ui::{SpokenWatchface, WatchFace};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static INCREASE_BRIGHTNESS: Signal<ThreadModeRawMutex, bool> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

/// Called when button is pressed without bouncing for 10 (5 * 2) ms.
#[embassy_executor::task(pool_size = 1)]
async fn button_pressed() {
    INCREASE_BRIGHTNESS.signal(true);
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery) {
    loop {
        if battery.update().await {
            // Battery status changed
            defmt::info!("Battery status updated");
            BATTERY_STATUS.signal(battery.info());
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Update backlight brightness
#[embassy_executor::task(pool_size = 1)]
async fn update_brightness(mut backlight: Backlight) {
    loop {
        if INCREASE_BRIGHTNESS.wait().await {
            if backlight.get_brightness() < 7 {
                backlight.brighter().unwrap();
            } else {
                backlight.off();
            }
        }
    }
}

/// Redraw the watchface whenever the minute or the battery state changes.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<SPI2>) {
    let mut face = SpokenWatchface::new();
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            face.update_battery(display.target(), status.percent).unwrap();
        }

        if TIME.signaled() {
            let time = TIME.wait().await;
            defmt::info!("Current time: {}:{}", time.hour(), time.minute());
            face.update_time(display.target(), time).unwrap();
        }

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

/// Track wall-clock time and publish it once per displayed minute.
#[embassy_executor::task(pool_size = 1)]
async fn update_time() {
    let time = TimeManager::init(TimeReference::from_datetime(
        NaiveDateTime::from_timestamp_opt(UTC_EPOCH + TIMEZONE as i64, 0).unwrap(),
    ));

    let mut tick = Ticker::every(Duration::from_secs(1));
    let mut shown_minute = u32::MAX;
    loop {
        let now = time.get_time();
        if now.minute() != shown_minute {
            shown_minute = now.minute();

            // Send time to channel
            TIME.signal(now);
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        if button.pressed().await {
            unwrap!(Spawner::for_current_executor()
                .await
                .spawn(button_pressed()));
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut p = embassy_nrf::init(system_config());
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let mut backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        0,
    );

    // Initalize Battery
    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await;
    // Set the initial state before the first poll runs
    BATTERY_STATUS.signal(battery.info());

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    );
    backlight.set(2).unwrap();

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(_spawner.spawn(poll_button(button)));
    unwrap!(_spawner.spawn(update_battery_status(battery)));
    unwrap!(_spawner.spawn(update_brightness(backlight)));
    unwrap!(_spawner.spawn(update_lcd(display)));
    unwrap!(_spawner.spawn(update_time()));
}
