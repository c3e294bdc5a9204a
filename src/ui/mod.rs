//! UI definitions module

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

mod gauge;
mod spoken_time;
mod spoken_watchface;

pub use spoken_watchface::SpokenWatchface;

/// A full-screen face redrawn from host-fed snapshots.
pub trait WatchFace {
    /// Create new watchface
    fn new() -> Self;

    /// Redraw the time portion after a minute tick
    fn update_time<D>(&mut self, target: &mut D, time: NaiveDateTime) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Redraw the battery gauge after a charge-level change
    fn update_battery<D>(&mut self, target: &mut D, percent: u8) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
