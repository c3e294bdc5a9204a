//! Spoken-time watchface
//!
//! The whole face is text: the current time written out the way it is
//! spoken, a short date line below it, and a thin battery gauge along
//! the bottom edge.

use chrono::{Datelike, NaiveDateTime, Timelike};
use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{iso_8859_1::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use embedded_text::{
    alignment::HorizontalAlignment,
    style::{HeightMode, TextBoxStyleBuilder},
    TextBox,
};
use profont::PROFONT_24_POINT;

use super::gauge::{GaugeBitmap, GAUGE_HEIGHT, GAUGE_WIDTH};
use super::spoken_time::{self, PHRASE_LEN};
use super::WatchFace;

const LCD_W: u32 = 240;

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;

// Screen regions, top to bottom
const TIME_AREA: Rectangle = Rectangle::new(Point::new(0, 24), Size::new(LCD_W, 128));
const DATE_AREA: Rectangle = Rectangle::new(Point::new(0, 170), Size::new(LCD_W, 20));
const GAUGE_ORIGIN: Point = Point::new(48, 220);

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Watchface rendering the time as spoken words.
pub struct SpokenWatchface {
    phrase_buf: [u8; PHRASE_LEN],
    date_buf: [u8; PHRASE_LEN],
    gauge: GaugeBitmap,
}

impl SpokenWatchface {
    fn wipe<D>(target: &mut D, area: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // Stale glyphs linger unless the region is repainted first
        area.into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(target)
    }
}

impl WatchFace for SpokenWatchface {
    fn new() -> Self {
        Self {
            phrase_buf: [0; PHRASE_LEN],
            date_buf: [0; PHRASE_LEN],
            gauge: GaugeBitmap::new(),
        }
    }

    fn update_time<D>(&mut self, target: &mut D, time: NaiveDateTime) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let phrase = spoken_time::phrase(&mut self.phrase_buf, time.hour(), time.minute());

        Self::wipe(target, TIME_AREA)?;
        let character_style = MonoTextStyle::new(&PROFONT_24_POINT, FOREGROUND);
        let textbox_style = TextBoxStyleBuilder::new()
            .height_mode(HeightMode::FitToText)
            .alignment(HorizontalAlignment::Center)
            .build();
        TextBox::with_textbox_style(phrase, TIME_AREA, character_style, textbox_style)
            .draw(target)?;

        let date = format_no_std::show(
            &mut self.date_buf,
            format_args!(
                "{}, {} {}",
                WEEKDAYS[time.weekday().num_days_from_monday() as usize],
                MONTHS[time.month0() as usize],
                time.day()
            ),
        )
        .unwrap();

        Self::wipe(target, DATE_AREA)?;
        let character_style = MonoTextStyle::new(&FONT_10X20, FOREGROUND);
        let textbox_style = TextBoxStyleBuilder::new()
            .height_mode(HeightMode::FitToText)
            .alignment(HorizontalAlignment::Center)
            .build();
        TextBox::with_textbox_style(date, DATE_AREA, character_style, textbox_style)
            .draw(target)?;

        Ok(())
    }

    fn update_battery<D>(&mut self, target: &mut D, percent: u8) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.gauge.render(percent);

        let gauge = &self.gauge;
        let pixels = (0..GAUGE_HEIGHT).flat_map(|y| {
            (0..GAUGE_WIDTH).map(move |x| {
                let color = if gauge.is_dark(x, y) {
                    FOREGROUND
                } else {
                    BACKGROUND
                };
                Pixel(GAUGE_ORIGIN + Point::new(x as i32, y as i32), color)
            })
        });
        target.draw_iter(pixels)
    }
}
