//! SSD1306 OLED menu renderer.
//!
//! The whole frame is redrawn on every update; the core assumes no
//! partial-update contract. The sleep transition requests one final
//! inverted frame before the display is switched off.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::meter::scales::SHUTTER_SPEEDS;
use crate::meter::settings::{Mode, Settings};
use crate::ui::menu::{Menu, ROW_ISO, ROW_MODE, ROW_VALUE};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style(fg: BinaryColor) -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor>
{
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(fg)
        .build()
}

fn format_shutter(line: &mut heapless::String<24>, shutter_speed: f32) {
    match SHUTTER_SPEEDS.label(shutter_speed) {
        Some(label) => {
            let _ = line.push_str(label);
        }
        None => {
            let _ = write!(line, "{:.3}s", shutter_speed);
        }
    }
}

/// Render the full menu frame.
///
/// `inverted` swaps foreground and background for the final sleep frame.
pub fn draw_menu<I2C>(
    display: &mut Display<I2C>,
    settings: &Settings,
    menu: &Menu,
    sensor_ok: bool,
    battery_percent: u8,
    inverted: bool,
) where
    I2C: embedded_hal::i2c::I2c,
{
    let (fg, bg) = if inverted {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };
    let style = text_style(fg);

    display.clear_buffer();
    if inverted {
        let area = display.bounding_box();
        let _ = display.fill_solid(&area, bg);
    }

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(
        line,
        "Sensor {}  Bat {}%",
        if sensor_ok { "OK" } else { "NOK" },
        battery_percent
    );
    let _ = Text::new(line.as_str(), Point::new(0, 8), style).draw(display);

    line.clear();
    let _ = write!(line, "EV: {:.1}", settings.last_ev);
    let _ = Text::new(line.as_str(), Point::new(0, 20), style).draw(display);

    for row in 0..3 {
        line.clear();
        let marker = if row == menu.cursor() {
            if menu.edit_mode() {
                "*"
            } else {
                ">"
            }
        } else {
            "-"
        };
        let _ = line.push_str(marker);
        let _ = line.push_str(" ");
        match row {
            ROW_MODE => {
                let _ = write!(line, "Mode: {}", settings.mode.label());
            }
            ROW_ISO => {
                let _ = write!(line, "ISO: {}", settings.iso);
            }
            ROW_VALUE => match settings.mode {
                Mode::AperturePriority => {
                    let _ = write!(line, "f/{:.1}", settings.aperture);
                }
                Mode::ShutterPriority => {
                    format_shutter(&mut line, settings.shutter_speed);
                }
            },
            _ => {}
        }
        let y = 32 + (row as i32 * 10);
        let _ = Text::new(line.as_str(), Point::new(0, y), style).draw(display);
    }

    // Result line: the driven value.
    line.clear();
    match settings.mode {
        Mode::AperturePriority => {
            let _ = line.push_str("=> ");
            format_shutter(&mut line, settings.shutter_speed);
        }
        Mode::ShutterPriority => {
            let _ = write!(line, "=> f/{:.1}", settings.aperture);
        }
    }
    let _ = Text::new(line.as_str(), Point::new(0, 62), style).draw(display);

    let _ = display.flush();
}
