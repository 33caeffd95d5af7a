//! Embedded entry point - the nRF52840 control loop.
//!
//! Single poll-driven loop: debounced button events arrive on a channel,
//! each one drives the menu state machine (or takes a measurement), and
//! the whole frame is redrawn after every accepted event. When no event
//! arrives within the inactivity window the settings are checkpointed to
//! flash, one final inverted frame is drawn, and the power latch is
//! released.

#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration, Instant};

use lightmeter::config;
use lightmeter::power_logic;
use lightmeter::sensor::Bh1750;
use lightmeter::sensor_logic::FallbackLux;
use lightmeter::storage;
use lightmeter::ui::menu::Menu;
use lightmeter::ui::{buttons, display, ButtonEvent};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    TWISPI1 => twim::InterruptHandler<peripherals::TWISPI1>;
    SAADC => saadc::InterruptHandler;
});

/// Debounced button events from the button tasks to the control loop.
static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, 4> = Channel::new();

#[embassy_executor::task(pool_size = 4)]
async fn button(pin: AnyPin, event: ButtonEvent) {
    let tx = BUTTON_EVENTS.sender();
    buttons::button_task(pin, event, &tx).await
}

async fn read_battery_volts(saadc: &mut Saadc<'_, 1>) -> f32 {
    let mut buf = [0i16; 1];
    saadc.sample(&mut buf).await;
    // 12-bit result, gain 1/6, internal 0.6 V reference → 3.6 V full scale.
    let volts = buf[0] as f32 / 4096.0 * 3.6;
    volts * config::BATTERY_DIVIDER_SCALE
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("lightmeter boot");

    // Hold the power latch closed for the session.
    let mut power_latch = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    // Light sensor bus.
    let sensor_i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut sensor = Bh1750::new(sensor_i2c);
    let sensor_ok = sensor.start().is_ok();
    if !sensor_ok {
        warn!("BH1750 not detected - using pseudo-random illuminance");
    }
    let mut fallback = FallbackLux::new(config::FALLBACK_LUX_SEED);

    // Display bus.
    let display_i2c = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, twim::Config::default());
    let mut oled = display::init(display_i2c);

    // Battery sense on AIN0.
    let adc_config = saadc::Config::default();
    let channel_config = ChannelConfig::single_ended(p.P0_02);
    let mut adc = Saadc::new(p.SAADC, Irqs, adc_config, [channel_config]);

    // Settings survive power cycles; the cursor does not.
    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let mut settings = storage::load(&mut flash).await;
    settings.recalculate();
    let mut menu = Menu::new();

    spawner.must_spawn(button(p.P0_11.degrade(), ButtonEvent::Up));
    spawner.must_spawn(button(p.P0_12.degrade(), ButtonEvent::Down));
    spawner.must_spawn(button(p.P0_24.degrade(), ButtonEvent::Ok));
    spawner.must_spawn(button(p.P0_25.degrade(), ButtonEvent::Measure));

    let mut last_activity = Instant::now();
    let mut needs_update = true;

    loop {
        if needs_update {
            let battery = power_logic::battery_percent(read_battery_volts(&mut adc).await);
            display::draw_menu(&mut oled, &settings, &menu, sensor_ok, battery, false);
            needs_update = false;
        }

        let idle_ms = last_activity.elapsed().as_millis();
        if power_logic::should_sleep(idle_ms, config::INACTIVITY_TIMEOUT_MS) {
            break;
        }

        let window = Duration::from_millis(config::INACTIVITY_TIMEOUT_MS - idle_ms);
        let Ok(event) = with_timeout(window, BUTTON_EVENTS.receive()).await else {
            continue; // window elapsed - the sleep check above fires
        };

        last_activity = Instant::now();
        needs_update = true;
        match event {
            ButtonEvent::Up => menu.prev(&mut settings),
            ButtonEvent::Down => menu.next(&mut settings),
            ButtonEvent::Ok => menu.confirm(&mut settings),
            ButtonEvent::Measure => {
                let lux = if sensor_ok {
                    match sensor.read_lux() {
                        Ok(lux) => Some(lux),
                        Err(e) => {
                            warn!("Sensor read failed: {}", e);
                            None
                        }
                    }
                } else {
                    Some(fallback.next_lux())
                };
                if let Some(lux) = lux {
                    info!("Measured {} lux", lux);
                    settings.measure(lux);
                }
            }
        }
    }

    // Terminal sleep: checkpoint, final inverted frame, release the latch.
    info!("Inactivity timeout - sleeping");
    if storage::save(&mut flash, &settings).await.is_err() {
        warn!("Failed to checkpoint settings");
    }
    let battery = power_logic::battery_percent(read_battery_volts(&mut adc).await);
    display::draw_menu(&mut oled, &settings, &menu, sensor_ok, battery, true);
    power_latch.set_low();

    loop {
        cortex_m::asm::wfi();
    }
}
