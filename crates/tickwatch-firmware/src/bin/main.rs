#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Ticker, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};
use static_cell::StaticCell;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::options::ColorOrder;
use mipidsi::{Builder as MipidsiBuilder, models::ST7735s};

use tickwatch_core::Canvas;
use tickwatch_core::config::UiConfig;
use tickwatch_core::display_manager::{
    DisplayManager, DisplayRequest, Screen, get_display_receiver, get_display_sender,
};
use tickwatch_core::framebuffer::FrameBuffer;
use tickwatch_core::ui::clock::TICK_INTERVAL;
use tickwatch_core::ui::colors::{BLUE, GREEN, MAGENTA, YELLOW};
use tickwatch_core::ui::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tickwatch_core::ui::{ClockTime, IconMenuItem, TimeFormat, UiManager};

/// How long the demo cycle stays on each screen.
const DEMO_DWELL: Duration = Duration::from_secs(5);

/// SPI batching buffer for the panel interface.
static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Clock settings baked in by build.rs, if any.
fn baked_config() -> (UiConfig, ClockTime) {
    let mut config = UiConfig::default();
    if let Some(raw) = option_env!("TICKWATCH_TIME_FORMAT") {
        match raw.parse::<TimeFormat>() {
            Ok(format) => config = config.with_time_format(format),
            Err(e) => warn!("Ignoring TICKWATCH_TIME_FORMAT={:?}: {}", raw, e),
        }
    }

    let start = match option_env!("TICKWATCH_START_TIME").map(str::parse::<ClockTime>) {
        Some(Ok(time)) => time,
        Some(Err(e)) => {
            warn!("Ignoring TICKWATCH_START_TIME: {}", e);
            ClockTime::default()
        }
        None => ClockTime::default(),
    };

    (config, start)
}

/// Feeds monotonic time to the display manager once per second.
#[embassy_executor::task]
async fn clock_task() {
    let sender = get_display_sender();
    let mut ticker = Ticker::every(TICK_INTERVAL);
    loop {
        sender.send(DisplayRequest::Tick(Instant::now())).await;
        ticker.next().await;
    }
}

/// Walks through every screen so the UI can be checked without buttons.
#[embassy_executor::task]
async fn demo_task() {
    let sender = get_display_sender();
    loop {
        sender.send(DisplayRequest::Show(Screen::WatchFace)).await;
        Timer::after(DEMO_DWELL).await;

        sender.send(DisplayRequest::Show(Screen::Menu)).await;
        for _ in 0..3 {
            Timer::after(Duration::from_secs(1)).await;
            sender.send(DisplayRequest::MenuNext).await;
        }
        Timer::after(Duration::from_secs(1)).await;

        sender.send(DisplayRequest::Show(Screen::IconMenu)).await;
        Timer::after(Duration::from_secs(1)).await;
        sender.send(DisplayRequest::MenuNext).await;
        Timer::after(DEMO_DWELL).await;

        sender
            .send(DisplayRequest::Show(Screen::notification(
                "Message",
                "Hey, are we still on for lunch today?",
            )))
            .await;
        Timer::after(DEMO_DWELL).await;

        sender.send(DisplayRequest::Show(Screen::Recording)).await;
        Timer::after(DEMO_DWELL).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Holds the 40 KiB framebuffer
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, Config::default())
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);

    // 2. Chip select, driven by the SPI device wrapper
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();

    // 4. Data/command and reset lines
    let dc = Output::new(peripherals.GPIO9, Level::Low, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO8, Level::High, OutputConfig::default());

    // 5. Create display interface
    let spi_buffer = SPI_BUFFER.init([0u8; 512]);
    let di = SpiInterface::new(spi_device, dc, spi_buffer);

    // 6. Build and initialize the display driver. The panel is wired BGR; the
    // UI palette stays RGB and the driver swaps channels.
    let mut display = MipidsiBuilder::new(ST7735s, di)
        .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
        .color_order(ColorOrder::Bgr)
        .reset_pin(rst)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    info!("Display initialized!");

    // 7. UI state, composed into RAM and flushed to the panel
    let (ui_config, start) = baked_config();
    let mut ui = UiManager::with_config(Canvas::new(FrameBuffer::new()), ui_config);
    ui.set_time(start.hours(), start.minutes(), start.seconds());
    ui.set_menu_items([
        "Alarms",
        "Timer",
        "Stopwatch",
        "Weather",
        "Music",
        "Notifications",
        "Settings",
    ]);
    ui.set_icon_menu_items([
        IconMenuItem::new("Wifi", BLUE).with_toggle(true),
        IconMenuItem::new("Sound", MAGENTA).with_toggle(false),
        IconMenuItem::new("Health", GREEN),
        IconMenuItem::new("Alarm", YELLOW).with_toggle(true),
    ]);
    let mut manager = DisplayManager::new(ui);

    spawner.spawn(clock_task().expect("clock task already running"));
    spawner.spawn(demo_task().expect("demo task already running"));

    let receiver = get_display_receiver();
    loop {
        match manager.render() {
            Ok(true) => {
                let fb = manager.ui_mut().surface_mut().target_mut();
                if let Err(e) = fb.flush(&mut display) {
                    error!("Display flush error: {:?}", e);
                }
            }
            Ok(false) => {}
            Err(e) => error!("Display render error: {:?}", e),
        }

        let request = receiver.receive().await;
        manager.handle_request(request);
    }
}
