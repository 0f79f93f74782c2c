//! Ferrule - Host-call bridge firmware
//!
//! Main firmware binary for RP2040 boards. Registers the `System` and
//! `Timer` modules under the configured root namespace and serves them
//! over a UART console.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ferrule_console::Console;
use ferrule_core::Bridge;
use ferrule_hal::SystemControl;
use ferrule_hal_rp2040::{resume_deep_sleep, Rp2040Platform, WakeCause};

mod config;
mod tasks;

// Heap reported by System.available_memory
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 32KB
const HEAP_SIZE: usize = 32 * 1024;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // A deep sleep in progress resumes before anything else runs
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    let wake = resume_deep_sleep(&mut watchdog);

    info!("Ferrule firmware starting ({:?})", wake);
    if wake == WakeCause::WatchdogTimeout {
        warn!("Watchdog expired outside deep sleep");
    }

    // Initialize heap allocator
    init_heap();

    let config = config::load_config();

    let platform = Rp2040Platform::new(&HEAP, watchdog, config.tick_period_ms);
    let chip = platform.chip_info();
    info!(
        "Chip: model={=u32:#x} rev={} cores={}, {}",
        chip.model.code(),
        chip.revision,
        chip.cores,
        platform.sdk_version()
    );
    let bridge = Bridge::new(platform);

    let console = match Console::new(&config.namespace) {
        Ok(console) => console,
        Err(e) => defmt::panic!("Namespace registration failed: {:?}", e),
    };
    info!(
        "Registered {} functions under {}",
        console.host().function_count(),
        config.namespace.as_str()
    );

    // Setup UART for the console
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.console.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.console.baudrate);

    spawner
        .spawn(tasks::console_task(rx, tx, console, bridge, config.console))
        .unwrap();

    info!("Console running");
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
