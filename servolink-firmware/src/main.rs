//! Servolink - remote speed/angle controller firmware
//!
//! Two boards exchange their potentiometer settings over UART0 with
//! RTS/CTS handshaking. While frames keep arriving the remote settings
//! drive the output stage; when the peer goes silent the board falls back
//! to its own potentiometers.
//!
//! Pinout (RP2040):
//! - GPIO0/GPIO1: UART0 TX/RX
//! - GPIO2: RTS out, GPIO3: CTS in (high = pause)
//! - GPIO25: checksum error LED
//! - GPIO26/GPIO27: speed/angle potentiometers

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::Uart;
use {defmt_rtt as _, panic_probe as _};

use servolink_drivers::{Handshake, PinIndicator, UartIrqHandler};
use servolink_hal::{IrqSource, SerialPort};
use servolink_protocol::SerialLink;

use crate::shared::Shared;
use crate::tasks::PotChannels;
use crate::uart::Uart0Port;

mod config;
mod io;
mod shared;
mod tasks;
mod uart;

// UART0_IRQ is serviced by the handler below, not by an embassy driver
bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Servolink firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Link config: {=u32} baud, RTS {=usize}/{=usize}, silence ceiling {=u8}",
        config.uart.baudrate,
        config.rx_start_threshold,
        config.rx_stop_threshold,
        config.silence_ceiling
    );

    // Pins and line format; after this UART0 is driven through registers
    let _uart = Uart::new_blocking(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        uart::driver_config(&config.uart),
    );

    // Peer held off until the first receive pass
    let rts = Output::new(p.PIN_2, Level::High);
    // A disconnected peer reads as "pause"
    let cts = Input::new(p.PIN_3, Pull::Up);
    let led = Output::new(p.PIN_25, Level::Low);

    let mut port = Uart0Port::new();
    port.disable(IrqSource::Transmit);
    port.enable(IrqSource::Error);
    port.enable(IrqSource::Receive);

    shared::install(Shared {
        link: SerialLink::new(config.flow_thresholds()),
        handshake: Handshake::new(rts, cts),
        port,
        irq: UartIrqHandler::new(),
    });

    interrupt::UART0_IRQ.set_priority(Priority::P1);
    // SAFETY: the handler only touches state guarded by `shared::SHARED`
    unsafe { interrupt::UART0_IRQ.enable() };
    info!("UART0 interrupt enabled");

    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let pots = PotChannels {
        speed: Channel::new_pin(p.PIN_26, Pull::None),
        angle: Channel::new_pin(p.PIN_27, Pull::None),
    };

    unwrap!(spawner.spawn(tasks::control_task(
        config,
        adc,
        pots,
        PinIndicator::new(led),
    )));

    info!("All tasks spawned, firmware running");

    // `_uart` must stay alive: dropping it releases the pins
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

#[interrupt]
fn UART0_IRQ() {
    shared::service_interrupt();
}
