//! State shared between the control task and the UART0 interrupt
//!
//! Everything the interrupt touches lives in one critical-section mutex.
//! The control task only holds the lock for a FIFO operation and a pin
//! update, never across an `.await`.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use servolink_core::traits::Transport;
use servolink_drivers::{Handshake, IrqStats, UartIrqHandler};
use servolink_protocol::{ControlValues, LinkState, Receive, SerialLink};

use crate::uart::Uart0Port;

/// RTS on an output, CTS on an input
pub type Uart0Handshake = Handshake<Output<'static>, Input<'static>>;

/// Link plus the hardware the interrupt drives
pub struct Shared {
    pub link: SerialLink,
    pub handshake: Uart0Handshake,
    pub port: Uart0Port,
    pub irq: UartIrqHandler,
}

/// Installed once by `main` before the interrupt is unmasked
pub static SHARED: Mutex<CriticalSectionRawMutex, RefCell<Option<Shared>>> =
    Mutex::new(RefCell::new(None));

/// Install the shared state
pub fn install(shared: Shared) {
    SHARED.lock(|cell| {
        cell.replace(Some(shared));
    });
}

/// Run the interrupt handler against the shared state
pub fn service_interrupt() {
    SHARED.lock(|cell| {
        if let Some(shared) = cell.borrow_mut().as_mut() {
            let Shared {
                link,
                handshake,
                port,
                irq,
            } = shared;
            irq.on_interrupt(port, link, handshake);
        }
    });
}

/// Interrupt-side counters, if the state is installed
pub fn irq_stats() -> Option<IrqStats> {
    SHARED.lock(|cell| cell.borrow().as_ref().map(|shared| shared.irq.stats()))
}

/// Foreground access to the shared link
pub struct SharedTransport;

impl Transport for SharedTransport {
    fn receive(&mut self, state: &mut LinkState) -> Receive {
        SHARED.lock(|cell| match cell.borrow_mut().as_mut() {
            Some(shared) => {
                let outcome = shared.link.receive(state);
                shared.handshake.drive_rts(shared.link.rts());
                outcome
            }
            None => {
                warn!("Receive before link installed");
                Receive::Idle
            }
        })
    }

    fn send(&mut self, values: &ControlValues) -> bool {
        let (queued, kick) = SHARED.lock(|cell| match cell.borrow_mut().as_mut() {
            Some(shared) => {
                let cts = shared.handshake.sample_cts();
                let queued = shared.link.send(values, cts);
                (queued, shared.link.tx_kick_requested())
            }
            None => (false, false),
        });

        // The interrupt picks up the kick and starts transmission
        if kick {
            interrupt::UART0_IRQ.pend();
        }
        queued
    }
}
