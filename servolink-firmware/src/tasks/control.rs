//! Control task
//!
//! Holds off for the configured startup delay, then runs one
//! [`ControlCycle`] per tick:
//! - Sample both potentiometers
//! - Receive, apply and display settings
//! - Periodically send the local settings to the peer

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker, Timer};

use servolink_core::{ControlCycle, LinkConfig};
use servolink_drivers::PinIndicator;

use crate::io::{PotSettings, RttDisplay, ServoOutput};
use crate::shared::{irq_stats, SharedTransport};

/// Log link counters every this many cycles
const STATS_EVERY: u32 = 500;

/// ADC channels of the speed and angle potentiometers
pub struct PotChannels {
    pub speed: Channel<'static>,
    pub angle: Channel<'static>,
}

#[embassy_executor::task]
pub async fn control_task(
    config: LinkConfig,
    mut adc: Adc<'static, Async>,
    mut pots: PotChannels,
    mut indicator: PinIndicator<Output<'static>>,
) {
    info!("Control task started, startup hold {=u16} ms", config.startup_hold_ms);
    Timer::after_millis(config.startup_hold_ms as u64).await;

    let mut cycle = ControlCycle::new(&config);
    let mut transport = SharedTransport;
    let mut source = PotSettings::default();
    let mut output = ServoOutput::default();
    let mut display = RttDisplay::default();

    let mut ticker = Ticker::every(Duration::from_millis(config.cycle_period_ms as u64));
    let mut cycles: u32 = 0;

    loop {
        ticker.next().await;

        let speed = adc.read(&mut pots.speed).await.ok();
        let angle = adc.read(&mut pots.angle).await.ok();
        source.update(speed, angle);

        let report = cycle.run(
            &mut transport,
            &mut source,
            &mut output,
            &mut display,
            &mut indicator,
        );

        trace!(
            "Cycle: mode {}, received {}, active {}",
            report.mode,
            report.received,
            report.active
        );

        if report.mode_changed {
            info!("Link mode: {}", report.mode);
        }
        if report.sent == Some(false) {
            warn!("TX FIFO full, frame not sent");
        }

        cycles = cycles.wrapping_add(1);
        if cycles % STATS_EVERY == 0 {
            info!("Link stats: {}", cycle.link().stats());
            if let Some(stats) = irq_stats() {
                info!("UART stats: {}", stats);
            }
        }
    }
}
