//! Link state machine
//!
//! Tracks whether the peer is currently delivering valid frames.
//!
//! ```text
//!             valid frame
//!   ┌───────┐ ──────────► ┌────────┐
//!   │ Local │             │ Remote │
//!   └───────┘ ◄────────── └────────┘
//!          `ceiling` polls without
//!            a complete frame
//! ```
//!
//! The silence counter only advances on polls that find fewer than
//! [`FRAME_LEN`] bytes. Checksum and framing errors consume a frame but
//! neither advance nor reset it; only a valid frame resets it.

use crate::fifo::ByteFifo;
use crate::frame::{Frame, FrameError, FRAME_LEN};
use crate::values::ControlValues;

/// Empty polls before the link falls back to local mode
pub const DEFAULT_SILENCE_CEILING: u8 = 10;

/// Where the active control values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkMode {
    /// Locally sampled values (no recent valid frame)
    #[default]
    Local,
    /// Values from the last valid remote frame
    Remote,
}

/// Outcome of one receive pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Receive {
    /// A valid frame was consumed
    Frame(ControlValues),
    /// Fewer than [`FRAME_LEN`] bytes were waiting; nothing consumed
    Idle,
    /// A frame was consumed but its START byte was wrong
    Desync(u8),
    /// A frame was consumed but its CRC did not match
    ChecksumError,
}

impl Receive {
    pub fn values(&self) -> Option<ControlValues> {
        match self {
            Receive::Frame(values) => Some(*values),
            _ => None,
        }
    }
}

/// Receive-side counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub frames: u32,
    pub checksum_errors: u32,
    pub framing_errors: u32,
}

/// Link mode plus silence counter
#[derive(Debug, Clone)]
pub struct LinkState {
    mode: LinkMode,
    silence_count: u8,
    ceiling: u8,
    stats: LinkStats,
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCE_CEILING)
    }
}

impl LinkState {
    /// Create a link state in [`LinkMode::Local`]
    ///
    /// A zero `ceiling` is raised to 1.
    pub const fn new(ceiling: u8) -> Self {
        Self {
            mode: LinkMode::Local,
            silence_count: 0,
            ceiling: if ceiling == 0 { 1 } else { ceiling },
            stats: LinkStats {
                frames: 0,
                checksum_errors: 0,
                framing_errors: 0,
            },
        }
    }

    pub fn mode(&self) -> LinkMode {
        self.mode
    }

    pub fn silence_count(&self) -> u8 {
        self.silence_count
    }

    pub fn ceiling(&self) -> u8 {
        self.ceiling
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Consume at most one frame from `rx` and update the mode
    ///
    /// Consumes either 0 or exactly [`FRAME_LEN`] bytes.
    pub fn poll<const N: usize>(&mut self, rx: &mut ByteFifo<N>) -> Receive {
        let Some(bytes) = rx.take::<FRAME_LEN>() else {
            self.record_silence();
            return Receive::Idle;
        };

        match Frame::decode(&bytes) {
            Ok(frame) => {
                self.silence_count = 0;
                self.stats.frames = self.stats.frames.wrapping_add(1);
                if self.mode != LinkMode::Remote {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Link mode: remote");
                    self.mode = LinkMode::Remote;
                }
                Receive::Frame(frame.values())
            }
            Err(FrameError::InvalidStart(start)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Frame desync, start byte {=u8:#x}", start);
                self.stats.framing_errors = self.stats.framing_errors.wrapping_add(1);
                Receive::Desync(start)
            }
            Err(FrameError::InvalidChecksum { expected, received }) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "CRC mismatch: expected {=u16:#x}, received {=u16:#x}",
                    expected,
                    received
                );
                #[cfg(not(feature = "defmt"))]
                let _ = (expected, received);
                self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
                Receive::ChecksumError
            }
        }
    }

    /// Consume at most one frame from `rx`, returning its values if valid
    pub fn try_receive_frame<const N: usize>(
        &mut self,
        rx: &mut ByteFifo<N>,
    ) -> Option<ControlValues> {
        self.poll(rx).values()
    }

    fn record_silence(&mut self) {
        self.silence_count = self.silence_count.saturating_add(1).min(self.ceiling);
        if self.silence_count >= self.ceiling && self.mode != LinkMode::Local {
            #[cfg(feature = "defmt")]
            defmt::info!("Link silent for {=u8} polls, mode: local", self.ceiling);
            self.mode = LinkMode::Local;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{build_and_enqueue_frame, FIFO_SIZE};

    fn rx_with_frames(count: usize, values: ControlValues) -> ByteFifo<FIFO_SIZE> {
        let mut rx = ByteFifo::new();
        for _ in 0..count {
            assert!(build_and_enqueue_frame(&mut rx, &values));
        }
        rx
    }

    #[test]
    fn test_starts_local() {
        let state = LinkState::default();
        assert_eq!(state.mode(), LinkMode::Local);
        assert_eq!(state.silence_count(), 0);
        assert_eq!(state.ceiling(), DEFAULT_SILENCE_CEILING);
    }

    #[test]
    fn test_valid_frame_switches_to_remote() {
        let mut state = LinkState::default();
        let mut rx = rx_with_frames(1, ControlValues::new(-20, 45));

        let values = state.try_receive_frame(&mut rx).unwrap();
        assert_eq!(values.speed(), -20);
        assert_eq!(values.angle(), 45);
        assert_eq!(state.mode(), LinkMode::Remote);
        assert_eq!(state.stats().frames, 1);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_four_frames_then_silence() {
        let mut state = LinkState::default();
        let mut rx = rx_with_frames(4, ControlValues::new(5, 90));
        rx.put(0x00).unwrap();
        assert!(rx.is_full());

        for _ in 0..4 {
            let values = state.try_receive_frame(&mut rx).unwrap();
            assert_eq!(values.speed(), 5);
        }

        // Only the spare byte remains
        assert_eq!(state.try_receive_frame(&mut rx), None);
        assert_eq!(state.silence_count(), 1);
        assert_eq!(rx.read_size(), 1);
    }

    #[test]
    fn test_partial_frame_not_consumed() {
        let mut state = LinkState::default();
        let mut rx: ByteFifo<FIFO_SIZE> = ByteFifo::new();
        rx.put_all(&Frame::new(1, 1).encode()[..3]);

        assert_eq!(state.poll(&mut rx), Receive::Idle);
        assert_eq!(rx.read_size(), 3);
    }

    #[test]
    fn test_demotion_after_ceiling() {
        let mut state = LinkState::new(3);
        let mut rx = rx_with_frames(1, ControlValues::new(1, 1));
        state.poll(&mut rx);
        assert_eq!(state.mode(), LinkMode::Remote);

        state.poll(&mut rx);
        state.poll(&mut rx);
        assert_eq!(state.mode(), LinkMode::Remote);
        state.poll(&mut rx);
        assert_eq!(state.mode(), LinkMode::Local);

        for _ in 0..1000 {
            state.poll(&mut rx);
        }
        assert_eq!(state.mode(), LinkMode::Local);
        assert_eq!(state.silence_count(), 3);
    }

    #[test]
    fn test_checksum_error_does_not_reset_silence() {
        let mut state = LinkState::default();
        let mut rx: ByteFifo<FIFO_SIZE> = ByteFifo::new();

        state.poll(&mut rx);
        state.poll(&mut rx);
        assert_eq!(state.silence_count(), 2);

        let mut bad = Frame::new(3, 4).encode();
        bad[3] ^= 0x80;
        rx.put_all(&bad);

        assert_eq!(state.poll(&mut rx), Receive::ChecksumError);
        assert_eq!(state.silence_count(), 2);
        assert_eq!(state.mode(), LinkMode::Local);
        assert_eq!(state.stats().checksum_errors, 1);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_bad_start_consumes_whole_window() {
        let mut state = LinkState::default();
        let mut rx: ByteFifo<FIFO_SIZE> = ByteFifo::new();

        // A stray byte ahead of a valid frame shifts every window by one
        rx.put(0x42).unwrap();
        rx.put_all(&Frame::new(3, 4).encode());

        assert_eq!(state.poll(&mut rx), Receive::Desync(0x42));
        assert_eq!(rx.read_size(), 1);
        assert_eq!(state.stats().framing_errors, 1);
        assert_eq!(state.mode(), LinkMode::Local);
    }

    #[test]
    fn test_zero_ceiling_raised_to_one() {
        let mut state = LinkState::new(0);
        let mut rx: ByteFifo<FIFO_SIZE> = ByteFifo::new();
        assert_eq!(state.ceiling(), 1);
        state.poll(&mut rx);
        assert_eq!(state.silence_count(), 1);
    }
}
