//! CRC-16 engine
//!
//! Both ends of the link use CRC-16/CCITT-FALSE:
//! - Polynomial: x^16 + x^12 + x^5 + 1 (0x1021)
//! - Initial value: 0xFFFF
//! - No input/output reflection, no final XOR
//!
//! The running value is passed in explicitly so a frame can be checksummed
//! one field at a time. Callers restart from [`CRC_SEED`] for every frame.

/// Initial register value for every frame
pub const CRC_SEED: u16 = 0xFFFF;

/// Generator polynomial (normal form)
pub const CRC_POLY: u16 = 0x1021;

static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Fold one byte into a running CRC
#[inline]
pub fn update(crc: u16, byte: u8) -> u16 {
    let index = ((crc >> 8) as u8 ^ byte) as usize;
    (crc << 8) ^ TABLE[index]
}

/// CRC of a whole byte slice, starting from [`CRC_SEED`]
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes.iter().fold(CRC_SEED, |crc, &byte| update(crc, byte))
}
