//! Minimal TOML parser for link configuration
//!
//! Handles only the subset needed for `link.toml`. It does NOT support the
//! full TOML grammar.
//!
//! Supported features:
//! - `[link]`, `[flow]` and `[uart]` section headers
//! - `key = value` pairs with non-negative integer values (`57_600` allowed)
//!   or double-quoted strings without escapes
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are not set keep their [`LinkConfig::default`] value. The
//! parsed configuration is validated before it is returned.

use servolink_hal::{DataBits, Parity, StopBits};

use super::types::{ConfigError, LinkConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Key not known in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range for its key
    InvalidValue,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Link,
    Flow,
    Uart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Integer(u32),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn integer(self) -> Result<u32, ParseError> {
        match self {
            Value::Integer(n) => Ok(n),
            Value::Str(_) => Err(ParseError::InvalidValue),
        }
    }

    fn string(self) -> Result<&'a str, ParseError> {
        match self {
            Value::Str(s) => Ok(s),
            Value::Integer(_) => Err(ParseError::InvalidValue),
        }
    }
}

/// Parse TOML configuration into a validated [`LinkConfig`]
pub fn parse_config(input: &str) -> Result<LinkConfig, ParseError> {
    let mut config = LinkConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = parse_value(value.trim())?;

        apply(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "link" => Ok(Section::Link),
        "flow" => Ok(Section::Flow),
        "uart" => Ok(Section::Uart),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_value(value: &str) -> Result<Value<'_>, ParseError> {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) if !inner.contains('"') => Ok(Value::Str(inner)),
        Some(_) => Err(ParseError::InvalidValue),
        None => parse_integer(value).map(Value::Integer),
    }
}

fn parse_integer(value: &str) -> Result<u32, ParseError> {
    if value.is_empty() || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }
    Ok(result)
}

fn apply(
    config: &mut LinkConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Link, "silence_ceiling") => config.silence_ceiling = narrow(value.integer()?)?,
        (Section::Link, "send_period") => config.send_period = narrow(value.integer()?)?,
        (Section::Link, "cycle_period_ms") => config.cycle_period_ms = narrow(value.integer()?)?,
        (Section::Link, "startup_hold_ms") => config.startup_hold_ms = narrow(value.integer()?)?,
        (Section::Flow, "rx_start_threshold") => {
            config.rx_start_threshold = value.integer()? as usize
        }
        (Section::Flow, "rx_stop_threshold") => {
            config.rx_stop_threshold = value.integer()? as usize
        }
        (Section::Uart, "baudrate") => config.uart.baudrate = value.integer()?,
        (Section::Uart, "data_bits") => {
            config.uart.data_bits = match value.integer()? {
                7 => DataBits::Seven,
                8 => DataBits::Eight,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Uart, "parity") => {
            config.uart.parity = match value.string()? {
                "none" => Parity::None,
                "even" => Parity::Even,
                "odd" => Parity::Odd,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        (Section::Uart, "stop_bits") => {
            config.uart.stop_bits = match value.integer()? {
                1 => StopBits::One,
                2 => StopBits::Two,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn narrow<T: TryFrom<u32>>(value: u32) -> Result<T, ParseError> {
    T::try_from(value).map_err(|_| ParseError::InvalidValue)
}
