// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated instance port.
//!
//! An instance's port is its identity (I1). [`Port`] can only be constructed
//! through [`Port::new`], which enforces I5 (`[1024, 65535]`).

use std::fmt;

/// A TCP port in `[1024, 65535]`, identifying one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

/// Lower bound of the valid port range (I5).
pub const MIN_PORT: i64 = 1024;
/// Upper bound of the valid port range (I5), inclusive.
pub const MAX_PORT: i64 = 65535;

impl Port {
    /// Validate and construct a `Port` from any wire-supplied integer.
    ///
    /// Rejects values outside `[1024, 65535]`, matching I5 exactly at the
    /// boundaries (`1023` and `65536` are both invalid).
    pub fn new(value: i64) -> Result<Self, InvalidPort> {
        if !(MIN_PORT..=MAX_PORT).contains(&value) {
            return Err(InvalidPort(value));
        }
        Ok(Port(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Program group name the supervisor knows this instance by.
    pub fn group_name(self) -> String {
        format!("instance-{}", self.0)
    }

    /// Config file stem (without extension), mirrors [`Port::group_name`].
    pub fn config_stem(self) -> String {
        self.group_name()
    }

    /// Parse a port back out of a `instance-<port>[.conf]` name.
    pub fn from_group_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix("instance-")?;
        let digits = digits.strip_suffix(".conf").unwrap_or(digits);
        let n: i64 = digits.parse().ok()?;
        Port::new(n).ok()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Port {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Port::new(value).map_err(serde::de::Error::custom)
    }
}

/// A port value outside `[1024, 65535]` (I5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPort(pub i64);

impl fmt::Display for InvalidPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {} is outside the valid range [1024, 65535]", self.0)
    }
}

impl std::error::Error for InvalidPort {}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
