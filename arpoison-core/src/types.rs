//! Common types used throughout arpoison

use std::fmt;
use std::str::FromStr;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff, 0xff, 0xff, 0xff, 0xff, 0xff])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00, 0x00, 0x00, 0x00, 0x00, 0x00])
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// The unresolved placeholder used in who-has requests
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 6]
    }

    /// Read a MAC address from the first 6 bytes of a slice
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() < 6 {
            return None;
        }
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&slice[..6]);
        Some(Self(bytes))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(crate::Error::parsing("Invalid MAC address format"));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| crate::Error::parsing("Invalid MAC address hex"))?;
        }

        Ok(MacAddr(bytes))
    }
}

/// Which ARP caches the engine rewrites.
///
/// `Full` poisons both the victims and the gateway; `Half` poisons only
/// the victims, leaving the gateway's cache untouched (no duplicate
/// traffic toward the router that a monitor could flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplexMode {
    #[default]
    Full,
    Half,
}

impl DuplexMode {
    pub fn is_half(&self) -> bool {
        matches!(self, DuplexMode::Half)
    }
}

impl fmt::Display for DuplexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplexMode::Full => write!(f, "Full"),
            DuplexMode::Half => write!(f, "Half"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display() {
        let mac = MacAddr([0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);
        assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
    }

    #[test]
    fn test_mac_from_str() {
        let mac: MacAddr = "de:ad:be:ef:00:01".parse().unwrap();
        assert_eq!(mac.octets(), [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);

        assert!("de:ad:be:ef".parse::<MacAddr>().is_err());
        assert!("zz:zz:zz:zz:zz:zz".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_mac_zero_and_broadcast() {
        assert!(MacAddr::zero().is_zero());
        assert!(!MacAddr::broadcast().is_zero());
        assert_eq!(MacAddr::broadcast().octets(), [0xff; 6]);
    }

    #[test]
    fn test_mac_from_slice() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mac = MacAddr::from_slice(&data).unwrap();
        assert_eq!(mac.octets(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        assert!(MacAddr::from_slice(&data[..5]).is_none());
    }

    #[test]
    fn test_duplex_default_is_full() {
        assert_eq!(DuplexMode::default(), DuplexMode::Full);
        assert!(!DuplexMode::Full.is_half());
        assert!(DuplexMode::Half.is_half());
    }
}
