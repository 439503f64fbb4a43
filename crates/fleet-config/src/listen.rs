//! Address family selection for the listening socket.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// IP family the console listens on when no explicit host is configured.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AddressFamily {
    /// Dual-stack wildcard `[::]`.
    #[default]
    Ipv6,
    /// IPv4 wildcard `0.0.0.0`.
    Ipv4,
}

impl AddressFamily {
    /// Wildcard address for this family.
    #[must_use]
    pub const fn unspecified(self) -> IpAddr {
        match self {
            Self::Ipv6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            Self::Ipv4 => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

/// Errors encountered while parsing an [`AddressFamily`] from text.
pub type AddressFamilyParseError = strum::ParseError;
