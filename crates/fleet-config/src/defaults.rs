use crate::listen::AddressFamily;
use crate::logging::LogFormat;

/// Default UDP port for the device-management protocol.
pub const DEFAULT_LISTEN_PORT: u16 = 5683;

/// Default block size for block-wise transfers, in bytes.
pub const DEFAULT_BLOCK_SIZE: u16 = 1024;

/// Block sizes the protocol allows.
pub const ALLOWED_BLOCK_SIZES: [u16; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default address family for the listening socket.
#[must_use]
pub const fn default_address_family() -> AddressFamily {
    AddressFamily::Ipv6
}
