//! Structured data records and payload media formats.

/// Value carried by one [`DataRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Boolean(bool),
    /// UTF-8 string.
    String(String),
    /// Opaque bytes.
    Opaque(Vec<u8>),
    /// Nested records forming one object instance.
    ObjectInstance(Vec<DataRecord>),
}

/// One identified value in a structured payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    /// Resource or instance identifier this record describes.
    pub id: u16,
    /// Record value.
    pub value: DataValue,
}

impl DataRecord {
    /// Builds a record.
    #[must_use]
    pub const fn new(id: u16, value: DataValue) -> Self {
        Self { id, value }
    }

    /// Wraps `records` as the contents of object instance `id`.
    #[must_use]
    pub const fn object_instance(id: u16, records: Vec<Self>) -> Self {
        Self {
            id,
            value: DataValue::ObjectInstance(records),
        }
    }
}

/// Payload submitted with a write.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw text sent as plain text.
    Text(String),
    /// Structured records encoded by the engine.
    Records(Vec<DataRecord>),
}

/// Content format of a payload returned by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    /// Plain text.
    Text,
    /// Link format used by discovery.
    LinkFormat,
    /// Opaque bytes.
    Opaque,
    /// CBOR.
    Cbor,
    /// `SenML` JSON.
    SenmlJson,
    /// `SenML` CBOR.
    SenmlCbor,
    /// Type-length-value.
    Tlv,
    /// JSON.
    Json,
    /// Any other registered format number.
    Other(u16),
}

impl MediaFormat {
    /// Decodes a content-format number.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Text,
            40 => Self::LinkFormat,
            42 => Self::Opaque,
            60 => Self::Cbor,
            110 => Self::SenmlJson,
            112 => Self::SenmlCbor,
            11542 => Self::Tlv,
            11543 => Self::Json,
            other => Self::Other(other),
        }
    }

    /// Content-format number.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Text => 0,
            Self::LinkFormat => 40,
            Self::Opaque => 42,
            Self::Cbor => 60,
            Self::SenmlJson => 110,
            Self::SenmlCbor => 112,
            Self::Tlv => 11542,
            Self::Json => 11543,
            Self::Other(code) => code,
        }
    }

    /// Whether payloads in this format are printable text.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::Text | Self::LinkFormat | Self::SenmlJson | Self::Json
        )
    }
}
