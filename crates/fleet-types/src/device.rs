//! Registered device records and the registry that indexes them.
//!
//! The protocol engine owns the registry and mutates it as devices register,
//! update, and deregister. The console only reads it to list devices and to
//! dump a record when a registration event arrives.

use std::collections::BTreeMap;
use std::fmt;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Numeric handle the engine assigns to a registered device.
pub type DeviceId = u16;

/// Protocol version announced by a device at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// The registration carried no version.
    #[default]
    Missing,
    /// The registration carried a version the engine does not know.
    Unrecognized,
    /// Version 1.0.
    V1_0,
    /// Version 1.1.
    V1_1,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "Missing",
            Self::Unrecognized => "Unrecognized",
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
        })
    }
}

/// One transport or delivery capability a device supports.
///
/// Declaration order is the display order used by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Binding {
    /// Datagram transport.
    #[strum(serialize = "UDP")]
    Udp,
    /// Stream transport.
    #[strum(serialize = "TCP")]
    Tcp,
    /// Short-message transport.
    #[strum(serialize = "SMS")]
    Sms,
    /// Non-IP transport.
    #[strum(serialize = "Non-IP")]
    NonIp,
    /// Queued delivery for sleepy devices.
    #[strum(serialize = "queue mode")]
    Queue,
}

impl Binding {
    /// Wire bit for this capability.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Udp => 0x01,
            Self::Tcp => 0x02,
            Self::Sms => 0x04,
            Self::NonIp => 0x08,
            Self::Queue => 0x10,
        }
    }
}

/// Set of [`Binding`] capabilities.
///
/// The engine exchanges the set as a bitmask; the console only ever iterates
/// named members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BindingSet {
    bits: u8,
}

impl BindingSet {
    /// Empty set ("not specified").
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Builds a set from its wire encoding, ignoring unknown bits.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        let known = Binding::iter().fold(0, |mask, binding| mask | binding.bit());
        Self { bits: bits & known }
    }

    /// Wire encoding of the set.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Returns the set with `binding` added.
    #[must_use]
    pub const fn with(self, binding: Binding) -> Self {
        Self {
            bits: self.bits | binding.bit(),
        }
    }

    /// Whether `binding` is a member.
    #[must_use]
    pub const fn contains(self, binding: Binding) -> bool {
        self.bits & binding.bit() != 0
    }

    /// Whether no capability is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Members in display order.
    pub fn iter(self) -> impl Iterator<Item = Binding> {
        Binding::iter().filter(move |binding| self.contains(*binding))
    }
}

impl FromIterator<Binding> for BindingSet {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Display for BindingSet {
    /// Comma-joined labels, or `Not specified` for the empty set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Not specified");
        }
        let labels: Vec<String> = self.iter().map(|binding| binding.to_string()).collect();
        f.write_str(&labels.join(", "))
    }
}

/// One object exposed by a device, with the instances it announced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Object identifier.
    pub id: u16,
    /// Declared `major.minor` object version, when announced.
    pub version: Option<(u8, u8)>,
    /// Instance identifiers in announcement order.
    pub instances: Vec<u16>,
}

impl ObjectEntry {
    /// Builds an entry with no version and no instances.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            version: None,
            instances: Vec::new(),
        }
    }

    /// Returns the entry with a declared version.
    #[must_use]
    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.version = Some((major, minor));
        self
    }

    /// Returns the entry with the given instances.
    #[must_use]
    pub fn with_instances(mut self, instances: impl IntoIterator<Item = u16>) -> Self {
        self.instances = instances.into_iter().collect();
        self
    }

    /// Version to display; `0.0` counts as undeclared.
    #[must_use]
    pub fn declared_version(&self) -> Option<(u8, u8)> {
        self.version.filter(|&(major, minor)| major != 0 || minor != 0)
    }
}

/// Registration record for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    /// Engine-assigned handle.
    pub id: DeviceId,
    /// Endpoint name announced by the device.
    pub name: String,
    /// Announced protocol version.
    pub version: ProtocolVersion,
    /// Supported transport and delivery capabilities.
    pub binding: BindingSet,
    /// Phone-number style identifier for short-message transport.
    pub msisdn: Option<String>,
    /// Alternate path prefix for the device's objects.
    pub alternate_path: Option<String>,
    /// Registration lifetime in seconds.
    pub lifetime: u32,
    /// Exposed objects in announcement order.
    pub objects: Vec<ObjectEntry>,
}

impl Device {
    /// Builds a record with the given handle and name.
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Registered devices indexed by handle.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<DeviceId, Device>,
}

impl DeviceRegistry {
    /// Builds an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
        }
    }

    /// Inserts or replaces a record, returning the previous one.
    pub fn insert(&mut self, device: Device) -> Option<Device> {
        self.devices.insert(device.id, device)
    }

    /// Looks up a record by handle.
    #[must_use]
    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Looks up a record by handle for mutation.
    pub fn get_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(&id)
    }

    /// Removes a record.
    pub fn remove(&mut self, id: DeviceId) -> Option<Device> {
        self.devices.remove(&id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.contains_key(&id)
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Records in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_labels_follow_declaration_order() {
        let set: BindingSet = [Binding::Queue, Binding::Udp].into_iter().collect();
        assert_eq!(set.to_string(), "UDP, queue mode");
        assert_eq!(set.bits(), 0x11);
    }

    #[test]
    fn empty_binding_is_not_specified() {
        assert_eq!(BindingSet::empty().to_string(), "Not specified");
    }

    #[test]
    fn unknown_binding_bits_are_dropped() {
        let set = BindingSet::from_bits(0xE4);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Binding::Sms]);
    }

    #[test]
    fn zero_object_version_counts_as_undeclared() {
        assert_eq!(ObjectEntry::new(3).with_version(0, 0).declared_version(), None);
        assert_eq!(
            ObjectEntry::new(3).with_version(1, 1).declared_version(),
            Some((1, 1))
        );
    }

    #[test]
    fn registry_iterates_by_handle() {
        let mut registry = DeviceRegistry::new();
        registry.insert(Device::new(4, "b"));
        registry.insert(Device::new(1, "a"));
        let ids: Vec<_> = registry.iter().map(|device| device.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(registry.remove(4).is_some());
        assert!(!registry.contains(4));
    }
}
