//! Sparse updates to observation attributes.
//!
//! An [`AttributeSet`] either sets the time attributes, sets the value
//! attributes, or clears every attribute. The three constructors are the only
//! way to build one, so a single update never mixes these shapes.

use std::collections::BTreeSet;

use strum::{EnumIter, IntoEnumIterator};

/// Observation attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum AttributeKind {
    /// Minimum period between notifications, in seconds.
    MinPeriod,
    /// Maximum period between notifications, in seconds.
    MaxPeriod,
    /// Notify when the value rises above this threshold.
    GreaterThan,
    /// Notify when the value falls below this threshold.
    LessThan,
    /// Notify when the value moves by at least this step.
    Step,
}

impl AttributeKind {
    /// Wire flag for this attribute.
    #[must_use]
    pub const fn flag(self) -> u8 {
        match self {
            Self::MinPeriod => 0x01,
            Self::MaxPeriod => 0x02,
            Self::GreaterThan => 0x04,
            Self::LessThan => 0x08,
            Self::Step => 0x10,
        }
    }
}

/// Observation attribute update.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet {
    to_set: BTreeSet<AttributeKind>,
    to_clear: BTreeSet<AttributeKind>,
    min_period: Option<u32>,
    max_period: Option<u32>,
    less_than: Option<f64>,
    greater_than: Option<f64>,
    step: Option<f64>,
}

impl AttributeSet {
    /// Sets both notification periods.
    #[must_use]
    pub fn time(min_period: u32, max_period: u32) -> Self {
        Self {
            to_set: BTreeSet::from([AttributeKind::MinPeriod, AttributeKind::MaxPeriod]),
            min_period: Some(min_period),
            max_period: Some(max_period),
            ..Self::blank()
        }
    }

    /// Sets the value thresholds and, optionally, the step.
    #[must_use]
    pub fn value(less_than: f64, greater_than: f64, step: Option<f64>) -> Self {
        let mut to_set = BTreeSet::from([AttributeKind::LessThan, AttributeKind::GreaterThan]);
        if step.is_some() {
            to_set.insert(AttributeKind::Step);
        }
        Self {
            to_set,
            less_than: Some(less_than),
            greater_than: Some(greater_than),
            step,
            ..Self::blank()
        }
    }

    /// Clears every attribute.
    #[must_use]
    pub fn clear_all() -> Self {
        Self {
            to_clear: AttributeKind::iter().collect(),
            ..Self::blank()
        }
    }

    const fn blank() -> Self {
        Self {
            to_set: BTreeSet::new(),
            to_clear: BTreeSet::new(),
            min_period: None,
            max_period: None,
            less_than: None,
            greater_than: None,
            step: None,
        }
    }

    /// Attributes being set.
    #[must_use]
    pub const fn to_set(&self) -> &BTreeSet<AttributeKind> {
        &self.to_set
    }

    /// Attributes being cleared.
    #[must_use]
    pub const fn to_clear(&self) -> &BTreeSet<AttributeKind> {
        &self.to_clear
    }

    /// Whether `kind` is being set.
    #[must_use]
    pub fn sets(&self, kind: AttributeKind) -> bool {
        self.to_set.contains(&kind)
    }

    /// Wire flags of the attributes being set.
    #[must_use]
    pub fn set_flags(&self) -> u8 {
        self.to_set.iter().fold(0, |mask, kind| mask | kind.flag())
    }

    /// Wire flags of the attributes being cleared.
    #[must_use]
    pub fn clear_flags(&self) -> u8 {
        self.to_clear.iter().fold(0, |mask, kind| mask | kind.flag())
    }

    /// Minimum period, when being set.
    #[must_use]
    pub const fn min_period(&self) -> Option<u32> {
        self.min_period
    }

    /// Maximum period, when being set.
    #[must_use]
    pub const fn max_period(&self) -> Option<u32> {
        self.max_period
    }

    /// Less-than threshold, when being set.
    #[must_use]
    pub const fn less_than(&self) -> Option<f64> {
        self.less_than
    }

    /// Greater-than threshold, when being set.
    #[must_use]
    pub const fn greater_than(&self) -> Option<f64> {
        self.greater_than
    }

    /// Step, when being set.
    #[must_use]
    pub const fn step(&self) -> Option<f64> {
        self.step
    }
}
