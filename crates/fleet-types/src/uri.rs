//! Hierarchical resource paths (`/object/instance/resource/resource-instance`).
//!
//! A path names between one and four levels. Each level is a non-negative
//! integer strictly below [`MAX_ID`]; the value `MAX_ID` itself is reserved by
//! protocol engines to mean "unset". A more specific level can only be present
//! when every less specific level is present, and the builder methods below
//! make any other shape unrepresentable.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reserved identifier value marking an unset path level.
pub const MAX_ID: u16 = u16::MAX;

/// Resource path addressing device-exposed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri {
    object: u16,
    instance: Option<u16>,
    resource: Option<u16>,
    resource_instance: Option<u16>,
}

impl Uri {
    /// Builds an object-level path.
    #[must_use]
    pub const fn object(object: u16) -> Self {
        Self {
            object,
            instance: None,
            resource: None,
            resource_instance: None,
        }
    }

    /// Builds an object-instance path.
    #[must_use]
    pub const fn instance(object: u16, instance: u16) -> Self {
        Self {
            object,
            instance: Some(instance),
            resource: None,
            resource_instance: None,
        }
    }

    /// Builds a resource path.
    #[must_use]
    pub const fn resource(object: u16, instance: u16, resource: u16) -> Self {
        Self {
            object,
            instance: Some(instance),
            resource: Some(resource),
            resource_instance: None,
        }
    }

    /// Builds a resource-instance path.
    #[must_use]
    pub const fn resource_instance(
        object: u16,
        instance: u16,
        resource: u16,
        resource_instance: u16,
    ) -> Self {
        Self {
            object,
            instance: Some(instance),
            resource: Some(resource),
            resource_instance: Some(resource_instance),
        }
    }

    /// Object identifier.
    #[must_use]
    pub const fn object_id(&self) -> u16 {
        self.object
    }

    /// Object-instance identifier, when set.
    #[must_use]
    pub const fn instance_id(&self) -> Option<u16> {
        self.instance
    }

    /// Resource identifier, when set.
    #[must_use]
    pub const fn resource_id(&self) -> Option<u16> {
        self.resource
    }

    /// Resource-instance identifier, when set.
    #[must_use]
    pub const fn resource_instance_id(&self) -> Option<u16> {
        self.resource_instance
    }

    /// Number of levels present (1 to 4).
    #[must_use]
    pub const fn depth(&self) -> usize {
        if self.resource_instance.is_some() {
            4
        } else if self.resource.is_some() {
            3
        } else if self.instance.is_some() {
            2
        } else {
            1
        }
    }

    /// Returns the object-level path containing this one.
    #[must_use]
    pub const fn to_object(&self) -> Self {
        Self::object(self.object)
    }

    fn from_levels(levels: &[u16]) -> Result<Self, UriParseError> {
        match *levels {
            [object] => Ok(Self::object(object)),
            [object, instance] => Ok(Self::instance(object, instance)),
            [object, instance, resource] => Ok(Self::resource(object, instance, resource)),
            [object, instance, resource, resource_instance] => Ok(Self::resource_instance(
                object,
                instance,
                resource,
                resource_instance,
            )),
            _ => Err(UriParseError::TooManyLevels),
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.object)?;
        for level in [self.instance, self.resource, self.resource_instance]
            .into_iter()
            .flatten()
        {
            write!(f, "/{level}")?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = UriParseError;

    /// Parses `/<object>[/<instance>[/<resource>[/<resource-instance>]]]`.
    ///
    /// A single trailing slash is tolerated (`/3/` names object 3).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rooted = input
            .strip_prefix('/')
            .ok_or(UriParseError::MissingLeadingSlash)?;
        let body = rooted.strip_suffix('/').unwrap_or(rooted);
        if body.is_empty() {
            return Err(UriParseError::Empty);
        }

        let mut levels = Vec::with_capacity(4);
        for segment in body.split('/') {
            if levels.len() == 4 {
                return Err(UriParseError::TooManyLevels);
            }
            levels.push(parse_level(segment)?);
        }
        Self::from_levels(&levels)
    }
}

fn parse_level(segment: &str) -> Result<u16, UriParseError> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(UriParseError::InvalidLevel {
            segment: segment.to_owned(),
        });
    }
    match segment.parse::<u32>() {
        Ok(value) if value < u32::from(MAX_ID) => {
            u16::try_from(value).map_err(|_| UriParseError::OutOfRange {
                segment: segment.to_owned(),
            })
        }
        _ => Err(UriParseError::OutOfRange {
            segment: segment.to_owned(),
        }),
    }
}

/// Errors raised while parsing a [`Uri`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriParseError {
    /// Path did not begin with `/`.
    #[error("resource path must start with '/'")]
    MissingLeadingSlash,
    /// Path named no levels at all.
    #[error("resource path names no object")]
    Empty,
    /// A level was not a decimal integer.
    #[error("invalid path level '{segment}'")]
    InvalidLevel {
        /// Offending text.
        segment: String,
    },
    /// A level was at or above [`MAX_ID`].
    #[error("path level '{segment}' is out of range")]
    OutOfRange {
        /// Offending text.
        segment: String,
    },
    /// More than four levels were supplied.
    #[error("resource path has more than four levels")]
    TooManyLevels,
}
