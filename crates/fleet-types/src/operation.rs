//! Device operations and the path shapes each one accepts.

use std::fmt;

use crate::Uri;

/// Operation the console can submit to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read a value.
    Read,
    /// Discover attributes and sub-paths.
    Discover,
    /// Replace or partially update a value.
    Write,
    /// Set or clear observation attributes.
    WriteAttributes,
    /// Execute a resource.
    Execute,
    /// Create an object instance.
    Create,
    /// Delete an object instance.
    Delete,
    /// Start observing a path.
    Observe,
    /// Stop observing a path.
    CancelObserve,
}

impl Operation {
    /// Whether `uri` has a shape this operation may target.
    ///
    /// Create never targets a resource. Delete targets exactly an object
    /// instance. Execute targets a resource, never a resource instance.
    #[must_use]
    pub const fn accepts(self, uri: &Uri) -> bool {
        match self {
            Self::Create => uri.resource_id().is_none(),
            Self::Delete => uri.instance_id().is_some() && uri.resource_id().is_none(),
            Self::Execute => uri.resource_id().is_some() && uri.resource_instance_id().is_none(),
            Self::Read
            | Self::Discover
            | Self::Write
            | Self::WriteAttributes
            | Self::Observe
            | Self::CancelObserve => true,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Discover => "discover",
            Self::Write => "write",
            Self::WriteAttributes => "write-attributes",
            Self::Execute => "execute",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Observe => "observe",
            Self::CancelObserve => "cancel-observe",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Operation::Create, Uri::object(1024), true)]
    #[case(Operation::Create, Uri::instance(1024, 7), true)]
    #[case(Operation::Create, Uri::resource(1024, 7, 1), false)]
    #[case(Operation::Delete, Uri::object(3), false)]
    #[case(Operation::Delete, Uri::instance(3, 0), true)]
    #[case(Operation::Delete, Uri::resource(3, 0, 1), false)]
    #[case(Operation::Execute, Uri::instance(3, 0), false)]
    #[case(Operation::Execute, Uri::resource(3, 0, 4), true)]
    #[case(Operation::Execute, Uri::resource_instance(3, 0, 4, 1), false)]
    #[case(Operation::Read, Uri::resource_instance(3, 0, 4, 1), true)]
    fn path_legality(#[case] operation: Operation, #[case] uri: Uri, #[case] accepted: bool) {
        assert_eq!(operation.accepts(&uri), accepted);
    }
}
