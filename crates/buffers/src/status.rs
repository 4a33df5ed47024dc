//! Operation status codes.

/// Outcome of the most recent operation on a buffer or transport adapter.
///
/// Every operation overwrites the relevant status, including successful
/// ones, so the accessor always reflects the last call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// The operation completed.
    #[default]
    Success,
    /// A read could not be satisfied from the remaining bytes.
    EndOfData,
    /// A write needed more space than the buffer could provide.
    OutOfMemory,
    /// A cursor position, length, or argument was out of range.
    InvalidArgument,
    /// Bytes did not form a valid sequence in the requested encoding.
    UnsupportedEncoding,
    /// The underlying transport failed.
    IoFailure,
}

impl Status {
    /// Returns `true` for [`Status::Success`].
    pub fn is_ok(self) -> bool {
        self == Status::Success
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::EndOfData => write!(f, "end of data"),
            Status::OutOfMemory => write!(f, "out of memory"),
            Status::InvalidArgument => write!(f, "invalid argument"),
            Status::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Status::IoFailure => write!(f, "i/o failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_is_ok() {
        assert!(Status::Success.is_ok());
        assert!(!Status::EndOfData.is_ok());
        assert!(!Status::IoFailure.is_ok());
    }

    #[test]
    fn default_is_success() {
        assert_eq!(Status::default(), Status::Success);
    }
}
