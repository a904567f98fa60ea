//! # Status Codes
//!
//! The subset of OPC UA Part 4 / Part 6 status codes produced by the
//! address-space routing core. The top two bits carry the severity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-bit OPC UA status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(pub u32);

const SEVERITY_MASK: u32 = 0xC000_0000;
const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;
const SEVERITY_BAD: u32 = 0x8000_0000;

macro_rules! status_codes {
    ($($name:ident = $value:literal;)*) => {
        impl StatusCode {
            $(
                #[allow(missing_docs)]
                pub const $name: StatusCode = StatusCode($value);
            )*

            /// Symbolic name, if the code is one of the known constants.
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

status_codes! {
    GOOD = 0x0000_0000;
    BAD_UNEXPECTED_ERROR = 0x8001_0000;
    BAD_INTERNAL_ERROR = 0x8002_0000;
    BAD_NOTHING_TO_DO = 0x800F_0000;
    BAD_TOO_MANY_OPERATIONS = 0x8010_0000;
    BAD_USER_ACCESS_DENIED = 0x801F_0000;
    BAD_NODE_ID_INVALID = 0x8033_0000;
    BAD_NODE_ID_UNKNOWN = 0x8034_0000;
    BAD_ATTRIBUTE_ID_INVALID = 0x8035_0000;
    BAD_INDEX_RANGE_INVALID = 0x8036_0000;
    BAD_INDEX_RANGE_NO_DATA = 0x8037_0000;
    BAD_DATA_ENCODING_INVALID = 0x8038_0000;
    BAD_NOT_READABLE = 0x803A_0000;
    BAD_NOT_WRITABLE = 0x803B_0000;
    BAD_NOT_SUPPORTED = 0x803D_0000;
    BAD_NOT_FOUND = 0x803E_0000;
    BAD_NOT_IMPLEMENTED = 0x8040_0000;
    BAD_MONITORED_ITEM_ID_INVALID = 0x8042_0000;
    BAD_REFERENCE_TYPE_ID_INVALID = 0x804C_0000;
    BAD_PARENT_NODE_ID_INVALID = 0x805B_0000;
    BAD_NODE_ID_EXISTS = 0x805E_0000;
    BAD_SOURCE_NODE_ID_INVALID = 0x8064_0000;
    BAD_TARGET_NODE_ID_INVALID = 0x8065_0000;
    BAD_VIEW_ID_UNKNOWN = 0x806B_0000;
    BAD_HISTORY_OPERATION_UNSUPPORTED = 0x8072_0000;
    BAD_TYPE_MISMATCH = 0x8074_0000;
    BAD_METHOD_INVALID = 0x8075_0000;
    BAD_ARGUMENTS_MISSING = 0x8076_0000;
    BAD_INVALID_ARGUMENT = 0x80AB_0000;
    BAD_TOO_MANY_ARGUMENTS = 0x80E5_0000;
    BAD_NOT_EXECUTABLE = 0x8111_0000;
}

impl StatusCode {
    /// Severity is Good.
    pub fn is_good(&self) -> bool {
        self.0 & SEVERITY_MASK == 0
    }

    /// Severity is Uncertain.
    pub fn is_uncertain(&self) -> bool {
        self.0 & SEVERITY_MASK == SEVERITY_UNCERTAIN
    }

    /// Severity is Bad.
    pub fn is_bad(&self) -> bool {
        self.0 & SEVERITY_BAD != 0
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::GOOD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08X})", name, self.0),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}
