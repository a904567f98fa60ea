//! # Node Classes and Attributes
//!
//! NodeClass and attribute metadata from OPC UA Part 3 Section 5. The
//! type-system layer owns the full model; this module only carries what the
//! routing core needs to validate reads and writes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of a node. Values are the OPC UA bit-mask values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum NodeClass {
    /// No class known (e.g. the target of a foreign reference).
    Unspecified = 0,
    /// Object instance.
    Object = 1,
    /// Variable instance.
    Variable = 2,
    /// Method.
    Method = 4,
    /// Object type definition.
    ObjectType = 8,
    /// Variable type definition.
    VariableType = 16,
    /// Reference type definition.
    ReferenceType = 32,
    /// Data type definition.
    DataType = 64,
    /// View.
    View = 128,
}

impl NodeClass {
    /// Decode the bit value.
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Unspecified,
            1 => Self::Object,
            2 => Self::Variable,
            4 => Self::Method,
            8 => Self::ObjectType,
            16 => Self::VariableType,
            32 => Self::ReferenceType,
            64 => Self::DataType,
            128 => Self::View,
            _ => return None,
        })
    }
}

impl Default for NodeClass {
    fn default() -> Self {
        Self::Unspecified
    }
}

/// Attribute identifiers (OPC UA Part 6 Annex A.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
#[allow(missing_docs)]
pub enum AttributeId {
    NodeId = 1,
    NodeClass = 2,
    BrowseName = 3,
    DisplayName = 4,
    Description = 5,
    WriteMask = 6,
    UserWriteMask = 7,
    IsAbstract = 8,
    Symmetric = 9,
    InverseName = 10,
    ContainsNoLoops = 11,
    EventNotifier = 12,
    Value = 13,
    DataType = 14,
    ValueRank = 15,
    ArrayDimensions = 16,
    AccessLevel = 17,
    UserAccessLevel = 18,
    MinimumSamplingInterval = 19,
    Historizing = 20,
    Executable = 21,
    UserExecutable = 22,
}

impl AttributeId {
    /// Decode a raw attribute id from a request item.
    pub fn from_u32(value: u32) -> Option<Self> {
        use AttributeId::*;
        Some(match value {
            1 => NodeId,
            2 => NodeClass,
            3 => BrowseName,
            4 => DisplayName,
            5 => Description,
            6 => WriteMask,
            7 => UserWriteMask,
            8 => IsAbstract,
            9 => Symmetric,
            10 => InverseName,
            11 => ContainsNoLoops,
            12 => EventNotifier,
            13 => Value,
            14 => DataType,
            15 => ValueRank,
            16 => ArrayDimensions,
            17 => AccessLevel,
            18 => UserAccessLevel,
            19 => MinimumSamplingInterval,
            20 => Historizing,
            21 => Executable,
            22 => UserExecutable,
            _ => return None,
        })
    }

    /// Whether nodes of `class` carry this attribute.
    pub fn is_valid_for(self, class: crate::NodeClass) -> bool {
        use crate::NodeClass as C;
        use AttributeId::*;
        match self {
            NodeId | NodeClass | BrowseName | DisplayName | Description | WriteMask
            | UserWriteMask => true,
            IsAbstract => matches!(
                class,
                C::ObjectType | C::VariableType | C::ReferenceType | C::DataType
            ),
            Symmetric | InverseName => class == C::ReferenceType,
            ContainsNoLoops => class == C::View,
            EventNotifier => matches!(class, C::Object | C::View),
            Value | DataType | ValueRank | ArrayDimensions => {
                matches!(class, C::Variable | C::VariableType)
            }
            AccessLevel | UserAccessLevel | MinimumSamplingInterval | Historizing => {
                class == C::Variable
            }
            Executable | UserExecutable => class == C::Method,
        }
    }

    /// Identity attributes are fixed for the node's lifetime.
    pub fn is_identity(self) -> bool {
        matches!(
            self,
            AttributeId::NodeId | AttributeId::NodeClass | AttributeId::BrowseName
        )
    }
}

/// AccessLevel bits (OPC UA Part 3 Section 8.57).
pub mod access_level {
    /// The current value is readable.
    pub const CURRENT_READ: u8 = 0x01;
    /// The current value is writable.
    pub const CURRENT_WRITE: u8 = 0x02;
    /// History is readable.
    pub const HISTORY_READ: u8 = 0x04;
    /// History is writable.
    pub const HISTORY_WRITE: u8 = 0x08;
}

/// Namespace-qualified name, used for BrowseName.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index of the name.
    pub namespace_index: u16,
    /// Unqualified text.
    pub name: String,
}

impl QualifiedName {
    /// Create a qualified name.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// True for the empty name.
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

/// Human-readable text with an optional locale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale such as `en-US`.
    pub locale: Option<String>,
    /// The text.
    pub text: String,
}

impl LocalizedText {
    /// Text without a locale.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: text.into(),
        }
    }

    /// Text with a locale.
    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: text.into(),
        }
    }
}
