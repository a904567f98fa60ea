//! # Variants and Data Values
//!
//! `Variant` holds attribute values; `DataValue` adds status and timestamps.
//! Encoding is out of scope: these are the decoded in-memory forms.

use crate::attributes::{LocalizedText, QualifiedName};
use crate::node_id::NodeId;
use crate::status::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A decoded attribute value.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Variant {
    #[default]
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    ByteString(Vec<u8>),
    NodeId(Box<NodeId>),
    StatusCode(StatusCode),
    QualifiedName(Box<QualifiedName>),
    LocalizedText(Box<LocalizedText>),
    /// One-dimensional array; elements share one built-in type.
    Array(Vec<Variant>),
}

impl Variant {
    /// NodeId of the built-in DataType (namespace 0) carried by this value.
    ///
    /// Arrays report their element type; empty values and empty arrays
    /// report `None`.
    pub fn data_type_id(&self) -> Option<NodeId> {
        let id = match self {
            Variant::Empty => return None,
            Variant::Boolean(_) => 1,
            Variant::SByte(_) => 2,
            Variant::Byte(_) => 3,
            Variant::Int16(_) => 4,
            Variant::UInt16(_) => 5,
            Variant::Int32(_) => 6,
            Variant::UInt32(_) => 7,
            Variant::Int64(_) => 8,
            Variant::UInt64(_) => 9,
            Variant::Float(_) => 10,
            Variant::Double(_) => 11,
            Variant::String(_) => 12,
            Variant::DateTime(_) => 13,
            Variant::Guid(_) => 14,
            Variant::ByteString(_) => 15,
            Variant::NodeId(_) => 17,
            Variant::StatusCode(_) => 19,
            Variant::QualifiedName(_) => 20,
            Variant::LocalizedText(_) => 21,
            Variant::Array(items) => return items.first().and_then(Variant::data_type_id),
        };
        Some(NodeId::numeric(0, id))
    }

    /// True for `Variant::Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// Extract an unsigned byte, widening from other small unsigned forms.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Variant::Byte(v) => Some(*v),
            Variant::UInt16(v) => u8::try_from(*v).ok(),
            Variant::UInt32(v) => u8::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Extract a NodeId.
    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Variant::NodeId(id) => Some(id),
            _ => None,
        }
    }
}

macro_rules! variant_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::$variant(value)
                }
            }
        )*
    };
}

variant_from! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Guid,
    StatusCode => StatusCode,
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<NodeId> for Variant {
    fn from(value: NodeId) -> Self {
        Variant::NodeId(Box::new(value))
    }
}

impl From<QualifiedName> for Variant {
    fn from(value: QualifiedName) -> Self {
        Variant::QualifiedName(Box::new(value))
    }
}

impl From<LocalizedText> for Variant {
    fn from(value: LocalizedText) -> Self {
        Variant::LocalizedText(Box::new(value))
    }
}

impl<T: Into<Variant>> From<Vec<T>> for Variant {
    fn from(values: Vec<T>) -> Self {
        Variant::Array(values.into_iter().map(Into::into).collect())
    }
}

/// A value with quality and timestamps, as returned by Read.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DataValue {
    /// The value; `Variant::Empty` when the status is Bad.
    pub value: Variant,
    /// Quality of the value.
    pub status: StatusCode,
    /// When the source produced the value.
    pub source_timestamp: Option<DateTime<Utc>>,
    /// When the server observed the value.
    pub server_timestamp: Option<DateTime<Utc>>,
}

impl DataValue {
    /// A Good value without timestamps.
    pub fn new(value: impl Into<Variant>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// A Good value stamped with the current time as both timestamps.
    pub fn now(value: impl Into<Variant>) -> Self {
        let now = Utc::now();
        Self {
            value: value.into(),
            status: StatusCode::GOOD,
            source_timestamp: Some(now),
            server_timestamp: Some(now),
        }
    }

    /// A value-less result carrying only a status.
    pub fn bad(status: StatusCode) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Status is Good.
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_ids() {
        assert_eq!(Variant::from(1.5f64).data_type_id(), Some(NodeId::numeric(0, 11)));
        assert_eq!(Variant::from("x").data_type_id(), Some(NodeId::numeric(0, 12)));
        assert_eq!(Variant::Empty.data_type_id(), None);
        assert_eq!(
            Variant::from(vec![1i32, 2, 3]).data_type_id(),
            Some(NodeId::numeric(0, 6))
        );
    }

    #[test]
    fn test_bad_data_value_has_no_value() {
        let dv = DataValue::bad(StatusCode::BAD_NODE_ID_UNKNOWN);
        assert!(dv.value.is_empty());
        assert!(!dv.is_good());
    }

    #[test]
    fn test_as_u8_narrowing() {
        assert_eq!(Variant::Byte(3).as_u8(), Some(3));
        assert_eq!(Variant::UInt32(300).as_u8(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(DataValue::new(42i32)).unwrap();
        assert_eq!(json["value"]["Int32"], 42);
    }
}
