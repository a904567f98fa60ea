//! # Nodes
//!
//! A node carries its identity (NodeId, NodeClass, BrowseName) plus a
//! mutable attribute map. Nodes are shared as `Arc<Node>`; attribute
//! writes go through an interior lock so readers on other threads see a
//! consistent value per attribute.

use super::errors::NodeError;
use parking_lot::RwLock;
use shared_types::{
    access_level, AttributeId, DataTypeIds, DataValue, LocalizedText, NodeClass, NodeId,
    QualifiedName, Variant,
};
use std::collections::HashMap;

/// A node in the address space.
#[derive(Debug)]
pub struct Node {
    node_id: NodeId,
    node_class: NodeClass,
    browse_name: QualifiedName,
    attributes: RwLock<HashMap<AttributeId, DataValue>>,
}

impl Node {
    /// Create a node with only its identity and display name set.
    pub fn new(
        node_id: NodeId,
        node_class: NodeClass,
        browse_name: QualifiedName,
        display_name: LocalizedText,
    ) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert(AttributeId::DisplayName, DataValue::new(display_name));
        Self {
            node_id,
            node_class,
            browse_name,
            attributes: RwLock::new(attributes),
        }
    }

    /// An Object node named `name` in the node's own namespace.
    pub fn object(node_id: NodeId, name: &str) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self::new(node_id, NodeClass::Object, browse_name, LocalizedText::new(name))
            .with_attribute(AttributeId::EventNotifier, 0u8)
    }

    /// A readable and writable scalar Variable node.
    pub fn variable(node_id: NodeId, name: &str, value: impl Into<Variant>, data_type: NodeId) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self::new(node_id, NodeClass::Variable, browse_name, LocalizedText::new(name))
            .with_attribute(AttributeId::DataType, data_type)
            .with_attribute(AttributeId::ValueRank, -1i32)
            .with_attribute(AttributeId::Historizing, false)
            .with_access_level(access_level::CURRENT_READ | access_level::CURRENT_WRITE)
            .with_attribute(AttributeId::Value, value)
    }

    /// An executable Method node.
    pub fn method(node_id: NodeId, name: &str) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self::new(node_id, NodeClass::Method, browse_name, LocalizedText::new(name))
            .with_attribute(AttributeId::Executable, true)
            .with_attribute(AttributeId::UserExecutable, true)
    }

    /// Builder: set an attribute without access checks.
    pub fn with_attribute(self, attribute: AttributeId, value: impl Into<Variant>) -> Self {
        self.attributes
            .write()
            .insert(attribute, DataValue::new(value));
        self
    }

    /// Builder: set both AccessLevel and UserAccessLevel.
    pub fn with_access_level(self, level: u8) -> Self {
        self.with_attribute(AttributeId::AccessLevel, level)
            .with_attribute(AttributeId::UserAccessLevel, level)
    }

    /// The node's identifier.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The node's class.
    pub fn node_class(&self) -> NodeClass {
        self.node_class
    }

    /// The node's browse name.
    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }

    /// The node's display name.
    pub fn display_name(&self) -> LocalizedText {
        match self
            .attributes
            .read()
            .get(&AttributeId::DisplayName)
            .map(|dv| &dv.value)
        {
            Some(Variant::LocalizedText(text)) => (**text).clone(),
            _ => LocalizedText::new(self.browse_name.name.clone()),
        }
    }

    /// AccessLevel bits; CurrentRead only when unset.
    pub fn access_level(&self) -> u8 {
        self.attributes
            .read()
            .get(&AttributeId::AccessLevel)
            .and_then(|dv| dv.value.as_u8())
            .unwrap_or(access_level::CURRENT_READ)
    }

    /// The DataType of a Variable or VariableType, if set.
    pub fn data_type(&self) -> Option<NodeId> {
        self.attributes
            .read()
            .get(&AttributeId::DataType)
            .and_then(|dv| dv.value.as_node_id().cloned())
    }

    /// Whether the attribute is defined on this node.
    pub fn has_attribute(&self, attribute: AttributeId) -> bool {
        attribute.is_identity() || self.attributes.read().contains_key(&attribute)
    }

    /// Read an attribute.
    ///
    /// The Value attribute of a Variable requires the CurrentRead access bit.
    /// A Variable with no stored value reads as an empty Good value.
    pub fn read_attribute(&self, attribute: AttributeId) -> Result<DataValue, NodeError> {
        if !attribute.is_valid_for(self.node_class) {
            return Err(self.attribute_invalid(attribute));
        }

        match attribute {
            AttributeId::NodeId => Ok(DataValue::new(self.node_id.clone())),
            AttributeId::NodeClass => Ok(DataValue::new(self.node_class as i32)),
            AttributeId::BrowseName => Ok(DataValue::new(self.browse_name.clone())),
            AttributeId::Value => {
                if self.node_class == NodeClass::Variable
                    && self.access_level() & access_level::CURRENT_READ == 0
                {
                    return Err(NodeError::NotReadable(self.node_id.clone()));
                }
                Ok(self
                    .attributes
                    .read()
                    .get(&AttributeId::Value)
                    .cloned()
                    .unwrap_or_else(|| DataValue::new(Variant::Empty)))
            }
            _ => self
                .attributes
                .read()
                .get(&attribute)
                .cloned()
                .ok_or_else(|| self.attribute_invalid(attribute)),
        }
    }

    /// Write an attribute.
    ///
    /// Identity attributes are never writable. Writing the Value attribute
    /// requires the CurrentWrite access bit and a value whose built-in type
    /// matches the node's DataType (`BaseDataType` accepts any value).
    pub fn write_attribute(&self, attribute: AttributeId, value: DataValue) -> Result<(), NodeError> {
        if !attribute.is_valid_for(self.node_class) {
            return Err(self.attribute_invalid(attribute));
        }
        if attribute.is_identity() {
            return Err(self.not_writable(attribute));
        }

        if attribute == AttributeId::Value {
            if self.node_class == NodeClass::Variable
                && self.access_level() & access_level::CURRENT_WRITE == 0
            {
                return Err(self.not_writable(attribute));
            }
            self.check_data_type(&value.value)?;
        }

        self.attributes.write().insert(attribute, value);
        Ok(())
    }

    /// Replace the Value attribute without access checks. For server-side
    /// producers updating their own variables.
    pub fn set_value(&self, value: DataValue) {
        self.attributes.write().insert(AttributeId::Value, value);
    }

    fn check_data_type(&self, value: &Variant) -> Result<(), NodeError> {
        let expected = match self.data_type() {
            Some(dt) if dt != DataTypeIds::BASE_DATA_TYPE => dt,
            _ => return Ok(()),
        };
        if value.is_empty() {
            return Ok(());
        }
        let actual = value.data_type_id();
        if actual.as_ref() == Some(&expected) {
            Ok(())
        } else {
            Err(NodeError::TypeMismatch { expected, actual })
        }
    }

    fn attribute_invalid(&self, attribute: AttributeId) -> NodeError {
        NodeError::AttributeInvalid {
            attribute,
            node_class: self.node_class,
        }
    }

    fn not_writable(&self, attribute: AttributeId) -> NodeError {
        NodeError::NotWritable {
            node_id: self.node_id.clone(),
            attribute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::StatusCode;

    fn speed() -> Node {
        Node::variable(NodeId::string(2, "Speed"), "Speed", 10.0f64, DataTypeIds::DOUBLE)
    }

    #[test]
    fn test_identity_attributes() {
        let node = speed();
        let id = node.read_attribute(AttributeId::NodeId).unwrap();
        assert_eq!(id.value.as_node_id(), Some(&NodeId::string(2, "Speed")));
        let class = node.read_attribute(AttributeId::NodeClass).unwrap();
        assert_eq!(class.value, Variant::Int32(2));
        assert_eq!(node.browse_name().name, "Speed");
        assert_eq!(node.display_name().text, "Speed");
    }

    #[test]
    fn test_value_read_write() {
        let node = speed();
        node.write_attribute(AttributeId::Value, DataValue::new(42.5f64))
            .unwrap();
        let value = node.read_attribute(AttributeId::Value).unwrap();
        assert_eq!(value.value, Variant::Double(42.5));
    }

    #[test]
    fn test_attribute_invalid_for_class() {
        let node = Node::object(NodeId::numeric(2, 1), "Boiler");
        let err = node.read_attribute(AttributeId::Value).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_ATTRIBUTE_ID_INVALID);
    }

    #[test]
    fn test_unset_optional_attribute_is_invalid() {
        let node = speed();
        let err = node.read_attribute(AttributeId::ArrayDimensions).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_ATTRIBUTE_ID_INVALID);
    }

    #[test]
    fn test_identity_not_writable() {
        let node = speed();
        let err = node
            .write_attribute(AttributeId::BrowseName, DataValue::new("other"))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_NOT_WRITABLE);
    }

    #[test]
    fn test_access_level_enforced() {
        let read_only = speed().with_access_level(access_level::CURRENT_READ);
        let err = read_only
            .write_attribute(AttributeId::Value, DataValue::new(1.0f64))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_NOT_WRITABLE);

        let write_only = speed().with_access_level(access_level::CURRENT_WRITE);
        let err = write_only.read_attribute(AttributeId::Value).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_NOT_READABLE);
    }

    #[test]
    fn test_type_mismatch() {
        let node = speed();
        let err = node
            .write_attribute(AttributeId::Value, DataValue::new("fast"))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_TYPE_MISMATCH);
    }

    #[test]
    fn test_base_data_type_accepts_anything() {
        let node = Node::variable(NodeId::numeric(2, 9), "Any", 1i32, DataTypeIds::BASE_DATA_TYPE);
        node.write_attribute(AttributeId::Value, DataValue::new("text"))
            .unwrap();
        node.write_attribute(AttributeId::Value, DataValue::new(true))
            .unwrap();
    }

    #[test]
    fn test_method_attributes() {
        let node = Node::method(NodeId::numeric(2, 50), "Reset");
        let exec = node.read_attribute(AttributeId::Executable).unwrap();
        assert_eq!(exec.value, Variant::Boolean(true));
    }
}
