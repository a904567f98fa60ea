//! Well-known NodeIds from the base namespace (OPC UA Part 6 NodeIds.csv).

use crate::node_id::NodeId;

/// Standard ReferenceType NodeIds.
pub struct ReferenceTypeIds;

impl ReferenceTypeIds {
    /// `References` (abstract root of all reference types).
    pub const REFERENCES: NodeId = NodeId::numeric(0, 31);
    /// `NonHierarchicalReferences`.
    pub const NON_HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 32);
    /// `HierarchicalReferences`.
    pub const HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 33);
    /// `HasChild`.
    pub const HAS_CHILD: NodeId = NodeId::numeric(0, 34);
    /// `Organizes`.
    pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);
    /// `HasEventSource`.
    pub const HAS_EVENT_SOURCE: NodeId = NodeId::numeric(0, 36);
    /// `HasModellingRule`.
    pub const HAS_MODELLING_RULE: NodeId = NodeId::numeric(0, 37);
    /// `HasTypeDefinition`.
    pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);
    /// `HasSubtype`.
    pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);
    /// `HasProperty`.
    pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);
    /// `HasComponent`.
    pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);
    /// `HasNotifier`.
    pub const HAS_NOTIFIER: NodeId = NodeId::numeric(0, 48);
}

/// Standard DataType NodeIds.
pub struct DataTypeIds;

impl DataTypeIds {
    /// `BaseDataType`: accepts a value of any type.
    pub const BASE_DATA_TYPE: NodeId = NodeId::numeric(0, 24);
    /// `Boolean`.
    pub const BOOLEAN: NodeId = NodeId::numeric(0, 1);
    /// `Int32`.
    pub const INT32: NodeId = NodeId::numeric(0, 6);
    /// `Double`.
    pub const DOUBLE: NodeId = NodeId::numeric(0, 11);
    /// `String`.
    pub const STRING: NodeId = NodeId::numeric(0, 12);
}

/// Standard Object NodeIds.
pub struct ObjectIds;

impl ObjectIds {
    /// `Root`.
    pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);
    /// `Objects`.
    pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);
    /// `Types`.
    pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);
    /// `Server`.
    pub const SERVER: NodeId = NodeId::numeric(0, 2253);
}

/// Standard ObjectType NodeIds.
pub struct ObjectTypeIds;

impl ObjectTypeIds {
    /// `BaseObjectType`.
    pub const BASE_OBJECT_TYPE: NodeId = NodeId::numeric(0, 58);
    /// `FolderType`.
    pub const FOLDER_TYPE: NodeId = NodeId::numeric(0, 61);
}
