//! # Node Identifiers
//!
//! `NodeId` and `ExpandedNodeId` as described in OPC UA Part 3 Section 8.2.
//!
//! Both compare and hash by value. The namespace index is part of identity:
//! `ns=1;i=5` and `ns=2;i=5` are different nodes.

use crate::errors::ParseNodeIdError;
use crate::namespace::NamespaceTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The identifier part of a `NodeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identifier {
    /// Numeric identifier (`i=`).
    Numeric(u32),
    /// String identifier (`s=`).
    String(String),
    /// GUID identifier (`g=`).
    Guid(Uuid),
    /// Opaque byte-string identifier (`b=`).
    Opaque(Vec<u8>),
}

/// A server-local node identifier: namespace index + identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    /// Index into the server's namespace table.
    pub namespace: u16,
    /// Identifier within the namespace.
    pub identifier: Identifier,
}

impl NodeId {
    /// The null NodeId (`ns=0;i=0`).
    pub const NULL: NodeId = NodeId {
        namespace: 0,
        identifier: Identifier::Numeric(0),
    };

    /// Create a numeric NodeId.
    pub const fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    /// Create a string NodeId.
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    /// Create a GUID NodeId.
    pub fn guid(namespace: u16, value: Uuid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(value),
        }
    }

    /// Create an opaque NodeId.
    pub fn opaque(namespace: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(value.into()),
        }
    }

    /// True for the null value of any identifier type in namespace 0.
    pub fn is_null(&self) -> bool {
        if self.namespace != 0 {
            return false;
        }
        match &self.identifier {
            Identifier::Numeric(v) => *v == 0,
            Identifier::String(s) => s.is_empty(),
            Identifier::Guid(g) => g.is_nil(),
            Identifier::Opaque(b) => b.is_empty(),
        }
    }

    /// Widen into a local `ExpandedNodeId`.
    pub fn expanded(&self) -> ExpandedNodeId {
        ExpandedNodeId::from(self.clone())
    }

    fn fmt_identifier(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Identifier::Numeric(v) => write!(f, "i={}", v),
            Identifier::String(s) => write!(f, "s={}", s),
            Identifier::Guid(g) => write!(f, "g={}", g),
            Identifier::Opaque(b) => write!(f, "b={}", hex::encode(b)),
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        self.fmt_identifier(f)
    }
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, rest) = match s.strip_prefix("ns=") {
            Some(tail) => {
                let (ns, rest) = tail
                    .split_once(';')
                    .ok_or_else(|| ParseNodeIdError::Malformed(s.to_string()))?;
                let ns = ns
                    .parse::<u16>()
                    .map_err(|_| ParseNodeIdError::InvalidNamespace(ns.to_string()))?;
                (ns, rest)
            }
            None => (0, s),
        };

        parse_identifier(rest)
            .map(|identifier| NodeId {
                namespace,
                identifier,
            })
            .ok_or_else(|| ParseNodeIdError::Malformed(s.to_string()))
    }
}

fn parse_identifier(s: &str) -> Option<Identifier> {
    let (kind, value) = s.split_once('=')?;
    match kind {
        "i" => value.parse().ok().map(Identifier::Numeric),
        "s" => Some(Identifier::String(value.to_string())),
        "g" => Uuid::parse_str(value).ok().map(Identifier::Guid),
        "b" => hex::decode(value).ok().map(Identifier::Opaque),
        _ => None,
    }
}

/// A NodeId that may live in a foreign namespace or on a remote server.
///
/// An `ExpandedNodeId` only resolves to a local `NodeId` when its server
/// index is 0 and its namespace URI, if any, is registered locally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    /// The wrapped NodeId. Its namespace index is ignored when
    /// `namespace_uri` is set.
    pub node_id: NodeId,
    /// Namespace URI overriding the index.
    pub namespace_uri: Option<String>,
    /// Index into the server table; 0 means this server.
    pub server_index: u32,
}

impl ExpandedNodeId {
    /// The null ExpandedNodeId.
    pub const NULL: ExpandedNodeId = ExpandedNodeId {
        node_id: NodeId::NULL,
        namespace_uri: None,
        server_index: 0,
    };

    /// Reference a node by namespace URI instead of index.
    pub fn with_namespace_uri(node_id: NodeId, namespace_uri: impl Into<String>) -> Self {
        Self {
            node_id,
            namespace_uri: Some(namespace_uri.into()),
            server_index: 0,
        }
    }

    /// Reference a node on a remote server.
    pub fn remote(node_id: NodeId, server_index: u32) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index,
        }
    }

    /// True when the node lives on this server.
    pub fn is_local(&self) -> bool {
        self.server_index == 0
    }

    /// True when this wraps a null NodeId with no URI or server.
    pub fn is_null(&self) -> bool {
        self.node_id.is_null() && self.namespace_uri.is_none() && self.server_index == 0
    }

    /// Resolve to a local NodeId through the namespace table.
    pub fn to_local(&self, namespaces: &NamespaceTable) -> Option<NodeId> {
        if !self.is_local() {
            return None;
        }
        match &self.namespace_uri {
            None => Some(self.node_id.clone()),
            Some(uri) => namespaces.index_of(uri).map(|namespace| NodeId {
                namespace,
                identifier: self.node_id.identifier.clone(),
            }),
        }
    }
}

impl Default for ExpandedNodeId {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }
}

impl From<&NodeId> for ExpandedNodeId {
    fn from(node_id: &NodeId) -> Self {
        Self::from(node_id.clone())
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace_uri {
            Some(uri) => {
                write!(f, "nsu={};", uri)?;
                self.node_id.fmt_identifier(f)
            }
            None => write!(f, "{}", self.node_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_is_part_of_identity() {
        assert_ne!(NodeId::numeric(1, 5), NodeId::numeric(2, 5));
        assert_eq!(NodeId::numeric(1, 5), NodeId::numeric(1, 5));
    }

    #[test]
    fn test_display_omits_namespace_zero() {
        assert_eq!(NodeId::numeric(0, 85).to_string(), "i=85");
        assert_eq!(NodeId::string(2, "Boiler").to_string(), "ns=2;s=Boiler");
        assert_eq!(NodeId::opaque(1, vec![0xde, 0xad]).to_string(), "ns=1;b=dead");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("i=2253".parse::<NodeId>().unwrap(), NodeId::numeric(0, 2253));
        assert_eq!(
            "ns=3;s=Pump.Speed".parse::<NodeId>().unwrap(),
            NodeId::string(3, "Pump.Speed")
        );
        let guid = Uuid::new_v4();
        assert_eq!(
            format!("ns=1;g={}", guid).parse::<NodeId>().unwrap(),
            NodeId::guid(1, guid)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ns=x;i=1".parse::<NodeId>().is_err());
        assert!("q=1".parse::<NodeId>().is_err());
        assert!("ns=1".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_null_detection() {
        assert!(NodeId::NULL.is_null());
        assert!(NodeId::string(0, "").is_null());
        assert!(!NodeId::numeric(1, 0).is_null());
        assert!(ExpandedNodeId::NULL.is_null());
    }

    #[test]
    fn test_expanded_to_local() {
        let table = NamespaceTable::new();
        let ns = table.add_uri("urn:plant:boilers");

        let local = ExpandedNodeId::from(NodeId::numeric(1, 7));
        assert_eq!(local.to_local(&table), Some(NodeId::numeric(1, 7)));

        let by_uri = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, 7), "urn:plant:boilers");
        assert_eq!(by_uri.to_local(&table), Some(NodeId::numeric(ns, 7)));

        let unknown_uri = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, 7), "urn:elsewhere");
        assert_eq!(unknown_uri.to_local(&table), None);

        let remote = ExpandedNodeId::remote(NodeId::numeric(1, 7), 2);
        assert_eq!(remote.to_local(&table), None);
    }

    #[test]
    fn test_expanded_display() {
        let e = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, 9), "urn:a");
        assert_eq!(e.to_string(), "nsu=urn:a;i=9");
        let r = ExpandedNodeId::remote(NodeId::numeric(2, 9), 1);
        assert_eq!(r.to_string(), "svr=1;ns=2;i=9");
    }

    proptest::proptest! {
        #[test]
        fn prop_string_identifiers_survive_text_form(namespace in 0u16..8, value in ".*") {
            let id = NodeId::string(namespace, value);
            proptest::prop_assert_eq!(id.to_string().parse::<NodeId>(), Ok(id));
        }
    }
}
