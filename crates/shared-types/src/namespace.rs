//! Namespace table: maps namespace URIs to the indexes used in `NodeId`.

use parking_lot::RwLock;

/// URI of the OPC UA base namespace, always at index 0.
pub const UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// Ordered, append-only list of namespace URIs.
///
/// Written at startup when namespaces register, read on every
/// `ExpandedNodeId` resolution.
#[derive(Debug)]
pub struct NamespaceTable {
    uris: RwLock<Vec<String>>,
}

impl NamespaceTable {
    /// Create a table holding only the base namespace.
    pub fn new() -> Self {
        Self {
            uris: RwLock::new(vec![UA_NAMESPACE_URI.to_string()]),
        }
    }

    /// Register a URI and return its index. Registering twice returns the
    /// existing index.
    pub fn add_uri(&self, uri: &str) -> u16 {
        let mut uris = self.uris.write();
        if let Some(index) = uris.iter().position(|u| u == uri) {
            return index as u16;
        }
        uris.push(uri.to_string());
        (uris.len() - 1) as u16
    }

    /// Index of a registered URI.
    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris
            .read()
            .iter()
            .position(|u| u == uri)
            .map(|i| i as u16)
    }

    /// URI registered at `index`.
    pub fn uri(&self, index: u16) -> Option<String> {
        self.uris.read().get(index as usize).cloned()
    }

    /// Number of registered namespaces, base namespace included.
    pub fn len(&self) -> usize {
        self.uris.read().len()
    }

    /// Never true: the base namespace is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Snapshot of all URIs in index order.
    pub fn uris(&self) -> Vec<String> {
        self.uris.read().clone()
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}
