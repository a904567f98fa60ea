//! # Operation Contexts
//!
//! Every service entry point receives an [`OperationContext`]: who is
//! calling (if anyone) and a shared sink for per-node diagnostics. The
//! context is cheap to clone; clones share the same diagnostics.

use parking_lot::Mutex;
use shared_types::{NodeId, StatusCode};
use std::sync::Arc;
use uuid::Uuid;

/// A client session as seen by the address space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    session_id: Uuid,
    user_identity: Option<String>,
}

impl Session {
    /// A session for an authenticated user.
    pub fn new(user_identity: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_identity: Some(user_identity.into()),
        }
    }

    /// An anonymous session.
    pub fn anonymous() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_identity: None,
        }
    }

    /// Session identifier.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// User identity, `None` for anonymous sessions.
    pub fn user_identity(&self) -> Option<&str> {
        self.user_identity.as_deref()
    }
}

/// Caller identity for access checks.
#[derive(Clone, Debug, Default)]
pub struct AccessContext {
    session: Option<Arc<Session>>,
}

impl AccessContext {
    /// Context for calls originating inside the server.
    pub fn internal() -> Self {
        Self { session: None }
    }

    /// Context for calls made on behalf of a session.
    pub fn for_session(session: Arc<Session>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// The calling session, if any.
    pub fn session(&self) -> Option<&Arc<Session>> {
        self.session.as_ref()
    }

    /// True for server-originated calls.
    pub fn is_internal(&self) -> bool {
        self.session.is_none()
    }
}

/// One diagnostic record written by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticInfo {
    /// Node the record concerns.
    pub node_id: NodeId,
    /// Status attached to the record.
    pub status: StatusCode,
    /// Additional detail.
    pub message: String,
}

/// Shared, append-only diagnostics sink.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticsContext {
    records: Arc<Mutex<Vec<DiagnosticInfo>>>,
}

impl DiagnosticsContext {
    /// Append a record.
    pub fn record(&self, node_id: NodeId, status: StatusCode, message: impl Into<String>) {
        self.records.lock().push(DiagnosticInfo {
            node_id,
            status,
            message: message.into(),
        });
    }

    /// Records concerning `node_id`, in write order.
    pub fn for_node(&self, node_id: &NodeId) -> Vec<DiagnosticInfo> {
        self.records
            .lock()
            .iter()
            .filter(|r| &r.node_id == node_id)
            .cloned()
            .collect()
    }

    /// All records, in write order.
    pub fn records(&self) -> Vec<DiagnosticInfo> {
        self.records.lock().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

/// Context for one batched service call.
#[derive(Clone, Debug, Default)]
pub struct OperationContext {
    access: AccessContext,
    diagnostics: DiagnosticsContext,
}

impl OperationContext {
    /// Create a context with fresh diagnostics.
    pub fn new(access: AccessContext) -> Self {
        Self {
            access,
            diagnostics: DiagnosticsContext::default(),
        }
    }

    /// Context for server-originated calls.
    pub fn internal() -> Self {
        Self::new(AccessContext::internal())
    }

    /// Context for a session's calls.
    pub fn for_session(session: Arc<Session>) -> Self {
        Self::new(AccessContext::for_session(session))
    }

    /// Caller identity.
    pub fn access(&self) -> &AccessContext {
        &self.access
    }

    /// The calling session, if any.
    pub fn session(&self) -> Option<&Arc<Session>> {
        self.access.session()
    }

    /// Diagnostics sink shared by all clones of this context.
    pub fn diagnostics(&self) -> &DiagnosticsContext {
        &self.diagnostics
    }
}
