//! # Method and Access Plug-ins
//!
//! A managed address space delegates method execution to a
//! [`MethodInvocationHandler`] bound per method node, and per-item
//! authorization to an [`AccessController`].

use crate::context::AccessContext;
use async_trait::async_trait;
use shared_types::{AttributeId, NodeId, UaError, Variant};

/// Executes one method.
#[async_trait]
pub trait MethodInvocationHandler: Send + Sync {
    /// Run the method on `object_id` with `inputs`, returning its outputs.
    ///
    /// An `Err` becomes the item's status code; it does not fail the batch.
    async fn invoke(
        &self,
        access: &AccessContext,
        object_id: &NodeId,
        inputs: Vec<Variant>,
    ) -> Result<Vec<Variant>, UaError>;
}

#[async_trait]
impl<F> MethodInvocationHandler for F
where
    F: Fn(&[Variant]) -> Result<Vec<Variant>, UaError> + Send + Sync,
{
    async fn invoke(
        &self,
        _access: &AccessContext,
        _object_id: &NodeId,
        inputs: Vec<Variant>,
    ) -> Result<Vec<Variant>, UaError> {
        self(&inputs)
    }
}

/// Per-item authorization. Every check allows by default.
pub trait AccessController: Send + Sync {
    /// May the caller read `attribute` of `node_id`.
    fn check_read(&self, _access: &AccessContext, _node_id: &NodeId, _attribute: AttributeId) -> bool {
        true
    }

    /// May the caller write `attribute` of `node_id`.
    fn check_write(&self, _access: &AccessContext, _node_id: &NodeId, _attribute: AttributeId) -> bool {
        true
    }

    /// May the caller invoke `method_id` on `object_id`.
    fn check_call(&self, _access: &AccessContext, _object_id: &NodeId, _method_id: &NodeId) -> bool {
        true
    }
}

/// Allows everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AccessController for AllowAll {}
