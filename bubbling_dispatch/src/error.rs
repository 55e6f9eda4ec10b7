// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch errors.

use alloc::boxed::Box;

use bubbling_tree::NodeId;
use thiserror::Error;

use crate::types::{EventType, Phase};

/// Error type handlers return to abort a dispatch.
///
/// Anything implementing [`core::error::Error`] converts into it with `?` or `.into()`,
/// as do `&str` and `String`.
pub type HandlerError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Errors returned by listener registration and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The node passed to `register` or `dispatch` is not alive in the document.
    #[error("node {0} is not alive in this document")]
    UnknownNode(NodeId),
    /// A handler failed; remaining handlers for this dispatch were not run.
    #[error("`{event_type}` handler on node {node} failed during {phase:?} phase")]
    Handler {
        /// Event being dispatched.
        event_type: EventType,
        /// Node whose handler failed.
        node: NodeId,
        /// Phase the handler ran in.
        phase: Phase,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Node associated with the error.
    pub fn node(&self) -> NodeId {
        match self {
            Self::UnknownNode(node) | Self::Handler { node, .. } => *node,
        }
    }
}
