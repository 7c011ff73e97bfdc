// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by menu and dispatcher operations.
//!
//! Every error is raised before the failing call changes any state, so callers
//! can retry or give up without cleaning anything up.

use crate::types::ContainerId;

/// Coarse classification of a [`MenuError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A required argument was empty.
    InvalidArgument,
    /// A slot index was outside the container.
    OutOfBounds,
    /// The operation isn't possible in the current state.
    IllegalState,
    /// An element of an otherwise valid collection is unusable.
    MissingElement,
}

/// Error returned by fallible menu and dispatcher operations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MenuError {
    /// `open` was called without any viewer.
    #[error("viewer list can't be empty")]
    NoViewers,
    /// A viewer passed to `open` is no longer connected.
    #[error("viewer at position {index} is not connected")]
    ViewerDisconnected {
        /// Position of the viewer in the list passed to `open`.
        index: usize,
    },
    /// A slot index is outside `0..size`.
    #[error("slot {slot} is out of bounds for a container of {size} slots")]
    SlotOutOfBounds {
        /// Offending slot index.
        slot: usize,
        /// Size of the container.
        size: usize,
    },
    /// The dispatcher isn't attached, so the menu would never receive events.
    #[error("dispatcher is not attached to receive menu events")]
    DispatcherNotReady,
    /// Another menu already owns the container in the target dispatcher.
    #[error("{container} is already claimed by another menu")]
    ContainerClaimed {
        /// Contested container.
        container: ContainerId,
    },
}

impl MenuError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoViewers => ErrorKind::InvalidArgument,
            Self::ViewerDisconnected { .. } => ErrorKind::MissingElement,
            Self::SlotOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::DispatcherNotReady | Self::ContainerClaimed { .. } => ErrorKind::IllegalState,
        }
    }
}

/// Check that `slot` addresses a slot of a container with `size` slots.
pub(crate) fn check_slot(slot: usize, size: usize) -> Result<(), MenuError> {
    if slot < size {
        Ok(())
    } else {
        Err(MenuError::SlotOutOfBounds { slot, size })
    }
}
