// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controller's single hover slot.

/// What the pointer is currently highlighting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverState<Id> {
    /// Nothing highlighted, no tooltip.
    Idle,
    /// Region `id` is outlined.
    Highlighted {
        /// Identity of the highlighted feature.
        id: Id,
        /// Whether a tooltip is showing; false when the region has no attributes.
        tooltip: bool,
    },
}

impl<Id> Default for HoverState<Id> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<Id> HoverState<Id> {
    /// Returns `true` if nothing is highlighted.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The highlighted region, if any.
    pub fn highlighted(&self) -> Option<&Id> {
        match self {
            Self::Idle => None,
            Self::Highlighted { id, .. } => Some(id),
        }
    }
}

impl<Id: PartialEq> HoverState<Id> {
    /// Returns `true` if the highlighted region differs from `previous`.
    ///
    /// Only region identity counts; a tooltip toggling on the same region is
    /// not a change.
    pub fn changed_from(&self, previous: &Self) -> bool {
        self.highlighted() != previous.highlighted()
    }
}
