// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-region attribute lookup for tooltips.

use alloc::collections::BTreeMap;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Keyed access to the data shown in a region's tooltip.
///
/// A missing entry is not an error: the region is still highlighted, just
/// without a tooltip.
pub trait AttributeStore<Id> {
    /// The record shown for one region.
    type Attributes: ?Sized;

    /// Attributes for `id`, if any.
    fn lookup(&self, id: &Id) -> Option<&Self::Attributes>;
}

impl<Id, S: AttributeStore<Id> + ?Sized> AttributeStore<Id> for &S {
    type Attributes = S::Attributes;

    fn lookup(&self, id: &Id) -> Option<&Self::Attributes> {
        (**self).lookup(id)
    }
}

impl<Id, K, A> AttributeStore<Id> for BTreeMap<K, A>
where
    K: Ord + Borrow<Id>,
    Id: Ord,
{
    type Attributes = A;

    fn lookup(&self, id: &Id) -> Option<&A> {
        self.get(id)
    }
}

impl<Id, K, A, S> AttributeStore<Id> for hashbrown::HashMap<K, A, S>
where
    K: Eq + Hash + Borrow<Id>,
    Id: Eq + Hash,
    S: BuildHasher,
{
    type Attributes = A;

    fn lookup(&self, id: &Id) -> Option<&A> {
        self.get(id)
    }
}

#[cfg(feature = "std")]
impl<Id, K, A, S> AttributeStore<Id> for std::collections::HashMap<K, A, S>
where
    K: Eq + Hash + Borrow<Id>,
    Id: Eq + Hash,
    S: BuildHasher,
{
    type Attributes = A;

    fn lookup(&self, id: &Id) -> Option<&A> {
        self.get(id)
    }
}

/// A store with no entries; every highlight is shown without a tooltip.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAttributes;

impl<Id> AttributeStore<Id> for NoAttributes {
    type Attributes = ();

    fn lookup(&self, _id: &Id) -> Option<&()> {
        None
    }
}
