#![deny(missing_docs)]

//! # allOf Merging
//!
//! Builds the property bag of an intersection.
//!
//! Each key carries two independent fields. `ty` is overwritten by any later branch that
//! declares the property. `required` is the logical OR across all branches and is never
//! downgraded by a later branch.

use crate::oas::shims::ShimSchema;
use crate::synth::kind::{classify, is_object_like, SchemaKind};
use crate::synth::render;
use crate::synth::types::{TypeSynthesizer, Visited};
use indexmap::IndexMap;

/// Accumulated state of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySlot {
    /// Synthesized type, or `None` when a branch only marked the key required.
    pub ty: Option<String>,
    /// Whether any branch so far requires the key.
    pub required: bool,
}

/// Ordered map from property name to its accumulated slot.
///
/// Keys keep the position of their first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    slots: IndexMap<String, PropertySlot>,
}

impl PropertyBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&PropertySlot> {
        self.slots.get(key)
    }

    /// Declares a typed property within a single branch.
    pub fn declare(&mut self, key: impl Into<String>, ty: impl Into<String>, required: bool) {
        self.absorb_slot(
            key.into(),
            PropertySlot {
                ty: Some(ty.into()),
                required,
            },
        );
    }

    /// Marks a key required without giving it a type.
    pub fn require(&mut self, key: impl Into<String>) {
        self.absorb_slot(
            key.into(),
            PropertySlot {
                ty: None,
                required: true,
            },
        );
    }

    /// Folds a later branch into this accumulator.
    pub fn absorb(&mut self, other: PropertyBag) {
        for (key, slot) in other.slots {
            self.absorb_slot(key, slot);
        }
    }

    fn absorb_slot(&mut self, key: String, incoming: PropertySlot) {
        match self.slots.get_mut(&key) {
            Some(slot) => {
                if incoming.ty.is_some() {
                    slot.ty = incoming.ty;
                }
                slot.required |= incoming.required;
            }
            None => {
                self.slots.insert(key, incoming);
            }
        }
    }

    /// Renders the bag as a structural record. Untyped keys render as `unknown`.
    pub fn render(&self, unknown: &str) -> String {
        render::record(
            self.slots
                .iter()
                .map(|(k, s)| (k.as_str(), s.ty.as_deref().unwrap_or(unknown), s.required)),
        )
    }
}

impl TypeSynthesizer<'_> {
    /// Merges `allOf` children left-to-right into one property bag.
    pub fn merge_all_of(&self, children: &[ShimSchema], visited: &Visited) -> PropertyBag {
        let mut acc = PropertyBag::new();
        for child in children {
            acc.absorb(self.branch_bag(child, visited));
        }
        acc
    }

    /// The contribution of one `allOf` branch.
    ///
    /// References are followed under the cycle guard, nested `allOf` recurses, plain
    /// objects contribute declared properties plus their `required` names, and anything
    /// else contributes nothing.
    fn branch_bag(&self, child: &ShimSchema, visited: &Visited) -> PropertyBag {
        match classify(child) {
            SchemaKind::Reference(r) => match self.enter_reference(r, visited) {
                Some((target, next)) => self.branch_bag(target, &next),
                None => PropertyBag::new(),
            },
            SchemaKind::AllOf(members) => self.merge_all_of(members, visited),
            SchemaKind::Typed(tags) if tags.is_empty() && !child.required.is_empty() => {
                self.required_only_bag(child)
            }
            _ if is_object_like(child) => {
                let mut bag = self.object_bag(child, visited);
                bag.absorb(self.required_only_bag(child));
                bag
            }
            _ => PropertyBag::new(),
        }
    }

    fn required_only_bag(&self, child: &ShimSchema) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for name in &child.required {
            bag.require(name.clone());
        }
        bag
    }
}
