// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity.
//!
//! The engine tells videos apart by [`MediaId`]. Ids are assigned here, per
//! element object: two handles share an id only when they compare equal, which
//! for DOM wrappers is JavaScript `===`. A copied node (`cloneNode`, or markup
//! re-inserted through `innerHTML`) is a different object and gets a fresh id.
//! Ids are never reused within one registry.

use alloc::vec::Vec;

use overplay_core::host::MediaId;

/// Assigns stable ids to element handles.
#[derive(Debug)]
pub(crate) struct Registry<T> {
    entries: Vec<(T, MediaId)>,
    next: u32,
}

impl<T: PartialEq + Clone> Registry<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The id of `element`, assigning a fresh one on first sight.
    pub(crate) fn identify(&mut self, element: &T) -> MediaId {
        if let Some((_, id)) = self.entries.iter().find(|(known, _)| known == element) {
            return *id;
        }
        let id = MediaId(self.next);
        self.next = self.next.wrapping_add(1);
        self.entries.push((element.clone(), id));
        id
    }

    /// Forgets every element `keep` rejects.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|(element, _)| keep(element));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;

    /// Compares by pointer, like `===` on DOM nodes.
    #[derive(Clone, Debug)]
    struct Node(Rc<&'static str>);

    impl PartialEq for Node {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    fn node(markup: &'static str) -> Node {
        Node(Rc::new(markup))
    }

    #[test]
    fn same_element_keeps_its_id() {
        let mut registry = Registry::new();
        let video = node("<video>");
        let id = registry.identify(&video);
        assert_eq!(registry.identify(&video.clone()), id, "handle clone");
        assert_eq!(registry.len(), 1, "one entry");
    }

    #[test]
    fn copied_element_is_a_different_video() {
        let mut registry = Registry::new();
        let original = node("<video src=a.mp4>");
        let copy = node("<video src=a.mp4>");
        let first = registry.identify(&original);
        let second = registry.identify(&copy);
        assert_ne!(first, second, "identical markup, distinct objects");
    }

    #[test]
    fn pruned_ids_are_not_reused() {
        let mut registry = Registry::new();
        let gone = node("<video>");
        let gone_id = registry.identify(&gone);
        registry.retain(|element| *element != gone);
        assert_eq!(registry.len(), 0, "pruned");

        let fresh = registry.identify(&node("<video>"));
        assert_ne!(fresh, gone_id, "fresh id");
        assert_ne!(registry.identify(&gone), gone_id, "re-seen element is new");
    }
}
