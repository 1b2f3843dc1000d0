//! Type-grouped projection of the canvas for the tree view.

use labelkit_core::{ElementKind, SceneNodeId};

/// One tree-view heading and the nodes listed under it
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGroup {
    pub kind: ElementKind,
    pub name: String,
    pub items: Vec<SceneNodeId>,
}

/// Groups for all five kinds, always in the same order
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGroups {
    groups: Vec<ElementGroup>,
}

impl ElementGroups {
    pub fn new() -> Self {
        Self {
            groups: ElementKind::ALL
                .iter()
                .map(|kind| ElementGroup {
                    kind: *kind,
                    name: kind.group_name().to_string(),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn group(&self, kind: ElementKind) -> &ElementGroup {
        // every kind has a group from construction
        &self.groups[kind_index(kind)]
    }

    pub fn insert(&mut self, kind: ElementKind, node: SceneNodeId) {
        self.groups[kind_index(kind)].items.push(node);
    }

    /// Returns whether the node was listed.
    pub fn remove(&mut self, kind: ElementKind, node: SceneNodeId) -> bool {
        let items = &mut self.groups[kind_index(kind)].items;
        let before = items.len();
        items.retain(|n| *n != node);
        items.len() != before
    }

    pub fn contains(&self, node: SceneNodeId) -> bool {
        self.groups.iter().any(|g| g.items.contains(&node))
    }

    pub fn clear(&mut self) {
        for group in &mut self.groups {
            group.items.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ElementGroups {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_index(kind: ElementKind) -> usize {
    match kind {
        ElementKind::Layout => 0,
        ElementKind::Text => 1,
        ElementKind::Image => 2,
        ElementKind::Barcode => 3,
        ElementKind::QrCode => 4,
    }
}
