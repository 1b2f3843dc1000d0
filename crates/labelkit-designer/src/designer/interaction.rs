//! Pointer routing between the resize and drag controllers.
//!
//! Every pointer event visits the handlers in a fixed order: resize anchors
//! first, then the drag controller, then the bare canvas. A handler that acts
//! sets `event.handled`, and later handlers skip handled events, so at most one
//! gesture owns any pointer-down.

use labelkit_core::{DesignerEvent, Point, SceneNodeId};

use super::LabelDesigner;
use crate::drag::DragCandidate;
use crate::pointer::{PointerEvent, PointerTarget};

impl LabelDesigner {
    /// What lies under `p`.
    ///
    /// Anchors of the selected element win over nodes, and nodes are tested
    /// top-most first. The layout is the label background and counts as canvas.
    pub fn hit_test(&self, p: Point) -> PointerTarget {
        if let Some(node) = self.selection.selected() {
            if let Some(anchor) = self.overlay.adorner(node).and_then(|a| a.anchor_at(p)) {
                return PointerTarget::Anchor(node, anchor);
            }
        }

        self.canvas
            .iter()
            .rev()
            .filter_map(|node| self.elements.get(node))
            .find(|vm| !vm.model().is_layout() && vm.node().contains(p))
            .map_or(PointerTarget::Canvas, |vm| PointerTarget::Node(vm.node_id()))
    }

    pub fn pointer_down(&mut self, event: &mut PointerEvent) {
        let target = self.hit_test(event.position);

        if let PointerTarget::Anchor(node, anchor) = target {
            if !event.handled {
                if let Some(vm) = self.elements.get_mut(&node) {
                    if !vm.locked() {
                        let baseline = vm.node().bounds();
                        self.resize.begin(event, node, anchor, baseline);
                        vm.node_mut().capture_pointer();
                    }
                }
            }
        }

        if let PointerTarget::Node(node) = target {
            self.begin_drag(event, node);
        }

        if target == PointerTarget::Canvas && !event.handled {
            self.clear_selection();
        }
    }

    fn begin_drag(&mut self, event: &mut PointerEvent, node: SceneNodeId) {
        let Some(vm) = self.elements.get(&node) else {
            return;
        };
        let candidate = DragCandidate {
            node,
            locked: vm.locked(),
            attached: vm.node().is_attached(),
        };
        if !self.drag.begin(event, candidate) {
            return;
        }

        self.select_element(Some(node));
        if let Some(vm) = self.elements.get_mut(&node) {
            vm.node_mut().capture_pointer();
        }
    }

    pub fn pointer_move(&mut self, event: &mut PointerEvent) {
        if let Some(step) = self.resize.update(event) {
            let resized = self.elements.get_mut(&step.node).map(|vm| {
                let notice = vm.set_bounds(step.bounds);
                (vm.bounds(), notice)
            });
            if let Some((bounds, notice)) = resized {
                self.selection
                    .update_highlight_bounds(self.overlay.as_mut(), bounds);
                if let Some(notice) = notice {
                    self.publish_notice(&notice);
                }
                self.is_modified = true;
                self.publish(DesignerEvent::ElementResized {
                    node: step.node,
                    x: bounds.left,
                    y: bounds.top,
                    width: bounds.width,
                    height: bounds.height,
                });
            }
        }

        if let Some(step) = self.drag.update(event) {
            let moved = self.elements.get_mut(&step.node).map(|vm| {
                vm.set_location(vm.location_x() + step.dx, vm.location_y() + step.dy);
                (vm.location_x(), vm.location_y())
            });
            if let Some((x, y)) = moved {
                self.selection
                    .update_highlight_position(self.overlay.as_mut(), x, y);
                self.is_modified = true;
                self.publish(DesignerEvent::ElementMoved {
                    node: step.node,
                    x,
                    y,
                });
            }
        }
    }

    pub fn pointer_up(&mut self, _event: &mut PointerEvent) {
        let released = [self.resize.end(), self.drag.end()];
        for node in released.into_iter().flatten() {
            if let Some(vm) = self.elements.get_mut(&node) {
                vm.node_mut().release_pointer();
            }
        }
    }
}
