use labelkit_designer::{ElementKind, LabelDesigner, PointerEvent};
use proptest::prelude::*;

fn drag_by_steps(designer: &mut LabelDesigner, start: (f64, f64), steps: &[(f64, f64)]) {
    let mut down = PointerEvent::at(start.0, start.1);
    designer.pointer_down(&mut down);

    let (mut x, mut y) = start;
    for (dx, dy) in steps {
        x += dx;
        y += dy;
        designer.pointer_move(&mut PointerEvent::at(x, y));
    }
    designer.pointer_up(&mut PointerEvent::at(x, y));
}

#[test]
fn test_drag_moves_model_and_node() {
    let mut designer = LabelDesigner::default();
    let node = designer.add_text().unwrap();

    drag_by_steps(&mut designer, (60.0, 60.0), &[(10.0, 0.0), (20.0, -10.0)]);

    let vm = designer.view_model(node).unwrap();
    assert_eq!((vm.location_x(), vm.location_y()), (80.0, 40.0));
    assert_eq!((vm.node().left, vm.node().top), (80.0, 40.0));
    assert!(designer.is_modified);
}

#[test]
fn test_text_drag_then_delete() {
    let mut designer = LabelDesigner::default();
    let node = designer.add_text().unwrap();
    assert_eq!(designer.selected(), Some(node));

    drag_by_steps(&mut designer, (60.0, 60.0), &[(30.0, -10.0)]);
    let vm = designer.view_model(node).unwrap();
    assert_eq!((vm.location_x(), vm.location_y()), (80.0, 40.0));
    let adorner = designer.overlay().adorner(node).unwrap();
    assert_eq!((adorner.bounds().left, adorner.bounds().top), (80.0, 40.0));

    let removed = designer.delete_selected().unwrap();
    assert_eq!((removed.location_x(), removed.location_y()), (80.0, 40.0));
    assert!(designer.view_model(node).is_none());
    assert!(!designer.canvas().contains(&node));
    assert!(!designer.groups().contains(node));
    assert!(designer.groups().group(ElementKind::Text).items.is_empty());
    assert_eq!(designer.selected(), None);
    assert_eq!(designer.overlay().adorner_count(), 0);
    assert_eq!(designer.element_count(), 1);
}

#[test]
fn test_locked_element_never_drags() {
    let mut designer = LabelDesigner::default();
    let node = designer.add_text().unwrap();
    assert!(designer.set_locked(node, true));
    designer.clear_selection();

    let mut down = PointerEvent::at(55.0, 55.0);
    designer.pointer_down(&mut down);
    assert!(!designer.drag().is_dragging());
    assert!(!down.handled);

    designer.pointer_move(&mut PointerEvent::at(155.0, 155.0));
    designer.pointer_up(&mut PointerEvent::at(155.0, 155.0));

    let vm = designer.view_model(node).unwrap();
    assert_eq!((vm.location_x(), vm.location_y()), (50.0, 50.0));
}

#[test]
fn test_consumed_pointer_down_does_not_drag() {
    let mut designer = LabelDesigner::default();
    designer.add_text().unwrap();

    let mut down = PointerEvent::at(55.0, 55.0);
    down.handled = true;
    designer.pointer_down(&mut down);
    assert!(!designer.drag().is_dragging());
}

proptest! {
    #[test]
    fn prop_drag_deltas_accumulate(
        steps in prop::collection::vec((-50i32..50, -50i32..50), 1..25)
    ) {
        let mut designer = LabelDesigner::default();
        let node = designer.add_text().unwrap();
        let steps: Vec<(f64, f64)> = steps
            .into_iter()
            .map(|(dx, dy)| (dx as f64, dy as f64))
            .collect();

        drag_by_steps(&mut designer, (60.0, 60.0), &steps);

        let (sum_x, sum_y) = steps
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (dx, dy)| (sx + dx, sy + dy));
        let vm = designer.view_model(node).unwrap();
        prop_assert_eq!(vm.location_x(), 50.0 + sum_x);
        prop_assert_eq!(vm.location_y(), 50.0 + sum_y);
    }
}
