use labelkit_designer::{Anchor, LabelDesigner, PointerEvent, Rect};
use proptest::prelude::*;

const FLOOR: f64 = 10.0;

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    (0usize..8).prop_map(|i| Anchor::ALL[i])
}

proptest! {
    #[test]
    fn prop_resize_never_below_floor(
        anchor in anchor_strategy(),
        width in 0.0f64..500.0,
        height in 0.0f64..500.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
    ) {
        let baseline = Rect::new(100.0, 100.0, width.max(FLOOR), height.max(FLOOR));
        let out = anchor.apply(baseline, dx, dy, FLOOR);
        prop_assert!(out.width >= FLOOR);
        prop_assert!(out.height >= FLOOR);
    }
}

#[test]
fn test_resize_through_designer_clamps() {
    let mut designer = LabelDesigner::default();
    let node = designer.add_qr_code().unwrap();
    let bounds = designer.view_model(node).unwrap().bounds();

    for anchor in Anchor::ALL {
        designer.select_element(Some(node));
        let start = anchor.position(designer.view_model(node).unwrap().bounds());

        let mut down = PointerEvent::at(start.x, start.y);
        designer.pointer_down(&mut down);
        assert!(down.handled, "{:?}", anchor);
        assert!(designer.resize().is_resizing());

        let mut far = PointerEvent::at(start.x + 1000.0, start.y + 1000.0);
        designer.pointer_move(&mut far);
        assert!(far.handled);
        let mut far = PointerEvent::at(start.x - 1000.0, start.y - 1000.0);
        designer.pointer_move(&mut far);
        designer.pointer_up(&mut far);

        let vm = designer.view_model(node).unwrap();
        assert!(vm.width() >= FLOOR, "{:?}: {}", anchor, vm.width());
        assert!(vm.height() >= FLOOR, "{:?}: {}", anchor, vm.height());
        assert!(!designer.drag().is_dragging());

        // restore for the next anchor
        designer
            .view_model_mut(node)
            .unwrap()
            .set_bounds(bounds);
        designer.refresh_highlight();
    }
}

#[test]
fn test_resize_writes_through_view_model() {
    let mut designer = LabelDesigner::default();
    let node = designer.add_qr_code().unwrap();
    let bounds = designer.view_model(node).unwrap().bounds();
    let start = Anchor::TopLeft.position(bounds);

    designer.pointer_down(&mut PointerEvent::at(start.x, start.y));
    designer.pointer_move(&mut PointerEvent::at(start.x + 10.0, start.y + 20.0));
    designer.pointer_up(&mut PointerEvent::at(start.x + 10.0, start.y + 20.0));

    let expected = Rect::new(
        bounds.left + 10.0,
        bounds.top + 20.0,
        bounds.width - 10.0,
        bounds.height - 20.0,
    );
    let vm = designer.view_model(node).unwrap();
    assert_eq!(vm.model().bounds(), expected);
    assert_eq!(vm.node().bounds(), expected);
    assert_eq!(
        vm.node().visual.raster().map(|r| (r.width(), r.height())),
        Some((90, 80))
    );
}

#[test]
fn test_locked_layout_exposes_no_anchors() {
    let mut designer = LabelDesigner::default();
    let layout = designer.ensure_layout_exists().unwrap();
    designer.select_element(Some(layout));

    let adorner = designer.overlay().adorner(layout).unwrap();
    assert!(!adorner.is_resizable());
    assert!(adorner.anchors().is_empty());

    let corner = Anchor::BottomRight.position(designer.view_model(layout).unwrap().bounds());
    let mut down = PointerEvent::at(corner.x, corner.y);
    designer.pointer_down(&mut down);
    assert!(!designer.resize().is_resizing());
    assert_eq!(designer.view_model(layout).unwrap().width(), 300.0);
}
