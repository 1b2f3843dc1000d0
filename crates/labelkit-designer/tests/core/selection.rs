use labelkit_designer::{
    AdornerLayer, LabelDesigner, OverlayHost, Rect, SceneNodeId, SelectionChanged,
    SelectionManager,
};
use labelkit_settings::DesignerSettings;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Select(u64),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u64..6).prop_map(Op::Select),
        1 => Just(Op::Clear),
    ]
}

fn assert_single_highlight(host: &dyn OverlayHost, selected: Option<SceneNodeId>) {
    match selected {
        Some(node) => {
            assert_eq!(host.adorner_count(), 1);
            assert!(host.adorner(node).is_some());
        }
        None => assert_eq!(host.adorner_count(), 0),
    }
}

proptest! {
    #[test]
    fn prop_single_selection_invariant(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut host = AdornerLayer::new();
        let mut manager = SelectionManager::new(10.0);
        let bounds = Rect::new(0.0, 0.0, 20.0, 20.0);
        let mut expected = None;

        for op in &ops {
            match *op {
                Op::Select(n) => {
                    let node = SceneNodeId(n);
                    let change = manager.select(&mut host, node, bounds, true);
                    prop_assert_eq!(change, SelectionChanged(Some(node)));
                    expected = Some(node);
                }
                Op::Clear => {
                    let change = manager.clear_selection(&mut host);
                    prop_assert_eq!(change.is_some(), expected.is_some());
                    expected = None;
                }
            }
            prop_assert_eq!(manager.selected(), expected);
            assert_single_highlight(&host, expected);
        }
    }

    #[test]
    fn prop_designer_selection_follows_last_pick(
        picks in prop::collection::vec(prop::option::of(0usize..6), 0..30)
    ) {
        let mut designer = LabelDesigner::default();
        designer.add_text().unwrap();
        designer.add_qr_code().unwrap();
        designer.add_text().unwrap();
        let nodes = designer.canvas().to_vec();

        for pick in picks {
            // indexes past the canvas stand for stale node ids
            let target = pick.map(|i| nodes.get(i).copied().unwrap_or(SceneNodeId(9999)));
            designer.select_element(target);

            let expected = target.filter(|node| nodes.contains(node));
            prop_assert_eq!(designer.selected(), expected);
            assert_single_highlight(designer.overlay(), expected);
        }
    }
}

#[test]
fn test_designer_selection_without_overlay_host() {
    let mut designer = LabelDesigner::new(DesignerSettings::default())
        .with_overlay(Box::new(AdornerLayer::unavailable()));
    let node = designer.add_text().unwrap();

    assert_eq!(designer.selected(), None);
    designer.select_element(Some(node));
    assert_eq!(designer.selected(), None);
    assert_eq!(designer.overlay().adorner_count(), 0);
}

#[test]
fn test_select_unknown_node_clears() {
    let mut designer = LabelDesigner::default();
    designer.add_text().unwrap();
    assert!(designer.selected().is_some());

    designer.select_element(Some(SceneNodeId(9999)));
    assert_eq!(designer.selected(), None);
}
