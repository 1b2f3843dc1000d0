use labelkit_core::DocumentError;
use labelkit_designer::{ElementKind, LabelDesigner, LabelDocumentFile, Symbology};
use tempfile::TempDir;

fn sample_designer() -> LabelDesigner {
    let mut designer = LabelDesigner::default();
    designer.add_text().unwrap();
    designer.add_text().unwrap();
    designer.add_qr_code().unwrap();
    designer.add_barcode(Symbology::Ean13).unwrap();
    designer
}

fn ids_of(designer: &LabelDesigner, kind: ElementKind) -> Vec<u32> {
    let mut ids: Vec<u32> = designer
        .view_models()
        .filter(|vm| vm.kind() == kind)
        .map(|vm| vm.id())
        .collect();
    ids.sort_unstable();
    ids
}

#[test]
fn test_save_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("label.json");

    let mut designer = sample_designer();
    designer.save_to_file(&path).unwrap();
    assert!(!designer.is_modified);
    let saved = designer.document();

    let mut reloaded = LabelDesigner::default();
    let count = reloaded.load_from_file(&path).unwrap();

    assert_eq!(count, 5);
    assert_eq!(reloaded.element_count(), 5);
    assert_eq!(reloaded.document().elements, saved.elements);
    assert_eq!(reloaded.groups().group(ElementKind::Layout).items.len(), 1);
    assert_eq!(reloaded.groups().group(ElementKind::Text).items.len(), 2);
    assert_eq!(reloaded.current_file_path.as_deref(), Some(path.as_path()));
    assert!(!reloaded.is_modified);
    assert_eq!(reloaded.display_name(), "label");
}

#[test]
fn test_ids_keep_increasing_after_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ids.json");

    let mut designer = sample_designer();
    designer.save_to_file(&path).unwrap();

    let mut reloaded = LabelDesigner::default();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(ids_of(&reloaded, ElementKind::Text), vec![1, 2]);

    let text = reloaded.add_text().unwrap();
    let qr = reloaded.add_qr_code().unwrap();
    assert_eq!(reloaded.view_model(text).unwrap().id(), 3);
    assert_eq!(reloaded.view_model(qr).unwrap().id(), 2);

    // new element paints above everything that was loaded
    let top = reloaded
        .view_models()
        .filter(|vm| vm.node_id() != qr)
        .map(|vm| vm.layer())
        .max()
        .unwrap();
    assert!(reloaded.view_model(qr).unwrap().layer() > top);
    assert_eq!(reloaded.canvas().last(), Some(&qr));
}

#[test]
fn test_load_orders_canvas_by_layer() {
    let designer = sample_designer();
    let mut document = designer.document();
    document.elements.reverse();

    let mut reloaded = LabelDesigner::default();
    reloaded.load_document(document).unwrap();

    let layers: Vec<i32> = reloaded.view_models().map(|vm| vm.layer()).collect();
    let mut sorted = layers.clone();
    sorted.sort_unstable();
    assert_eq!(layers, sorted);
    assert_eq!(layers[0], 0);
}

#[test]
fn test_failed_load_leaves_canvas_untouched() {
    let temp = TempDir::new().unwrap();
    let garbage = temp.path().join("garbage.json");
    std::fs::write(&garbage, "{ not a label").unwrap();

    let mut designer = sample_designer();
    let before = designer.document().elements;
    let selected = designer.selected();

    let err = designer.load_from_file(&garbage).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DocumentError>(),
        Some(DocumentError::Parse(_))
    ));

    let missing = designer.load_from_file(temp.path().join("missing.json"));
    assert!(missing.is_err());

    assert_eq!(designer.document().elements, before);
    assert_eq!(designer.selected(), selected);
    assert!(designer.current_file_path.is_none());
}

#[test]
fn test_two_layouts_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("two_layouts.json");

    let designer = sample_designer();
    let mut value = serde_json::to_value(designer.document()).unwrap();
    let elements = value["elements"].as_array_mut().unwrap();
    let layout = elements
        .iter()
        .find(|e| e["kind"] == "Layout")
        .cloned()
        .unwrap();
    elements.push(layout);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let mut target = LabelDesigner::default();
    let err = target.load_from_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DocumentError>(),
        Some(DocumentError::MultipleLayouts { count: 2 })
    ));
    assert_eq!(target.element_count(), 0);
}

#[test]
fn test_layout_pinned_to_origin_on_load() {
    let designer = sample_designer();
    let mut value = serde_json::to_value(designer.document()).unwrap();
    for element in value["elements"].as_array_mut().unwrap() {
        if element["kind"] == "Layout" {
            element["location_x"] = serde_json::json!(40.0);
            element["location_y"] = serde_json::json!(25.0);
        }
    }
    let document = LabelDocumentFile::from_json(&value.to_string()).unwrap();

    let mut reloaded = LabelDesigner::default();
    reloaded.load_document(document).unwrap();

    let layout = reloaded.layout_node().unwrap();
    let vm = reloaded.view_model(layout).unwrap();
    assert_eq!((vm.location_x(), vm.location_y()), (0.0, 0.0));
    assert_eq!((vm.node().left, vm.node().top), (0.0, 0.0));
    assert!(vm.locked());
}

#[test]
fn test_new_document_resets_ids() {
    let mut designer = sample_designer();
    designer.new_document();

    assert_eq!(designer.element_count(), 0);
    assert!(designer.layout_node().is_none());
    assert!(designer.selected().is_none());
    assert_eq!(designer.overlay().adorner_count(), 0);

    let text = designer.add_text().unwrap();
    assert_eq!(designer.view_model(text).unwrap().id(), 1);
    assert_eq!(designer.view_model(text).unwrap().layer(), 1);
}
