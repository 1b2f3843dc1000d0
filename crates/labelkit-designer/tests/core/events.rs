use std::sync::{Arc, Mutex};

use labelkit_core::{
    DesignerEvent, ElementError, EventBus, EventBusConfig, EventCategory, EventFilter, NoticeLevel,
};
use labelkit_designer::{
    ElementKind, LabelDesigner, LinearEncoder, PointerEvent, RasterFactory, Symbology,
};

fn record(designer: &LabelDesigner, filter: EventFilter) -> Arc<Mutex<Vec<DesignerEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    designer.events().subscribe(filter, move |event| {
        sink.lock().unwrap().push(event);
    });
    seen
}

#[test]
fn test_add_publishes_element_then_selection() {
    let mut designer = LabelDesigner::default();
    let seen = record(&designer, EventFilter::All);

    let text = designer.add_text().unwrap();
    let layout = designer.layout_node().unwrap();

    let events = seen.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            DesignerEvent::ElementAdded {
                node: layout,
                kind: ElementKind::Layout,
                id: 1,
            },
            DesignerEvent::ElementAdded {
                node: text,
                kind: ElementKind::Text,
                id: 1,
            },
            DesignerEvent::SelectionChanged { node: Some(text) },
        ]
    );
}

#[test]
fn test_one_selection_event_per_change() {
    let mut designer = LabelDesigner::default();
    let a = designer.add_text().unwrap();
    let b = designer.add_qr_code().unwrap();
    let seen = record(
        &designer,
        EventFilter::Categories(vec![EventCategory::Selection]),
    );

    designer.select_element(Some(a));
    designer.select_element(Some(a));
    designer.select_element(Some(b));
    designer.clear_selection();
    designer.clear_selection();

    let events = seen.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            DesignerEvent::SelectionChanged { node: Some(a) },
            DesignerEvent::SelectionChanged { node: Some(b) },
            DesignerEvent::SelectionChanged { node: None },
        ]
    );
}

#[test]
fn test_delete_publishes_removal() {
    let mut designer = LabelDesigner::default();
    let qr = designer.add_qr_code().unwrap();
    let seen = record(&designer, EventFilter::All);

    let removed = designer.delete_selected().unwrap();
    assert_eq!(removed.kind(), ElementKind::QrCode);

    let events = seen.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            DesignerEvent::SelectionChanged { node: None },
            DesignerEvent::ElementRemoved {
                node: qr,
                kind: ElementKind::QrCode,
                id: 1,
            },
        ]
    );
    assert!(designer.view_model(qr).is_none());
    assert!(!designer.canvas().contains(&qr));
    assert!(!designer.groups().contains(qr));
}

#[test]
fn test_drag_publishes_moves() {
    let mut designer = LabelDesigner::default();
    let text = designer.add_text().unwrap();
    let seen = record(&designer, EventFilter::Categories(vec![EventCategory::Element]));

    designer.pointer_down(&mut PointerEvent::at(60.0, 60.0));
    designer.pointer_move(&mut PointerEvent::at(70.0, 65.0));
    designer.pointer_up(&mut PointerEvent::at(70.0, 65.0));

    let events = seen.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![DesignerEvent::ElementMoved {
            node: text,
            x: 60.0,
            y: 55.0,
        }]
    );
}

#[test]
fn test_unsupported_barcode_type_raises_notice() {
    let mut designer = LabelDesigner::default();
    designer.add_barcode(Symbology::Code39).unwrap();

    let mut value = serde_json::to_value(designer.document()).unwrap();
    for element in value["elements"].as_array_mut().unwrap() {
        if element["kind"] == "Barcode" {
            element["barcode_type"] = serde_json::json!("UPC");
        }
    }
    let document = serde_json::from_value(value).unwrap();

    let mut reloaded = LabelDesigner::default();
    let seen = record(&reloaded, EventFilter::Categories(vec![EventCategory::Notice]));
    reloaded.load_document(document).unwrap();

    let events = seen.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    match &events[0] {
        DesignerEvent::Notice { level, message } => {
            assert_eq!(*level, NoticeLevel::Warning);
            assert!(message.contains("UPC"), "{}", message);
        }
        other => panic!("unexpected event {:?}", other),
    }
    // the element still loads, just without a visual
    assert_eq!(reloaded.element_count(), 2);
}

struct AlternatingEncoder;

impl LinearEncoder for AlternatingEncoder {
    fn encode(&self, _symbology: Symbology, data: &str) -> Result<Vec<bool>, ElementError> {
        if data.is_empty() {
            return Err(ElementError::Render {
                reason: "empty barcode data".to_string(),
            });
        }
        Ok((0..data.len() * 2).map(|i| i % 2 == 0).collect())
    }
}

#[test]
fn test_encoder_renders_barcode() {
    let mut designer = LabelDesigner::default()
        .with_factory(Arc::new(RasterFactory::with_encoder(Arc::new(AlternatingEncoder))));
    let barcode = designer.add_barcode(Symbology::Ean13).unwrap();

    let vm = designer.view_model(barcode).unwrap();
    let raster = vm.node().visual.raster().unwrap();
    assert_eq!((raster.width(), raster.height()), (200, 80));

    let notice = designer
        .view_model_mut(barcode)
        .unwrap()
        .set_data("")
        .unwrap();
    assert!(matches!(notice, Some(ElementError::Render { .. })));
    assert!(designer.view_model(barcode).unwrap().node().visual.raster().is_none());
}

#[test]
fn test_new_document_publishes_cleared() {
    let mut designer = LabelDesigner::default();
    designer.add_text().unwrap();
    let seen = record(&designer, EventFilter::Categories(vec![EventCategory::Document]));

    designer.new_document();

    let events = seen.lock().unwrap().clone();
    assert_eq!(events, vec![DesignerEvent::DocumentCleared]);
}

#[test]
fn test_receiver_sees_designer_events() {
    let mut designer = LabelDesigner::default();
    let mut rx = designer.events().receiver();

    let text = designer.add_text().unwrap();
    designer.clear_selection();

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    assert_eq!(received.len(), 4);
    assert_eq!(
        received[1],
        DesignerEvent::ElementAdded {
            node: text,
            kind: ElementKind::Text,
            id: 1,
        }
    );
    assert_eq!(received[3], DesignerEvent::SelectionChanged { node: None });
}

#[test]
fn test_history_keeps_latest_designer_events() {
    let bus = Arc::new(EventBus::with_config(EventBusConfig {
        enable_history: true,
        max_history_size: 2,
        ..EventBusConfig::default()
    }));
    let mut designer = LabelDesigner::default().with_event_bus(bus.clone());

    let text = designer.add_text().unwrap();
    designer.delete_selected().unwrap();

    assert_eq!(
        bus.history(None),
        vec![
            DesignerEvent::SelectionChanged { node: None },
            DesignerEvent::ElementRemoved {
                node: text,
                kind: ElementKind::Text,
                id: 1,
            },
        ]
    );
    bus.clear_history();
    assert!(bus.history(None).is_empty());
}
