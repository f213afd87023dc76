use chartbridge::memory::{MemoryDocument, RecordingLibrary};
use chartbridge::{BridgeConfig, BridgeError, ChartBridge, LookupError, Payload};

const DATA: &str = r#"{"labels":["A","B"],"datasets":[{"data":[1,2]}]}"#;

fn page() -> MemoryDocument {
    MemoryDocument::new()
        .with_canvas("myChart")
        .with_canvas("other")
        .with_element("sidebar")
        .with_dead_canvas("offscreen")
}

#[test]
fn test_draws_two_bars() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());

    let mut chart = bridge.construct("myChart").unwrap();
    let returned = bridge.draw_bar(&mut chart, DATA, "{}").unwrap();
    assert_eq!(returned.element_id(), "myChart");

    let frame = bridge.document().canvas("myChart").unwrap().frame().unwrap();
    let bars: Vec<_> = frame.bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
    assert_eq!(bars, vec![("A", 1.0), ("B", 2.0)]);

    // Other canvases are untouched.
    assert!(bridge.document().canvas("other").unwrap().frame().is_none());
}

#[test]
fn test_missing_canvas_fails_before_drawing() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());

    let err = bridge.construct("missing").unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Lookup(LookupError::ElementNotFound { ref id }) if id == "missing"
    ));
    assert_eq!(err.kind(), "lookup_error");
    assert_eq!(bridge.library().constructed(), 0);
}

#[test]
fn test_lookup_failures_construct_nothing() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());

    let err = bridge.construct("sidebar").unwrap_err();
    assert_eq!(err.to_string(), "element `sidebar` is not a canvas");
    assert_eq!(bridge.library().constructed(), 0);

    let err = bridge.construct("offscreen").unwrap_err();
    assert_eq!(err.to_string(), "canvas `offscreen` has no 2d context");
    assert_eq!(bridge.library().constructed(), 0);

    bridge.construct("myChart").unwrap();
    assert_eq!(bridge.library().constructed(), 1);
}

#[test]
fn test_year_labels_draw() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());
    let mut chart = bridge.construct("myChart").unwrap();

    bridge
        .draw_bar(
            &mut chart,
            r#"{"labels":[2019,2020],"datasets":[{"data":[1,2]}]}"#,
            r#"{"animationSteps":60.0}"#,
        )
        .unwrap();
    let frame = bridge.document().canvas("myChart").unwrap().frame().unwrap();
    assert_eq!(frame.bars[0].label, "2019");
    assert_eq!(frame.options.animation_steps, Some(60));
}

#[test]
fn test_invalid_json_leaves_canvas_unchanged() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());
    let mut chart = bridge.construct("myChart").unwrap();
    bridge.draw_bar(&mut chart, DATA, "{}").unwrap();

    let canvas = bridge.document().canvas("myChart").unwrap();
    let before = canvas.frame();

    let err = bridge.draw_bar(&mut chart, "not json", "{}").unwrap_err();
    assert_eq!(err.kind(), "decode_error");
    assert_eq!(err.payload(), Some(Payload::Data));
    assert_eq!(canvas.frame(), before);
    assert_eq!(canvas.paint_count(), 1);

    let err = bridge.draw_bar(&mut chart, DATA, "{oops}").unwrap_err();
    assert_eq!(err.payload(), Some(Payload::Options));
    assert_eq!(canvas.paint_count(), 1);
}

#[test]
fn test_redraw_with_same_payload_is_stable() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());
    let canvas = bridge.document().canvas("myChart").unwrap();

    let mut chart = bridge.construct("myChart").unwrap();
    bridge.draw_bar(&mut chart, DATA, r#"{"animation":false}"#).unwrap();
    let once = canvas.frame();
    bridge.draw_bar(&mut chart, DATA, r#"{"animation":false}"#).unwrap();

    assert_eq!(canvas.frame(), once);
    assert_eq!(chart.instance().draw_count(), 2);
}

#[test]
fn test_handle_can_be_chained() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());
    let mut chart = bridge.construct("myChart").unwrap();
    let serial = chart.instance().serial();

    let chained = bridge
        .draw_bar(&mut chart, DATA, "{}")
        .and_then(|c| bridge.draw_bar(c, r#"{"labels":["C"],"datasets":[{"data":[3]}]}"#, "{}"))
        .unwrap();
    assert_eq!(chained.instance().serial(), serial);
    assert_eq!(chained.instance().draw_count(), 2);

    let frame = bridge.document().canvas("myChart").unwrap().frame().unwrap();
    assert_eq!(frame.bars.len(), 1);
    assert_eq!(frame.bars[0].label, "C");
}

#[test]
fn test_library_failure_propagates() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::failing("context lost"));
    let mut chart = bridge.construct("myChart").unwrap();

    let err = bridge.draw_bar(&mut chart, DATA, "{}").unwrap_err();
    assert_eq!(err.kind(), "library_error");
    assert_eq!(err.to_string(), "chart library error: context lost");
}

#[test]
fn test_schema_error_names_field() {
    let bridge = ChartBridge::new(page(), RecordingLibrary::new());
    let mut chart = bridge.construct("myChart").unwrap();

    let err = bridge
        .draw_bar(&mut chart, r#"{"labels":["A"],"datasets":[{"values":[1]}]}"#, "{}")
        .unwrap_err();
    assert_eq!(err.kind(), "schema_error");
    assert!(err.to_string().contains("missing field `data`"));
}

#[test]
fn test_lenient_config_draws_mismatched_series() {
    let bridge =
        ChartBridge::with_config(page(), RecordingLibrary::new(), BridgeConfig::lenient());
    let mut chart = bridge.construct("myChart").unwrap();

    bridge
        .draw_bar(
            &mut chart,
            r#"{"labels":["A","B","C"],"datasets":[{"data":[1]}]}"#,
            r#"{"scaleOverride":true}"#,
        )
        .unwrap();
    let frame = bridge.document().canvas("myChart").unwrap().frame().unwrap();
    assert_eq!(frame.bars.len(), 1);
    assert_eq!(frame.options.scale_override, Some(true));
}
