//! In-memory document and chart library.
//!
//! Stand-ins for the browser DOM and Chart.js. A [`RecordingLibrary`] does not
//! rasterize anything; each draw replaces the canvas's current [`Frame`] with
//! the bars the payload describes, which is enough to observe what a real
//! renderer was asked to show.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::backend::{ChartLibrary, Document};
use crate::error::{BridgeError, LookupError, Result};
use crate::payload::{BarData, BarOptions};

/// One bar as it would appear on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: String,
    pub series: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_label: Option<String>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

/// What a canvas currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub bars: Vec<Bar>,
    pub options: BarOptions,
}

impl Frame {
    fn from_payloads(data: &BarData, options: &BarOptions) -> Self {
        let mut bars = Vec::with_capacity(data.bar_count());
        for (series, dataset) in data.datasets.iter().enumerate() {
            for (label, value) in data.labels.iter().zip(&dataset.data) {
                bars.push(Bar {
                    label: label.clone(),
                    series,
                    series_label: dataset.label.clone(),
                    value: *value,
                    fill_color: dataset.fill_color.clone(),
                });
            }
        }
        Self {
            bars,
            options: options.clone(),
        }
    }
}

#[derive(Debug)]
struct CanvasState {
    id: String,
    frame: Option<Frame>,
    paints: usize,
}

/// A canvas 2D context. Clones share the same surface.
#[derive(Debug, Clone)]
pub struct MemoryCanvas(Rc<RefCell<CanvasState>>);

impl MemoryCanvas {
    fn new(id: &str) -> Self {
        Self(Rc::new(RefCell::new(CanvasState {
            id: id.to_string(),
            frame: None,
            paints: 0,
        })))
    }

    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    /// The last frame painted, if any.
    pub fn frame(&self) -> Option<Frame> {
        self.0.borrow().frame.clone()
    }

    /// How many times anything painted on this canvas.
    pub fn paint_count(&self) -> usize {
        self.0.borrow().paints
    }

    fn paint(&self, frame: Frame) {
        let mut state = self.0.borrow_mut();
        state.frame = Some(frame);
        state.paints += 1;
    }
}

#[derive(Debug, Clone)]
enum Node {
    Canvas(MemoryCanvas),
    /// A canvas whose 2D context cannot be obtained.
    DeadCanvas,
    Element,
}

/// A document holding canvases and other elements by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: HashMap<String, Node>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, id: &str) -> Self {
        self.nodes
            .insert(id.to_string(), Node::Canvas(MemoryCanvas::new(id)));
        self
    }

    /// Add a canvas that refuses to hand out a 2D context.
    pub fn with_dead_canvas(mut self, id: &str) -> Self {
        self.nodes.insert(id.to_string(), Node::DeadCanvas);
        self
    }

    /// Add a non-canvas element.
    pub fn with_element(mut self, id: &str) -> Self {
        self.nodes.insert(id.to_string(), Node::Element);
        self
    }

    pub fn canvas(&self, id: &str) -> Option<MemoryCanvas> {
        match self.nodes.get(id) {
            Some(Node::Canvas(canvas)) => Some(canvas.clone()),
            _ => None,
        }
    }
}

impl Document for MemoryDocument {
    type Context = MemoryCanvas;

    fn context_2d(&self, element_id: &str) -> std::result::Result<MemoryCanvas, LookupError> {
        let id = element_id.to_string();
        match self.nodes.get(element_id) {
            Some(Node::Canvas(canvas)) => Ok(canvas.clone()),
            Some(Node::DeadCanvas) => Err(LookupError::ContextUnavailable { id }),
            Some(Node::Element) => Err(LookupError::NotACanvas { id }),
            None => Err(LookupError::ElementNotFound { id }),
        }
    }
}

/// Chart instance produced by [`RecordingLibrary`].
#[derive(Debug)]
pub struct RecordedChart {
    serial: u64,
    canvas: MemoryCanvas,
    draws: usize,
}

impl RecordedChart {
    /// Unique per constructed instance.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn canvas_id(&self) -> String {
        self.canvas.id()
    }

    pub fn draw_count(&self) -> usize {
        self.draws
    }
}

/// Chart library that records frames on [`MemoryCanvas`] contexts.
#[derive(Debug, Default)]
pub struct RecordingLibrary {
    next_serial: Cell<u64>,
    failure: Option<String>,
}

impl RecordingLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library whose every draw fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            next_serial: Cell::new(0),
            failure: Some(message.to_string()),
        }
    }

    /// Number of chart instances constructed so far.
    pub fn constructed(&self) -> u64 {
        self.next_serial.get()
    }
}

impl ChartLibrary for RecordingLibrary {
    type Context = MemoryCanvas;
    type Instance = RecordedChart;

    fn construct(&self, context: &MemoryCanvas) -> Result<RecordedChart> {
        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);
        Ok(RecordedChart {
            serial,
            canvas: context.clone(),
            draws: 0,
        })
    }

    fn draw_bar(
        &self,
        instance: &mut RecordedChart,
        data: &BarData,
        options: &BarOptions,
    ) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(BridgeError::Library(message.clone()));
        }
        instance.canvas.paint(Frame::from_payloads(data, options));
        instance.draws += 1;
        Ok(())
    }
}
