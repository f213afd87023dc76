//! Browser bindings: DOM canvas lookup, the global Chart.js class, and the
//! functions exported to JavaScript.
//!
//! ```js
//! import init, { chart, bar } from "chartbridge";
//!
//! await init();
//! const c = chart("myChart");
//! bar(c, JSON.stringify(data), "{}") === c; // true
//! ```

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::backend::{ChartLibrary, Document};
use crate::bridge::{ChartBridge, ChartHandle};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, ErrorReport, LookupError, Result};
use crate::payload::{BarData, BarOptions};

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance.
    #[derive(Debug, Clone)]
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(context: &CanvasRenderingContext2d) -> std::result::Result<Chart, JsValue>;

    #[wasm_bindgen(method, catch, js_name = Bar)]
    fn bar(this: &Chart, data: &JsValue, options: &JsValue)
    -> std::result::Result<JsValue, JsValue>;

    /// Canvas the chart was constructed on.
    #[wasm_bindgen(method, getter)]
    fn canvas(this: &Chart) -> Option<HtmlCanvasElement>;
}

/// The page's `document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDocument;

impl Document for BrowserDocument {
    type Context = CanvasRenderingContext2d;

    fn context_2d(
        &self,
        element_id: &str,
    ) -> std::result::Result<CanvasRenderingContext2d, LookupError> {
        let id = || element_id.to_string();

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(LookupError::NoDocument)?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| LookupError::ElementNotFound { id: id() })?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| LookupError::NotACanvas { id: id() })?;

        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| LookupError::ContextUnavailable { id: id() })
    }
}

/// The global `Chart` class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartJs;

impl ChartLibrary for ChartJs {
    type Context = CanvasRenderingContext2d;
    type Instance = Chart;

    fn construct(&self, context: &CanvasRenderingContext2d) -> Result<Chart> {
        Chart::new(context).map_err(library_error)
    }

    fn draw_bar(&self, instance: &mut Chart, data: &BarData, options: &BarOptions) -> Result<()> {
        // Plain objects and arrays, not Maps, so Chart.js can read them.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let data = data
            .serialize(&serializer)
            .map_err(|e| BridgeError::Library(format!("cannot convert data: {e}")))?;
        let options = options
            .serialize(&serializer)
            .map_err(|e| BridgeError::Library(format!("cannot convert options: {e}")))?;

        instance.bar(&data, &options).map_err(library_error)?;
        Ok(())
    }
}

fn library_error(value: JsValue) -> BridgeError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    BridgeError::Library(message)
}

fn report_to_js(report: ErrorReport) -> JsValue {
    serde_wasm_bindgen::to_value(&report).unwrap_or_else(|_| JsValue::from_str(&report.message))
}

fn to_js_error(e: BridgeError) -> JsValue {
    report_to_js(ErrorReport::from(&e))
}

fn browser_bridge(config: BridgeConfig) -> ChartBridge<BrowserDocument, ChartJs> {
    ChartBridge::with_config(BrowserDocument, ChartJs, config)
}

fn draw(chart: Chart, data: &str, options: &str, config: BridgeConfig) -> Result<Chart> {
    let element_id = chart.canvas().map(|c| c.id()).unwrap_or_default();
    let mut handle = ChartHandle::new(element_id, chart);
    browser_bridge(config).draw_bar(&mut handle, data, options)?;
    Ok(handle.into_instance())
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    console_log::init_with_level(log::Level::Debug).ok();
}

/// Bind a new chart to the canvas with id `elementId`.
#[wasm_bindgen]
pub fn chart(element_id: &str) -> std::result::Result<Chart, JsValue> {
    browser_bridge(BridgeConfig::default())
        .construct(element_id)
        .map(ChartHandle::into_instance)
        .map_err(to_js_error)
}

/// Draw a bar chart from JSON `data` and `options`; returns `chart` itself.
#[wasm_bindgen]
pub fn bar(chart: Chart, data: &str, options: &str) -> std::result::Result<Chart, JsValue> {
    draw(chart, data, options, BridgeConfig::default()).map_err(to_js_error)
}

/// Like `bar`, with a JSON bridge config such as `{ "strict": false }`.
#[wasm_bindgen(js_name = "barWithConfig")]
pub fn bar_with_config(
    chart: Chart,
    data: &str,
    options: &str,
    config_json: &str,
) -> std::result::Result<Chart, JsValue> {
    let config: BridgeConfig = serde_json::from_str(config_json)
        .map_err(|e| report_to_js(ErrorReport::config(&e)))?;
    draw(chart, data, options, config).map_err(to_js_error)
}

/// Get version information.
#[wasm_bindgen]
pub fn version() -> String {
    crate::version().to_string()
}
