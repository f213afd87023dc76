//! chartbridge - bar charts on an HTML canvas from JSON payloads
//!
//! Looks up a canvas by id, binds a Chart.js chart to its 2D context and
//! draws bar charts from JSON data and options strings. Rendering itself is
//! left to the chart library; this crate decodes, checks and forwards.
//!
//! # Example
//!
//! ```
//! use chartbridge::ChartBridge;
//! use chartbridge::memory::{MemoryDocument, RecordingLibrary};
//!
//! let document = MemoryDocument::new().with_canvas("myChart");
//! let bridge = ChartBridge::new(document, RecordingLibrary::new());
//!
//! let mut chart = bridge.construct("myChart")?;
//! bridge.draw_bar(
//!     &mut chart,
//!     r#"{"labels":["A","B"],"datasets":[{"data":[1,2]}]}"#,
//!     "{}",
//! )?;
//! # Ok::<(), chartbridge::BridgeError>(())
//! ```
//!
//! In the browser the same bridge runs over `wasm::BrowserDocument` and
//! `wasm::ChartJs`, exported to JavaScript as `chart` and `bar`.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod memory;
pub mod payload;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use backend::{ChartLibrary, Document};
pub use bridge::{ChartBridge, ChartHandle};
pub use config::BridgeConfig;
pub use error::{BridgeError, ErrorReport, LookupError, Payload, Result};
pub use payload::{BarData, BarDataset, BarOptions, ShapeIssue, decode_data, decode_options};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
