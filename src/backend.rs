//! The two collaborators the bridge talks to: the document that owns the
//! canvas elements, and the charting library that draws on them.

use crate::error::{LookupError, Result};
use crate::payload::{BarData, BarOptions};

/// Resolves element ids to 2D drawing contexts.
///
/// The returned context is owned by its canvas; implementors hand out a
/// reference-counted handle to it, never the canvas itself.
pub trait Document {
    type Context;

    fn context_2d(&self, element_id: &str) -> std::result::Result<Self::Context, LookupError>;
}

/// A charting library able to bind a chart to a context and draw bar charts.
pub trait ChartLibrary {
    type Context;
    type Instance;

    /// Create a chart instance bound to `context`.
    fn construct(&self, context: &Self::Context) -> Result<Self::Instance>;

    /// Draw a bar chart on `instance`, replacing whatever it showed before.
    fn draw_bar(&self, instance: &mut Self::Instance, data: &BarData, options: &BarOptions)
    -> Result<()>;
}
