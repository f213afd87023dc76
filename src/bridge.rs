//! The chart bridge: bind a chart to a canvas, then draw bar charts on it.

use log::{debug, warn};

use crate::backend::{ChartLibrary, Document};
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::payload::{self, BarData, BarOptions, ShapeIssue};

/// A chart instance bound to one canvas for its whole lifetime.
///
/// The handle belongs to the caller. `element_id` is a lookup-only record of
/// the canvas it was built for; a browser handle must not be used after that
/// canvas has been removed from the document.
#[derive(Debug)]
pub struct ChartHandle<I> {
    element_id: String,
    instance: I,
}

impl<I> ChartHandle<I> {
    pub(crate) fn new(element_id: impl Into<String>, instance: I) -> Self {
        Self {
            element_id: element_id.into(),
            instance,
        }
    }

    /// Id of the canvas this chart is bound to.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn into_instance(self) -> I {
        self.instance
    }
}

/// Entry point for both bridge operations.
pub struct ChartBridge<D, L> {
    document: D,
    library: L,
    config: BridgeConfig,
}

impl<D, L> ChartBridge<D, L>
where
    D: Document,
    L: ChartLibrary<Context = D::Context>,
{
    pub fn new(document: D, library: L) -> Self {
        Self::with_config(document, library, BridgeConfig::default())
    }

    pub fn with_config(document: D, library: L, config: BridgeConfig) -> Self {
        Self {
            document,
            library,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Look up the canvas `element_id`, take its 2D context and bind a new
    /// chart instance to it.
    pub fn construct(&self, element_id: &str) -> Result<ChartHandle<L::Instance>> {
        let context = self.document.context_2d(element_id)?;
        let instance = self.library.construct(&context)?;
        debug!("constructed chart on canvas `{element_id}`");
        Ok(ChartHandle::new(element_id, instance))
    }

    /// Decode both payloads and draw a bar chart, handing the same handle back.
    ///
    /// Decoding and validation finish before the library is called, so a bad
    /// payload leaves the canvas untouched and the handle usable.
    pub fn draw_bar<'h>(
        &self,
        handle: &'h mut ChartHandle<L::Instance>,
        data: &str,
        options: &str,
    ) -> Result<&'h mut ChartHandle<L::Instance>> {
        let data = payload::decode_data(data)?;
        let options = payload::decode_options(options)?;
        self.draw_bar_decoded(handle, &data, &options)
    }

    /// Draw already-decoded payloads. Shape rules are still enforced.
    pub fn draw_bar_decoded<'h>(
        &self,
        handle: &'h mut ChartHandle<L::Instance>,
        data: &BarData,
        options: &BarOptions,
    ) -> Result<&'h mut ChartHandle<L::Instance>> {
        self.check_shape(data.validate().into_iter().chain(options.validate()))?;

        self.library.draw_bar(&mut handle.instance, data, options)?;
        debug!(
            "drew {} bar series on canvas `{}`",
            data.datasets.len(),
            handle.element_id
        );
        Ok(handle)
    }

    fn check_shape(&self, issues: impl Iterator<Item = ShapeIssue>) -> Result<()> {
        for issue in issues {
            if self.config.strict {
                return Err(issue.into());
            }
            warn!(
                "{} payload field `{}`: {}",
                issue.payload, issue.field, issue.message
            );
        }
        Ok(())
    }
}
