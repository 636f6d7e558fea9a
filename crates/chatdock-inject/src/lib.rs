//! Chat widget injection for built documentation sites.
//!
//! Writes the widget's stylesheet and script into the site's asset tree and
//! splices the widget markup into every generated page.

pub mod injector;
pub mod widget;

pub use injector::{AssetWriter, InjectConfig, InjectError, InjectReport};
pub use widget::WidgetAssets;
