//! Weaving draft engine: grid model, region layout, hit-testing, the
//! drawdown transformations, rendering and the session controller that
//! ties them together.

pub mod config;
pub mod document;
pub mod grid;
pub mod layout;
pub mod render;
pub mod session;
pub mod transform;

pub use grid::{BoolGrid, Chart, ColorStrip, WeaveState};
pub use hit_test::{CellHit, Point};
pub use layout::{Layout, Region, RegionOrigins};
pub use session::{Dimension, Notifier, Session, TracingNotifier};
