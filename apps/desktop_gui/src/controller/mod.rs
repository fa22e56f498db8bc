//! Controller layer: notification feed and file/clipboard orchestration.

pub mod events;
pub mod orchestration;
