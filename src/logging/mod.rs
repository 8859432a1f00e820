mod counters;
mod deals_layer;
mod event_span;
mod events;
mod log_event;

pub use counters::*;
pub use deals_layer::DealLogsLayer;
pub use event_span::*;
pub use events::*;
pub use log_event::*;
