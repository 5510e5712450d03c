mod signaling_output;
mod signaling_service;
mod ws;

pub use signaling_output::*;
pub use signaling_service::*;
pub use ws::*;
