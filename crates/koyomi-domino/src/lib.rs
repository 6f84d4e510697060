//! Conversions between HCL Domino `DateTime` values and the temporal
//! types used in the rest of the workspace.
//!
//! Domino reports a value's zone at whole-hour granularity only, which
//! misreports half- and quarter-hour zones (Adelaide, Kathmandu). The
//! bridge therefore reconstructs the full offset by differencing the
//! value's two text renderings, parsed with a pattern built from the
//! session's international settings and cached for the life of the
//! bridge.

pub mod bridge;
pub mod error;
pub mod intl;
pub mod session;
pub mod zone;

pub use bridge::DominoBridge;
pub use error::{BridgeError, BridgeResult};
pub use intl::{DateOrder, IntlSettings};
pub use session::{DateTimeValue, Session};
