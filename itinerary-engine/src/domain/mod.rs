//! Domain types for the day timeline engine.
//!
//! Everything here is a value object: constructed fresh on each
//! computation, cheap to clone, safe to discard and recompute. The only
//! state that survives across computations lives in the route cache, not
//! in these types.

mod conflict;
mod segment;
mod stop;
mod time;
mod timeline;

pub use conflict::{Conflict, ConflictKind, Severity};
pub use segment::{TravelMode, TravelSegment};
pub use stop::{Coordinate, Stop, StopKind};
pub use time::{PlanTime, TimeError};
pub use timeline::{DayTimeline, ScheduledStop};
