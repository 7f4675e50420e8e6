//! Day timeline engine.
//!
//! Takes an unordered set of stops for a single day and produces an
//! ordered, time-stamped itinerary: travel segments between consecutive
//! stops, arrival/departure annotations, scheduling conflicts, and day
//! totals. Degrades gracefully when routing is unavailable — the day still
//! renders with a complete schedule, only travel estimates go missing.

mod arrival;
mod assemble;
mod config;
mod conflicts;
mod segments;

pub use arrival::{calculate_arrival_time, calculate_arrival_time_with};
pub use assemble::{TimelineError, TimelinePlanner, assemble_timeline};
pub use config::TimelineConfig;
pub use conflicts::detect_conflicts;
pub use segments::{build_segments, calculate_travel_segment, map_legs_to_segments};
