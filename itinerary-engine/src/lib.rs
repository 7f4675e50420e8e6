//! Day timeline engine for a personal trip planner.
//!
//! Turns an unordered set of points of interest for a day into an ordered,
//! time-stamped itinerary: travel segments between consecutive stops,
//! arrival/departure times, scheduling conflicts (arriving before opening,
//! staying past closing, an overlong day), and per-day route caching for
//! multi-day trips. Degrades gracefully when the routing service is
//! unavailable — the day still renders with a full schedule, only travel
//! estimates go missing.

pub mod cache;
pub mod domain;
pub mod routing;
pub mod timeline;
