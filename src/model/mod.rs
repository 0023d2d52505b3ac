//! Domain model: POIs, visits, days, itineraries, and population members.
//!
//! POIs are immutable facts shared by every solution of a run; everything
//! else ([`Visit`], [`Day`], [`Itinerary`], [`Solution`]) is owned by a single
//! solution, so distinct solutions can be mutated concurrently without
//! locking.

mod itinerary;
mod poi;
mod solution;

pub use itinerary::{Day, Itinerary, Visit};
pub use poi::{Coord, OpeningHours, Poi, PoiId, WeekSchedule};
pub use solution::{Population, Solution};
