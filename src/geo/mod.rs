//! Geographic primitives: locations and great-circle distance.
//!
//! - [`Location`]: immutable named point, radians internally
//! - [`haversine`]: distance in miles between two radian coordinates
//! - [`parse_locations`] / [`read_locations`]: `name,lat,lon` input in degrees

mod distance;
mod location;

pub use distance::{haversine, EARTH_RADIUS_MILES};
pub use location::{parse_locations, read_locations, Location};
