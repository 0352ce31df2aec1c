//! Named geographic locations and the comma-separated location file.

use super::distance::haversine;
use crate::error::{GeoTspError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument};

/// A named point on the globe, with coordinates stored in radians.
///
/// Locations are built once at load time and never mutated.
///
/// # Examples
///
/// ```
/// use u_geotsp::geo::Location;
///
/// let pole = Location::from_degrees("North Pole", 90.0, 0.0);
/// assert!((pole.latitude() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location from coordinates already in radians.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Creates a location from coordinates in degrees.
    pub fn from_degrees(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(name, latitude.to_radians(), longitude.to_radians())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in radians.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in radians.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other`, in miles.
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine(self.latitude, other.latitude, self.longitude, other.longitude)
    }
}

/// Parses `name,latitude,longitude` records (degrees) into locations.
///
/// Blank lines are skipped and fields beyond the third are ignored.
/// Line numbers in errors are 1-based.
///
/// # Examples
///
/// ```
/// use u_geotsp::geo::parse_locations;
///
/// let input = "LAX,33.9416,-118.4085\nJFK,40.6413,-73.7781\n";
/// let locations = parse_locations(input.as_bytes()).unwrap();
/// assert_eq!(locations.len(), 2);
/// assert_eq!(locations[1].name(), "JFK");
/// ```
pub fn parse_locations<R: BufRead>(reader: R) -> Result<Vec<Location>> {
    let mut locations = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or_default();
        if name.is_empty() {
            return Err(GeoTspError::Parse {
                line: line_no,
                message: "missing location name".into(),
            });
        }
        let latitude = parse_coordinate(fields.next(), "latitude", line_no)?;
        let longitude = parse_coordinate(fields.next(), "longitude", line_no)?;

        locations.push(Location::from_degrees(name, latitude, longitude));
    }

    if locations.is_empty() {
        return Err(GeoTspError::NoLocations);
    }
    debug!(count = locations.len(), "parsed locations");
    Ok(locations)
}

/// Reads and parses a location file from disk.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_locations<P: AsRef<Path>>(path: P) -> Result<Vec<Location>> {
    let file = File::open(path)?;
    parse_locations(BufReader::new(file))
}

fn parse_coordinate(field: Option<&str>, what: &'static str, line: usize) -> Result<f64> {
    let raw = field.filter(|f| !f.is_empty()).ok_or_else(|| GeoTspError::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    let value: f64 = raw.parse().map_err(|_| GeoTspError::Parse {
        line,
        message: format!("invalid {what} {raw:?}"),
    })?;
    if !value.is_finite() {
        return Err(GeoTspError::NumericDomain {
            context: what,
            value,
        });
    }
    Ok(value)
}
