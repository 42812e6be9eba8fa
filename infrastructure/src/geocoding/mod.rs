//! Geocoding adapters.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;
