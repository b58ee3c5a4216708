//! Location resolution for Skycast.
//!
//! Turns free-text city names into candidate locations via the Open-Meteo
//! geocoding API, and device coordinates into synthetic locations with no
//! network round trip.

pub mod client;
pub mod types;

pub use client::GeoClient;
pub use types::Location;
