pub mod air_korea;
pub mod geocoding;

pub use air_korea::{AirKoreaClient, ReadingItem};
pub use geocoding::{GeocodeResult, GeocodingClient};
