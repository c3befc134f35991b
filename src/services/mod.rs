pub mod error;
pub mod sightengine;
