//! Weather event scoring and date-of-loss selection for property claims.
//!
//! The [`geo`] module holds the spherical math, [`dol`] turns a property
//! location plus a set of normalized storm reports into a ranked, explainable
//! date-of-loss recommendation.

pub mod config;
pub mod dol;
pub mod error;
pub mod geo;
pub mod telemetry;
