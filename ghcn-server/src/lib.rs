//! Weather station and temperature history server.
//!
//! Serves two queries over NOAA's GHCN-Daily data set: which stations with
//! temperature records for a span of years lie near a point, and what the
//! yearly and seasonal average temperatures at one station were.

pub mod catalog;
pub mod config;
pub mod geo;
pub mod noaa;
pub mod observations;
pub mod proximity;
pub mod service;
pub mod web;
