// Strata API Library
//
// This crate provides the REST layer for the metadata facade:
// HTTP handlers, routes, and response models.

pub mod handlers;
pub mod models;
pub mod routes;
