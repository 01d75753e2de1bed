//! venuetrack - backend for a venue analytics dashboard
//!
//! Serves a paginated, filterable venue list, filter options, summary
//! statistics and a small user API over a relational store, and imports
//! venue seed data from CSV.
//!
//! Request flow: `api` handlers parse query strings into a
//! [`storage::VenueFilter`], `services` add pagination and response shaping,
//! and `storage` turns the filter into SQL against the chain/store/venue
//! tables. `interfaces` holds the one-shot CLI commands (migrate, seed,
//! config generate); `runtime` wires everything up for `serve`.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
