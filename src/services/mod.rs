//! Service layer for business logic
//!
//! Shared between the HTTP API and the CLI.

mod import_service;
pub mod import_validation;
pub mod pagination;
mod user_service;
mod venue_service;

pub use import_service::{ImportReport, ImportService};
pub use import_validation::{ImportRowError, validate_venue_row};
pub use pagination::{PaginationParams, PaginationSummary, parse_pagination, summarize};
pub use user_service::{CreateUserRequest, DEMO_USERS, UserService, is_valid_email};
pub use venue_service::{SortInfo, VenueListRequest, VenueListResponse, VenueService};
