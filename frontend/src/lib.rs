//! Gym manager client core.
//!
//! The calendar grid and schedule bucketing live in [`domain`], the REST
//! client and configuration in [`services`], the per-view controllers in
//! [`hooks`], and the pure render functions in [`components`].

pub mod components;
pub mod domain;
pub mod hooks;
pub mod services;

pub use domain::calendar::{build_calendar_grid, build_calendar_grid_for, YearMonth};
pub use domain::schedule_buckets::{bucketize, schedules_for_cell, ScheduleBuckets};
pub use hooks::use_calendar::{CalendarController, FetchOutcome, FetchTicket};
pub use services::api::{ApiClient, ApiError, TokenStore};
pub use services::config::ClientConfig;
