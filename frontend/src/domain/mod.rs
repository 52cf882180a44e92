//! # Domain Module
//!
//! Pure client-side rules of the gym manager: nothing in here touches the
//! network or the clock unless a function says so.
//!
//! ## Module Organization
//!
//! - **calendar**: 42-cell month grid and month navigation (`YearMonth`)
//! - **schedule_buckets**: grouping schedules by date, per-cell caps, monthly totals
//! - **schedule_form**: schedule creation form defaults and validation
//! - **member_form**: member registration form validation
//! - **post_form**: activity feed post form validation
//!
//! ## Core Concepts
//!
//! - **Cell**: one date slot of the grid, possibly from an adjacent month
//! - **Date-key**: ISO `YYYY-MM-DD` string joining schedules onto cells
//! - **Bucket**: the schedules of one date-key, ordered by start time

pub mod calendar;
pub mod member_form;
pub mod post_form;
pub mod schedule_buckets;
pub mod schedule_form;
