pub mod use_calendar;
pub mod use_members;

pub use use_calendar::CalendarController;
pub use use_members::MembersController;
