pub mod calendar;
pub mod member_detail;
pub mod monthly_schedule;

pub use calendar::{CalendarViewModel, DayTile, EventChip};
pub use member_detail::MemberDetailView;
pub use monthly_schedule::MonthlyScheduleView;
