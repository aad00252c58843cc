pub mod advisor;
pub mod organizer;

pub use advisor::HeuristicAdvisor;
pub use organizer::{BillSchedule, CalendarDay, CalendarView, OrganizerService, PeriodActivity};
