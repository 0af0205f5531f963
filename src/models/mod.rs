pub mod activity_event;
pub mod organization_record;
pub mod roster_row;

pub use activity_event::ActivityEvent;
pub use organization_record::OrganizationRecord;
pub use roster_row::{RosterRow, SheetValue};
