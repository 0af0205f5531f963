use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub organization: String,
    pub created_at: NaiveDateTime,
}
