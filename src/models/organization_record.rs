use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub organization: String,
    pub status: String,
    pub trial_start_date: NaiveDate,
    pub trial_end_date: Option<NaiveDate>,
}
