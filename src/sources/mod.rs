pub mod activity_repo;
pub mod roster_repo;
