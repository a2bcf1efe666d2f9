pub mod duty_repo;
pub mod staff_repo;
