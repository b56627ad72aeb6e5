pub mod a001_member;
pub mod a002_dependent;
pub mod a003_department;
pub mod a004_payment;
pub mod a005_activity_log;
