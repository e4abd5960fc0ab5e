pub mod calendar_service;
pub mod datetime;
pub mod extraction;
pub mod intent_service;
pub mod scheduling;
