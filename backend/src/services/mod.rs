pub mod spin_service;
pub mod wheel_service;
