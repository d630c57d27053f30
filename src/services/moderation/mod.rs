pub mod audit;
pub mod mute_service;
pub mod unmute_schedule;
