// Service module exports

pub mod assignment;
pub mod board;
pub mod schedule_api;
pub mod settings;
pub mod slot_mapper;
