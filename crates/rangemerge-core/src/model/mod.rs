//! Module: model
//! Responsibility: example entities stored in the in-memory engine.

mod time_slot;

pub use time_slot::TimeSlot;
