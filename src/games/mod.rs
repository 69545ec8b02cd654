//! Dexterity game engines (logic only; rendering is the frontend's job).

pub mod tapping;
pub mod tracing;
