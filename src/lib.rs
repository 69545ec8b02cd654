pub mod api; // localhost REST API for the mobile frontend
pub mod app_state;
pub mod classifier; // risk classifier invocation + thresholding
pub mod config;
pub mod content; // Learn-tab article library
pub mod db;
pub mod games; // dexterity game engines
pub mod home; // dashboard aggregation
pub mod journal; // daily mood journal
pub mod medications;
pub mod models;
pub mod reminders; // clear-and-rebuild reminder schedule
pub mod screening; // stroke capture → raster + stats → classifier
