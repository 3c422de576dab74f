pub mod app;
pub mod controls;
pub mod cover;
pub mod gauge;
pub mod key_points;
pub mod progress;
pub mod spinner;
pub mod toggle;
