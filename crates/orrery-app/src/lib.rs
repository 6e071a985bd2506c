//! Orrery application: window and event loop, control panel and its egui
//! overlay, orbit camera, hover picking, and the adapter that turns
//! simulation snapshots into draw data.

pub mod controls;
pub mod frame_clock;
pub mod orbit_camera;
pub mod overlay;
pub mod picking;
pub mod platform;
pub mod scene;
pub mod window;
