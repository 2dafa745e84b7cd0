pub mod app;
pub mod logging;
pub mod notification;
pub mod realm;
pub mod settings;
pub mod storage;
pub mod store;
pub mod theme;
pub mod ui;
