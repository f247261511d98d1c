pub mod api_client;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod entity_screen;
pub mod icons;
pub mod list_utils;
pub mod notifications;
pub mod theme;
