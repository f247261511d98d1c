//! Универсальный экран справочника: список и форма, параметризованные
//! типом `CatalogEntity`.

pub mod details;
pub mod list;
pub mod view_model;

pub use list::entity_list;
