pub mod api;
pub mod form;
pub mod integrity;
pub mod list_query;
