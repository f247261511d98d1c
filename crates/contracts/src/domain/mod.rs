pub mod a001_artist;
pub mod a002_album;
pub mod a003_catalog;
pub mod a004_product_type;
pub mod a005_product;
pub mod a006_supplier;
pub mod a007_building;
pub mod a008_location;
pub mod a009_stock;
pub mod a010_inventory;
pub mod common;
pub mod registry;
