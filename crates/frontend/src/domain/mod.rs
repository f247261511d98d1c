//! Экраны справочников: один универсальный список на каждый тип

use crate::shared::entity_screen::entity_list;
use contracts::domain::a001_artist::aggregate::Artist;
use contracts::domain::a002_album::aggregate::Album;
use contracts::domain::a003_catalog::aggregate::Catalog;
use contracts::domain::a004_product_type::aggregate::ProductType;
use contracts::domain::a005_product::aggregate::Product;
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::domain::a007_building::aggregate::Building;
use contracts::domain::a008_location::aggregate::Location;
use contracts::domain::a009_stock::aggregate::Stock;
use contracts::domain::a010_inventory::aggregate::Inventory;
use contracts::domain::common::EntityKind;
use leptos::prelude::*;

pub fn screen_view(kind: EntityKind) -> AnyView {
    match kind {
        EntityKind::Artist => entity_list::<Artist>().into_any(),
        EntityKind::Album => entity_list::<Album>().into_any(),
        EntityKind::Catalog => entity_list::<Catalog>().into_any(),
        EntityKind::ProductType => entity_list::<ProductType>().into_any(),
        EntityKind::Product => entity_list::<Product>().into_any(),
        EntityKind::Supplier => entity_list::<Supplier>().into_any(),
        EntityKind::Building => entity_list::<Building>().into_any(),
        EntityKind::Location => entity_list::<Location>().into_any(),
        EntityKind::Stock => entity_list::<Stock>().into_any(),
        EntityKind::Inventory => entity_list::<Inventory>().into_any(),
    }
}
