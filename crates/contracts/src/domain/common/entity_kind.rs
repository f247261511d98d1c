use serde::{Deserialize, Serialize};

/// Тип сущности консоли
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Artist,
    Album,
    Catalog,
    ProductType,
    Product,
    Supplier,
    Building,
    Location,
    Stock,
    Inventory,
}

/// Operations the backend offers for one entity type.
///
/// The set is not uniform: albums are only ever toggled, everything else is
/// hard-deleted and changes status through the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub status_toggle: bool,
    pub delete: bool,
}

impl EntityKind {
    pub fn all() -> [EntityKind; 10] {
        [
            EntityKind::Product,
            EntityKind::Catalog,
            EntityKind::Album,
            EntityKind::Artist,
            EntityKind::ProductType,
            EntityKind::Supplier,
            EntityKind::Building,
            EntityKind::Location,
            EntityKind::Inventory,
            EntityKind::Stock,
        ]
    }

    /// Сегмент REST-ресурса (`/api/{resource}/`)
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artistas",
            EntityKind::Album => "albumes",
            EntityKind::Catalog => "catalogos",
            EntityKind::ProductType => "tipos-producto",
            EntityKind::Product => "productos",
            EntityKind::Supplier => "proveedores",
            EntityKind::Building => "edificios",
            EntityKind::Location => "ubicaciones",
            EntityKind::Stock => "stocks",
            EntityKind::Inventory => "inventarios",
        }
    }

    /// Ключ экрана для навигации и query-строки
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Catalog => "catalog",
            EntityKind::ProductType => "product_type",
            EntityKind::Product => "product",
            EntityKind::Supplier => "supplier",
            EntityKind::Building => "building",
            EntityKind::Location => "location",
            EntityKind::Stock => "stock",
            EntityKind::Inventory => "inventory",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.key() == key)
    }

    /// Имя элемента для UI, с артиклем ("el álbum")
    pub fn element_name(&self) -> &'static str {
        match self {
            EntityKind::Artist => "el artista",
            EntityKind::Album => "el álbum",
            EntityKind::Catalog => "el catálogo",
            EntityKind::ProductType => "el tipo de producto",
            EntityKind::Product => "el producto",
            EntityKind::Supplier => "el proveedor",
            EntityKind::Building => "el edificio",
            EntityKind::Location => "la ubicación",
            EntityKind::Stock => "el stock",
            EntityKind::Inventory => "el inventario",
        }
    }

    /// С неопределённым артиклем ("un álbum")
    pub fn indefinite_name(&self) -> &'static str {
        match self {
            EntityKind::Artist => "un artista",
            EntityKind::Album => "un álbum",
            EntityKind::Catalog => "un catálogo",
            EntityKind::ProductType => "un tipo de producto",
            EntityKind::Product => "un producto",
            EntityKind::Supplier => "un proveedor",
            EntityKind::Building => "un edificio",
            EntityKind::Location => "una ubicación",
            EntityKind::Stock => "un stock",
            EntityKind::Inventory => "un inventario",
        }
    }

    /// Заголовок формы/кнопки ("Álbum")
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Artist => "Artista",
            EntityKind::Album => "Álbum",
            EntityKind::Catalog => "Catálogo",
            EntityKind::ProductType => "Tipo de Producto",
            EntityKind::Product => "Producto",
            EntityKind::Supplier => "Proveedor",
            EntityKind::Building => "Edificio",
            EntityKind::Location => "Ubicación",
            EntityKind::Stock => "Stock",
            EntityKind::Inventory => "Inventario",
        }
    }

    /// Имя списка для UI (пункт меню)
    pub fn list_name(&self) -> &'static str {
        match self {
            EntityKind::Artist => "Artistas",
            EntityKind::Album => "Álbumes",
            EntityKind::Catalog => "Catálogos",
            EntityKind::ProductType => "Tipo Producto",
            EntityKind::Product => "Productos",
            EntityKind::Supplier => "Proveedores",
            EntityKind::Building => "Edificios",
            EntityKind::Location => "Ubicaciones",
            EntityKind::Stock => "Stocks",
            EntityKind::Inventory => "Inventarios",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            EntityKind::Album => Capabilities {
                status_toggle: true,
                delete: false,
            },
            _ => Capabilities {
                status_toggle: false,
                delete: true,
            },
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
