pub mod dto;
pub mod summary;

pub use dto::{ChartPoint, ChartSeries, EntityCount, StoreSummary};
pub use summary::{load_store_summary, summarize, TRACKED_KINDS};
