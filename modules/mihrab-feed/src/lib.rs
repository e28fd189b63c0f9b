pub mod error;
pub mod overpass;
pub mod pipeline;
pub mod states;

pub use error::FeedError;
pub use overpass::{build_query, parse_masjid, OverpassClient, OverpassElement};
pub use pipeline::{CleanupSummary, FeedPipeline, FetchSummary, MasterIndex, StateFile};
pub use states::{bounding_box, state_title, BoundingBox, US_STATES};
