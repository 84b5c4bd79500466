//! Media-event normalization and timeline item construction.
//!
//! This crate is the pipeline between raw sheet rows and the rendered
//! timeline: it parses announcement dates, classifies coverage URLs,
//! formats card content with graceful degradation, and maps event batches
//! into timeline items while keeping an observable record of dropped rows.

pub mod card;
pub mod date;
pub mod error;
pub mod mapper;
pub mod media;

pub use card::{compose_card, format_card, CardContent, CardKind};
pub use date::parse_announced_date;
pub use error::DateError;
pub use mapper::{map_to_timeline_items, ItemKind, MappedBatch, SkippedRow, TimelineItem};
pub use media::{detect_media_type, MediaType};
