pub mod align;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod timeline;
pub mod types;

pub use align::{decide_stretch, SegmentAligner, StretchDecision};
pub use config::RetimeConfig;
pub use error::RetimeError;
pub use pipeline::builder::TrackAssemblerBuilder;
pub use pipeline::defaults::{LinearTimeStretcher, StaticClipSource};
pub use pipeline::runtime::TrackAssembler;
pub use pipeline::traits::{ClipSource, TimeStretcher};
pub use timeline::{SlotRecord, SlotTimeline};
pub use types::{AlignPolicy, AssemblyReport, MasterTrack, Slot, SlotOutcome};
