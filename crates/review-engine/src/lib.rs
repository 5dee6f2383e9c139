//! Move-navigation and timeline engine for game review.
//!
//! Tracks "where we are" in a loaded game, supports branching into ad-hoc
//! exploratory lines, and coordinates navigation with the analysis stage
//! machine. Presentation, persistence and the analysis backend itself live
//! elsewhere; this crate only issues fire-and-forget requests to them.

pub mod config;
pub mod error;
pub mod navigator;
pub mod sound;
pub mod stage;
pub mod state;
pub mod timeline;
pub mod trigger;

pub use config::ReviewConfig;
pub use error::EngineError;
pub use navigator::Navigator;
pub use stage::Stage;
pub use state::{ExploringState, ReviewState, SnapshotStore};
pub use timeline::Timeline;
pub use trigger::{
    AnalysisJob, AnalysisRequest, AnalysisTrigger, ChannelAnalysisTrigger, SoundTrigger,
};
