//! 데이터 수집 모듈.

pub mod basic_sync;
pub mod holder_collect;
pub mod pipeline;

pub use basic_sync::refresh_basic;
pub use holder_collect::collect_missing;
pub use pipeline::{run_pipeline, PipelineReport};
