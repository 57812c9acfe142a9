//! Comparison module - Pairwise scoring of two areas and the written verdict.
//!
//! Data flows one way: [`AreaInput`]s and a [`PreferenceMode`] go in, a
//! [`ComparisonResult`] comes out. Text is chosen from fixed templates and
//! finished by an ordered list of post-processing rules.
//!
//! [`PreferenceMode`]: crate::domain::preference::PreferenceMode

mod bullets;
mod comparator;
mod context;
mod headline;
mod horizon;
mod normalization;
mod post_process;
mod result;
mod templates;
mod thresholds;

pub use comparator::{compare, Comparator};
pub use context::{AreaInput, ComparisonContext, DimensionPairs};
pub use horizon::{apply_horizon, horizon_multipliers};
pub use normalization::{normalize_pair, Better, PairScores};
pub use post_process::{PostProcessRule, VerdictDraft, POST_PROCESS_RULES};
pub use result::{
    ComparisonResult, Confidence, DataCoverage, DimensionScores, RawDeltas, SideCoverage,
    TradeoffBullet,
};
pub use templates::Topic;
pub use thresholds::{
    ComparisonThresholds, Magnitude, MagnitudeBands, CBI_BANDS,
    CLEAR_WINNER_GAP, EPI_BANDS, EPI_SIGNIFICANT, LEASE_BANDS, PREFERENCE_GAP, PRICE_BANDS,
    PRICE_SIGNIFICANT,
};
