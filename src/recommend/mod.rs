//! @acp:module "Recommend"
//! @acp:summary "Stack recommendation engine with budget-aware greedy selection"
//! @acp:domain recommend
//! @acp:layer feature

pub mod categories;
pub mod engine;
pub mod filter;
pub mod scoring;
pub mod selector;
pub mod types;
pub mod weights;

pub use categories::{category_boost, preferred_categories};
pub use engine::recommend;
pub use filter::filter_catalog;
pub use scoring::score;
pub use selector::{select, Selection};
pub use types::*;
pub use weights::{load_weights, preset_weights, FileWeightSource, WeightSource};
