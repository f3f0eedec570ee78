mod matcher;
mod scoring;
mod weights;

pub use matcher::{match_tax_pro, CandidateView, RoutingOutcome};
pub use scoring::{complexity_level, complexity_score, required_specializations};
pub use weights::RoutingPolicy;
