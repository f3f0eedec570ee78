mod classifier;
mod steps;

pub use classifier::{AttributeDelta, KeywordClassifier, ResponseClassifier};
pub use steps::{questions_for, short_circuits};
