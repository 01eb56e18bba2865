pub mod random;
pub mod synthesizer;

pub use random::{RandomSource, RngSource, ZeroPerturbation};
pub use synthesizer::{FeatureSynthesizer, RiskBand, SyntheticFeatures};
