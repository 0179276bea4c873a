pub mod bayes;
pub mod capability;
pub mod config;
pub mod multi;

pub use bayes::{BayesClassifier, BayesFactory, BayesModel, ModelError};
pub use capability::{CategoryClassifier, ClassifierFactory};
pub use config::ClassifierConfig;
pub use multi::MultiClassifier;
