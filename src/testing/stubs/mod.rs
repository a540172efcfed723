mod echo_classifier;

pub use echo_classifier::EchoClassifier;
