pub mod feature_registry;

pub use feature_registry::{
    FeatureFrame, FeatureRecord, FeatureSchema, FeatureValue, FORM_FEATURE_NAMES, FORM_FIELDS,
    JSON_FEATURE_NAMES,
};
