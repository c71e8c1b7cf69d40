/// Maps raw SQL type tokens to numeric, textual, boolean or temporal buckets.
pub mod type_classifier;
