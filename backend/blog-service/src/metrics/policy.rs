use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Ownership checks that refused a viewer, by resource and attempted action.
    pub static ref POLICY_DENIALS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_policy_denials_total",
        "Ownership checks denied segmented by resource and action",
        &["resource", "action"]
    )
    .expect("failed to register blog_policy_denials_total");
}
