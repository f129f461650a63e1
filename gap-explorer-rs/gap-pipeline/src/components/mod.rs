pub mod category_filter;
pub mod claim_preference_selector;
pub mod claimed_filter;
pub mod gap_score_selector;
pub mod threshold_filter;
