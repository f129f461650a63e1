/// Extract a short type name from the full module path.
///
/// Given `"gap_pipeline::components::ThresholdFilter"`, returns `"ThresholdFilter"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
