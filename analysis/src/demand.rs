/// Demand tier for a transaction-count score. Thresholds are inclusive
/// lower bounds, so a score sitting exactly on 70/80/90 takes the higher
/// label.
pub fn demand_label(score: i64) -> &'static str {
    if score >= 90 {
        "Very High Demand"
    } else if score >= 80 {
        "High Demand"
    } else if score >= 70 {
        "Moderate Demand"
    } else {
        "Low Demand"
    }
}
