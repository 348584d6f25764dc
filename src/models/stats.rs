use serde::Deserialize;

/// Counters from `/admin/stats`. Missing counters read as zero.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_places: u64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub total_amenities: u64,
    #[serde(default)]
    pub admin_users: Option<u64>,
}
