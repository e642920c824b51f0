use serde::{Deserialize, Serialize};

/// Penalty weights subtracted from the starting trust score, one per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub future_date_penalty: u8,
    pub duplicate_penalty: u8,
    pub missing_certificate_penalty: u8,
    pub unverified_certificate_penalty: u8,
    pub unknown_organizer_penalty: u8,
    pub level_mismatch_penalty: u8,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            future_date_penalty: 40,
            duplicate_penalty: 35,
            missing_certificate_penalty: 20,
            unverified_certificate_penalty: 15,
            unknown_organizer_penalty: 25,
            level_mismatch_penalty: 10,
        }
    }
}
