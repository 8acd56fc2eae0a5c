use chrono::NaiveTime;

/// Engine-wide defaults, usually loaded from the environment by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
    /// Platforms used when neither the request nor the brand names any.
    pub default_platforms: Vec<String>,
    /// IANA timezone stamped on generated scheduled posts.
    pub default_timezone: String,
    /// Posting slots rotated through by the content plan expander.
    pub posting_times: Vec<NaiveTime>,
    /// Caption placed on smart-schedule drafts.
    pub placeholder_caption: String,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            default_platforms: vec!["instagram".to_string()],
            default_timezone: "UTC".to_string(),
            posting_times: [(9, 0), (12, 0), (18, 0)]
                .into_iter()
                .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                .collect(),
            placeholder_caption: "Content to be generated".to_string(),
        }
    }
}
