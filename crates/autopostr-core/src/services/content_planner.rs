//! Content plan expansion.
//!
//! Turns a date range, a cadence and a brand into an ordered list of planned
//! post drafts. Nothing is persisted here.

use chrono::{NaiveDate, NaiveTime, Weekday};

use super::recurrence::RecurrenceRule;
use crate::domain::{BrandContext, Frequency, PlannedPostDraft, PlannerSettings, ordered_set};
use crate::error::{PlannerError, PlannerResult};

pub(crate) const SYSTEM_DEFAULT_PLATFORM: &str = "instagram";

/// Post themes rotated through the plan, each with the angle it contributes.
const THEMES: [(&str, &str); 6] = [
    ("Brand Introduction", "sets the stage for the campaign"),
    ("Product Spotlight", "puts the product front and centre"),
    ("Behind the Scenes", "builds trust by showing how the work gets done"),
    ("Customer Story", "adds social proof from real customers"),
    ("Tips & How-To", "delivers practical value the audience can save"),
    ("Community Question", "invites replies to lift engagement"),
];

/// Parameters for one plan expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    pub preferred_day: Option<Weekday>,
    /// Requested number of posts.
    pub count: i64,
    /// Fixed posting time; `None` rotates through the configured slots.
    pub posting_time: Option<NaiveTime>,
    /// Explicit platforms; empty falls back to the brand, then the settings.
    pub platforms: Vec<String>,
}

/// Result of an expansion. Fewer posts than requested is a normal outcome
/// when the range is too short for the cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExpansion {
    pub posts: Vec<PlannedPostDraft>,
    pub requested: usize,
}

impl PlanExpansion {
    pub fn produced(&self) -> usize {
        self.posts.len()
    }

    /// How many requested posts did not fit the range.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.posts.len())
    }

    pub fn is_truncated(&self) -> bool {
        self.shortfall() > 0
    }
}

/// Expand a plan request into dated post drafts within `[start_date, end_date]`.
pub fn expand_plan(
    request: &PlanRequest,
    brand: &BrandContext,
    settings: &PlannerSettings,
) -> PlannerResult<PlanExpansion> {
    let requested = usize::try_from(request.count)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(PlannerError::InvalidCount(request.count))?;

    if request.start_date > request.end_date {
        return Err(PlannerError::InvalidDateRange {
            start: request.start_date,
            end: request.end_date,
        });
    }

    let dates: Vec<NaiveDate> = RecurrenceRule::new(request.frequency, request.preferred_day)
        .occurrences(request.start_date)
        .take(requested)
        .take_while(|date| *date <= request.end_date)
        .collect();

    let platforms = resolve_platforms(request, brand, settings);
    let total = dates.len();

    let posts = dates
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let (theme, angle) = THEMES[index % THEMES.len()];
            PlannedPostDraft {
                title: title_for(theme, &brand.name),
                rationale: rationale_for(index, total, angle, brand, request.frequency),
                suggested_date: date,
                suggested_time: posting_time(request, settings, index),
                platforms: platforms.clone(),
                order_in_plan: index,
            }
        })
        .collect::<Vec<_>>();

    let expansion = PlanExpansion { posts, requested };
    if expansion.is_truncated() {
        tracing::info!(
            requested,
            produced = expansion.produced(),
            start = %request.start_date,
            end = %request.end_date,
            frequency = %request.frequency,
            "Content plan truncated to fit its date range"
        );
    }

    Ok(expansion)
}

fn resolve_platforms(
    request: &PlanRequest,
    brand: &BrandContext,
    settings: &PlannerSettings,
) -> Vec<String> {
    [
        &request.platforms,
        &brand.platforms,
        &settings.default_platforms,
    ]
    .into_iter()
    .map(ordered_set)
    .find(|platforms| !platforms.is_empty())
    .unwrap_or_else(|| vec![SYSTEM_DEFAULT_PLATFORM.to_string()])
}

fn posting_time(request: &PlanRequest, settings: &PlannerSettings, index: usize) -> NaiveTime {
    if let Some(time) = request.posting_time {
        return time;
    }
    match settings.posting_times.len() {
        0 => NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
        n => settings.posting_times[index % n],
    }
}

fn title_for(theme: &str, brand_name: &str) -> String {
    let brand_name = brand_name.trim();
    if brand_name.is_empty() {
        theme.to_string()
    } else {
        format!("{theme} | {brand_name}")
    }
}

fn rationale_for(
    index: usize,
    total: usize,
    angle: &str,
    brand: &BrandContext,
    frequency: Frequency,
) -> String {
    let position = match index {
        0 => "Opens the plan".to_string(),
        i if i + 1 == total => "Closes the plan".to_string(),
        i => format!("Post {} of {}", i + 1, total),
    };
    format!(
        "{position}: {angle}. Written in {} to keep the {frequency} rhythm consistent.",
        brand.tone.voice()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(start: NaiveDate, end: NaiveDate, frequency: Frequency, count: i64) -> PlanRequest {
        PlanRequest {
            start_date: start,
            end_date: end,
            frequency,
            preferred_day: Some(Weekday::Mon),
            count,
            posting_time: None,
            platforms: Vec::new(),
        }
    }

    fn brand() -> BrandContext {
        BrandContext {
            brand_profile_id: None,
            name: "Acme Coffee".to_string(),
            tone: Tone::Funny,
            platforms: vec!["TikTok".to_string(), "instagram".to_string()],
        }
    }

    #[test]
    fn test_full_plan_fits_range() {
        let req = request(date(2024, 6, 1), date(2024, 6, 30), Frequency::Weekly, 4);
        let plan = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();

        assert_eq!(plan.produced(), 4);
        assert_eq!(plan.shortfall(), 0);
        let dates: Vec<_> = plan.posts.iter().map(|p| p.suggested_date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 6, 3),
                date(2024, 6, 10),
                date(2024, 6, 17),
                date(2024, 6, 24)
            ]
        );
    }

    #[test]
    fn test_short_range_truncates_and_reports_shortfall() {
        let (start, end) = (date(2024, 6, 1), date(2024, 6, 20));
        let req = request(start, end, Frequency::Weekly, 10);
        let plan = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();

        assert_eq!(plan.requested, 10);
        assert_eq!(plan.produced(), 3);
        assert_eq!(plan.shortfall(), 7);
        assert!(plan.is_truncated());
        assert!(
            plan.posts
                .iter()
                .all(|p| p.suggested_date >= start && p.suggested_date <= end)
        );
    }

    #[test]
    fn test_range_without_any_occurrence_yields_empty_plan() {
        // Tuesday..Saturday never contains a Monday.
        let req = request(date(2024, 6, 4), date(2024, 6, 8), Frequency::Weekly, 2);
        let plan = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();
        assert_eq!(plan.produced(), 0);
        assert_eq!(plan.shortfall(), 2);
    }

    #[test]
    fn test_order_in_plan_is_dense_and_zero_based() {
        let req = request(date(2024, 1, 1), date(2024, 12, 31), Frequency::Monthly, 9);
        let plan = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();
        let order: Vec<_> = plan.posts.iter().map(|p| p.order_in_plan).collect();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_platforms_fall_back_from_request_to_brand_to_settings() {
        let mut req = request(date(2024, 6, 1), date(2024, 6, 30), Frequency::Weekly, 1);
        let settings = PlannerSettings::default();

        let plan = expand_plan(&req, &brand(), &settings).unwrap();
        assert_eq!(plan.posts[0].platforms, vec!["tiktok", "instagram"]);

        let plan = expand_plan(&req, &BrandContext::default(), &settings).unwrap();
        assert_eq!(plan.posts[0].platforms, vec!["instagram"]);

        req.platforms = vec!["LinkedIn".to_string()];
        let plan = expand_plan(&req, &brand(), &settings).unwrap();
        assert_eq!(plan.posts[0].platforms, vec!["linkedin"]);

        let empty = PlannerSettings {
            default_platforms: Vec::new(),
            ..PlannerSettings::default()
        };
        req.platforms.clear();
        let plan = expand_plan(&req, &BrandContext::default(), &empty).unwrap();
        assert_eq!(plan.posts[0].platforms, vec![SYSTEM_DEFAULT_PLATFORM]);
    }

    #[test]
    fn test_titles_and_rationales_reference_brand_and_position() {
        let req = request(date(2024, 6, 1), date(2024, 6, 30), Frequency::Weekly, 3);
        let plan = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();

        assert_eq!(plan.posts[0].title, "Brand Introduction | Acme Coffee");
        assert!(plan.posts[0].rationale.starts_with("Opens the plan"));
        assert!(plan.posts[1].rationale.starts_with("Post 2 of 3"));
        assert!(plan.posts[2].rationale.starts_with("Closes the plan"));
        assert!(plan.posts[0].rationale.contains("playful"));
        assert!(plan.posts[0].rationale.contains("weekly"));
    }

    #[test]
    fn test_posting_times_rotate_unless_fixed() {
        let mut req = request(date(2024, 6, 1), date(2024, 7, 31), Frequency::Weekly, 4);
        let settings = PlannerSettings::default();
        let plan = expand_plan(&req, &brand(), &settings).unwrap();
        let times: Vec<_> = plan.posts.iter().map(|p| p.suggested_time).collect();
        assert_eq!(
            times,
            vec![
                settings.posting_times[0],
                settings.posting_times[1],
                settings.posting_times[2],
                settings.posting_times[0]
            ]
        );

        let fixed = NaiveTime::from_hms_opt(20, 15, 0).unwrap();
        req.posting_time = Some(fixed);
        let plan = expand_plan(&req, &brand(), &settings).unwrap();
        assert!(plan.posts.iter().all(|p| p.suggested_time == fixed));
    }

    #[test]
    fn test_invalid_inputs_fail() {
        let req = request(date(2024, 6, 30), date(2024, 6, 1), Frequency::Weekly, 2);
        assert!(matches!(
            expand_plan(&req, &brand(), &PlannerSettings::default()),
            Err(PlannerError::InvalidDateRange { .. })
        ));

        let req = request(date(2024, 6, 1), date(2024, 6, 30), Frequency::Weekly, 0);
        assert!(matches!(
            expand_plan(&req, &brand(), &PlannerSettings::default()),
            Err(PlannerError::InvalidCount(0))
        ));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let req = request(date(2024, 6, 1), date(2024, 9, 30), Frequency::Biweekly, 5);
        let a = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();
        let b = expand_plan(&req, &brand(), &PlannerSettings::default()).unwrap();
        assert_eq!(a, b);
    }
}
