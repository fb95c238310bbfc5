//! Recurring chore scheduling
//!
//! The catalog is static. Given a date, [`chores_for_date`] returns the
//! definitions due that day; completion state lives elsewhere and is joined
//! in by [`chore_instances`] using [`ChoreDefinition::completion_key`].

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a chore resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDefinition {
    pub id: String,
    pub text: String,
    pub color: String,
    pub frequency: Frequency,
    /// 0 = Sunday .. 6 = Saturday. Only meaningful for weekly chores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
    /// Every other week, in phase with [`biweekly_reference`]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_biweekly: bool,
}

impl ChoreDefinition {
    fn new(id: &str, text: &str, color: &str, frequency: Frequency) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            color: color.to_string(),
            frequency,
            day_of_week: None,
            is_biweekly: false,
        }
    }

    fn on(mut self, day_of_week: u32) -> Self {
        self.day_of_week = Some(day_of_week);
        self
    }

    fn biweekly(mut self) -> Self {
        self.is_biweekly = true;
        self
    }

    /// Persistence key for the period containing `date`,
    /// e.g. `weekly-w1-2026-02-09`
    pub fn completion_key(&self, date: NaiveDate) -> String {
        format!(
            "{}-{}-{}",
            self.frequency,
            self.id,
            period_key(self.frequency, date)
        )
    }
}

/// A due chore joined with its completion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInstance {
    #[serde(flatten)]
    pub chore: ChoreDefinition,
    pub key: String,
    pub completed: bool,
}

/// The Monday that anchors biweekly parity (a recycling week)
pub fn biweekly_reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 9).unwrap_or_default()
}

/// The household chore catalog
pub fn default_catalog() -> Vec<ChoreDefinition> {
    use Frequency::*;

    vec![
        ChoreDefinition::new("d1", "Feed Dogs", "orange", Daily),
        ChoreDefinition::new("d2", "Clean up Toys", "yellow", Daily),
        ChoreDefinition::new("d3", "Water Flowers", "pink", Daily),
        ChoreDefinition::new("w1", "Laundry Day", "blue", Weekly),
        ChoreDefinition::new("w2", "Fold Clothes", "indigo", Weekly),
        ChoreDefinition::new("w3", "Dishwasher", "cyan", Weekly),
        ChoreDefinition::new("w4", "Dance Class", "purple", Weekly),
        ChoreDefinition::new("w5", "Show & Tell", "yellow", Weekly).on(1),
        ChoreDefinition::new("w6", "Gas the Car", "red", Weekly),
        ChoreDefinition::new("w7", "Take out Trash", "gray", Weekly).on(0),
        ChoreDefinition::new("w8", "Recycling", "green", Weekly)
            .on(1)
            .biweekly(),
        ChoreDefinition::new("m1", "Vacuum House", "blue", Monthly),
        ChoreDefinition::new("m2", "Wet Mop", "cyan", Monthly),
        ChoreDefinition::new("m3", "Baseboards", "orange", Monthly),
        ChoreDefinition::new("m4", "Wipe Kitchen", "yellow", Monthly),
    ]
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Whole weeks between the weeks of `date` and the biweekly reference
fn weeks_from_reference(date: NaiveDate) -> i64 {
    (week_start(date) - week_start(biweekly_reference())).num_days() / 7
}

/// Chores due on `date`, in catalog order
pub fn chores_for_date(catalog: &[ChoreDefinition], date: NaiveDate) -> Vec<&ChoreDefinition> {
    let weekday = date.weekday().num_days_from_sunday();
    let on_week = weeks_from_reference(date).rem_euclid(2) == 0;

    catalog
        .iter()
        .filter(|chore| match (chore.frequency, chore.day_of_week) {
            (Frequency::Daily | Frequency::Monthly, _) => true,
            (Frequency::Weekly, None) => true,
            (Frequency::Weekly, Some(day)) => day == weekday && (!chore.is_biweekly || on_week),
        })
        .collect()
}

/// Period component of a completion key
pub fn period_key(frequency: Frequency, date: NaiveDate) -> String {
    match frequency {
        Frequency::Daily => date.format("%Y-%m-%d").to_string(),
        Frequency::Weekly => week_start(date).format("%Y-%m-%d").to_string(),
        Frequency::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Due chores for `date` with completion flags from `completions`
pub fn chore_instances(
    catalog: &[ChoreDefinition],
    date: NaiveDate,
    completions: &HashMap<String, bool>,
) -> Vec<ChoreInstance> {
    to_instances(chores_for_date(catalog, date), date, completions)
}

/// Every chore in the catalog regardless of due date
pub fn chore_instances_all(
    catalog: &[ChoreDefinition],
    date: NaiveDate,
    completions: &HashMap<String, bool>,
) -> Vec<ChoreInstance> {
    to_instances(catalog.iter().collect(), date, completions)
}

fn to_instances(
    chores: Vec<&ChoreDefinition>,
    date: NaiveDate,
    completions: &HashMap<String, bool>,
) -> Vec<ChoreInstance> {
    chores
        .into_iter()
        .map(|chore| {
            let key = chore.completion_key(date);
            let completed = completions.get(&key).copied().unwrap_or(false);
            ChoreInstance {
                chore: chore.clone(),
                key,
                completed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ids<'a>(chores: &[&'a ChoreDefinition]) -> Vec<&'a str> {
        chores.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_reference_is_monday() {
        assert_eq!(biweekly_reference().weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn test_daily_and_monthly_always_included() {
        let catalog = default_catalog();
        let mut day = date("2026-01-01");
        for _ in 0..60 {
            let due = ids(&chores_for_date(&catalog, day));
            for id in ["d1", "d2", "d3", "m1", "m2", "m3", "m4"] {
                assert!(due.contains(&id), "{} missing on {}", id, day);
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_general_weekly_always_included() {
        let catalog = default_catalog();
        let due = ids(&chores_for_date(&catalog, date("2026-02-12")));
        for id in ["w1", "w2", "w3", "w4", "w6"] {
            assert!(due.contains(&id));
        }
    }

    #[test]
    fn test_monday_chore_only_on_monday() {
        let catalog = default_catalog();

        assert!(ids(&chores_for_date(&catalog, date("2026-02-16"))).contains(&"w5"));
        for d in ["2026-02-15", "2026-02-17", "2026-02-21"] {
            assert!(!ids(&chores_for_date(&catalog, date(d))).contains(&"w5"), "{}", d);
        }
    }

    #[test]
    fn test_sunday_chore() {
        let catalog = default_catalog();
        let due = ids(&chores_for_date(&catalog, date("2026-02-15")));
        assert!(due.contains(&"w7"));
        assert!(!due.contains(&"w5"));
    }

    #[test]
    fn test_biweekly_parity() {
        let catalog = default_catalog();
        let has_recycling = |d: &str| ids(&chores_for_date(&catalog, date(d))).contains(&"w8");

        assert!(has_recycling("2026-02-09"));
        assert!(has_recycling("2026-02-23"));
        assert!(!has_recycling("2026-02-16"));
        assert!(!has_recycling("2026-02-02"));
        // Negative distance keeps the same phase
        assert!(has_recycling("2026-01-26"));
        assert!(has_recycling("2025-12-29"));
        // Right week, wrong day
        assert!(!has_recycling("2026-02-10"));
    }

    #[test]
    fn test_biweekly_sunday_uses_monday_weeks() {
        let catalog =
            vec![ChoreDefinition::new("s", "Mow Lawn", "green", Frequency::Weekly).on(0).biweekly()];
        let due = |d: &str| !chores_for_date(&catalog, date(d)).is_empty();

        // The Sunday closing the reference week, not the one before it
        assert!(due("2026-02-15"));
        assert!(!due("2026-02-08"));
        assert!(!due("2026-02-22"));
        assert!(due("2026-03-01"));
        assert!(!due("2026-02-09"));
    }

    #[test]
    fn test_biweekly_without_day_is_plain_weekly() {
        let mut chore = ChoreDefinition::new("x", "Odd", "red", Frequency::Weekly);
        chore.is_biweekly = true;
        let catalog = vec![chore];

        assert_eq!(chores_for_date(&catalog, date("2026-02-16")).len(), 1);
        assert_eq!(chores_for_date(&catalog, date("2026-02-17")).len(), 1);
    }

    #[test]
    fn test_catalog_order_preserved() {
        let catalog = default_catalog();
        let due = ids(&chores_for_date(&catalog, date("2026-02-09")));
        assert_eq!(
            due,
            vec![
                "d1", "d2", "d3", "w1", "w2", "w3", "w4", "w5", "w6", "w8", "m1", "m2", "m3",
                "m4"
            ]
        );
    }

    #[test]
    fn test_empty_catalog() {
        assert!(chores_for_date(&[], date("2026-02-09")).is_empty());
    }

    #[test]
    fn test_completion_keys() {
        let catalog = default_catalog();
        let d1 = &catalog[0];
        let w1 = &catalog[3];
        let m1 = &catalog[11];

        assert_eq!(d1.completion_key(date("2026-02-11")), "daily-d1-2026-02-11");
        assert_eq!(m1.completion_key(date("2026-02-11")), "monthly-m1-2026-02");
        for d in ["2026-02-09", "2026-02-11", "2026-02-15"] {
            assert_eq!(w1.completion_key(date(d)), "weekly-w1-2026-02-09", "{}", d);
        }
        assert_eq!(w1.completion_key(date("2026-02-16")), "weekly-w1-2026-02-16");
    }

    #[test]
    fn test_chore_instances_join_completions() {
        let catalog = default_catalog();
        let mut completions = HashMap::new();
        completions.insert("daily-d1-2026-02-11".to_string(), true);
        completions.insert("daily-d2-2026-02-10".to_string(), true);

        let instances = chore_instances(&catalog, date("2026-02-11"), &completions);

        let d1 = instances.iter().find(|i| i.chore.id == "d1").unwrap();
        let d2 = instances.iter().find(|i| i.chore.id == "d2").unwrap();
        assert!(d1.completed);
        assert!(!d2.completed);
        assert!(instances.iter().all(|i| i.chore.id != "w5"));
    }

    #[test]
    fn test_chore_instances_all_includes_everything() {
        let catalog = default_catalog();
        let instances = chore_instances_all(&catalog, date("2026-02-11"), &HashMap::new());
        assert_eq!(instances.len(), catalog.len());
    }

    #[test]
    fn test_instance_serializes_flat() {
        let catalog = default_catalog();
        let instances = chore_instances(&catalog, date("2026-02-09"), &HashMap::new());
        let json = serde_json::to_value(&instances[0]).unwrap();

        assert_eq!(json["id"], "d1");
        assert_eq!(json["frequency"], "daily");
        assert_eq!(json["key"], "daily-d1-2026-02-09");
        assert_eq!(json["completed"], false);
    }
}
