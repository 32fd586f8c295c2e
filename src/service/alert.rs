//! Threshold alerting over saved locations.
//!
//! Each cycle re-grades every saved location from the worst current reading
//! among its nearby stations and raises at most one combined notification.

use crate::db::sqlite::Store;
use crate::error::DustwatchError;
use crate::geo::Grade;
use crate::service::matcher;

/// Aliases bucketed by alert severity for one cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlertReport {
    /// Locations whose worst nearby grade is 3.
    pub warning: Vec<String>,
    /// Locations whose worst nearby grade is 4.
    pub caution: Vec<String>,
}

impl AlertReport {
    pub fn is_empty(&self) -> bool {
        self.warning.is_empty() && self.caution.is_empty()
    }

    /// One combined message listing all affected aliases.
    pub fn message(&self) -> String {
        format!(
            "warning (grade 3): {}\ncaution (grade 4): {}",
            self.warning.join(", "),
            self.caution.join(", ")
        )
    }
}

/// Buckets aliases by their worst nearby grade. Grades 1-2 and locations
/// with no graded reading at all classify as nothing.
pub fn summarize<I>(graded_locations: I) -> AlertReport
where
    I: IntoIterator<Item = (String, Option<Grade>)>,
{
    let mut report = AlertReport::default();
    for (alias, max_grade) in graded_locations {
        match max_grade {
            Some(Grade::Warning) => report.warning.push(alias),
            Some(Grade::Caution) => report.caution.push(alias),
            _ => {}
        }
    }
    report
}

pub struct AlertJob {
    store: Store,
    radius_km: f64,
}

impl AlertJob {
    pub fn new(store: Store, radius_km: f64) -> Self {
        Self { store, radius_km }
    }

    /// Grades every saved location against live nearby-station matching and
    /// current readings. Stations whose reading holds no valid index
    /// contribute nothing; "no data" never alerts and never reads as clean.
    pub async fn run(&self) -> Result<AlertReport, DustwatchError> {
        let stations = self.store.stations().await?;
        let locations = self.store.user_locations().await?;

        let mut graded = Vec::with_capacity(locations.len());
        for location in locations {
            let mut max_grade: Option<Grade> = None;
            for (station, _) in matcher::nearby(
                &stations,
                location.latitude,
                location.longitude,
                self.radius_km,
            ) {
                let Some(reading) = self.store.reading(&station.name).await? else {
                    continue;
                };
                if let Some(khai) = reading.khai {
                    let grade = Grade::from_khai(khai);
                    max_grade = Some(max_grade.map_or(grade, |m| m.max(grade)));
                }
            }
            graded.push((location.alias, max_grade));
        }

        Ok(summarize(graded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_one_and_two_do_not_classify() {
        let report = summarize(vec![
            ("home".to_string(), Some(Grade::Good)),
            ("office".to_string(), Some(Grade::Moderate)),
        ]);
        assert!(report.is_empty());
    }

    #[test]
    fn ungraded_location_does_not_classify() {
        let report = summarize(vec![("home".to_string(), None)]);
        assert!(report.is_empty());
    }

    #[test]
    fn buckets_warning_and_caution_aliases() {
        let report = summarize(vec![
            ("riverside".to_string(), Some(Grade::Caution)),
            ("home".to_string(), Some(Grade::Warning)),
            ("office".to_string(), Some(Grade::Good)),
        ]);
        assert_eq!(report.warning, vec!["home"]);
        assert_eq!(report.caution, vec!["riverside"]);
    }

    #[test]
    fn message_lists_both_buckets() {
        let report = summarize(vec![
            ("home".to_string(), Some(Grade::Warning)),
            ("riverside".to_string(), Some(Grade::Caution)),
        ]);
        let message = report.message();
        assert_eq!(
            message,
            "warning (grade 3): home\ncaution (grade 4): riverside"
        );
    }
}
