use std::collections::HashSet;

use crate::link_scraper::SeasonLink;
use crate::season_scraper::SeasonRecord;

/// Concatenates per-season record sets, preserving link discovery order
/// and then page row order. Records are never re-sorted or mutated.
pub fn concatenate<T>(per_season: Vec<Vec<T>>) -> Vec<T> {
    per_season.into_iter().flatten().collect()
}

/// Every distinct squad name across the aggregate, first-seen order,
/// exact-string equality.
pub fn unique_teams(records: &[SeasonRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut teams = Vec::new();
    for record in records {
        if seen.insert(record.squad.clone()) {
            teams.push(record.squad.clone());
        }
    }
    teams
}

pub fn season_labels(links: &[SeasonLink]) -> Vec<String> {
    links.iter().map(|link| link.label.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(season: &str, squad: &str) -> SeasonRecord {
        SeasonRecord {
            season: season.to_string(),
            squad: squad.to_string(),
            ..SeasonRecord::default()
        }
    }

    #[test]
    fn concatenate_preserves_discovery_then_row_order() {
        let merged = concatenate(vec![
            vec![record("2000/2001", "Arsenal"), record("2000/2001", "Leeds United")],
            vec![record("1999/2000", "Arsenal")],
        ]);
        let squads: Vec<_> = merged
            .iter()
            .map(|r| format!("{} {}", r.season, r.squad))
            .collect();
        assert_eq!(
            squads,
            vec![
                "2000/2001 Arsenal",
                "2000/2001 Leeds United",
                "1999/2000 Arsenal"
            ]
        );
    }

    #[test]
    fn unique_teams_dedups_in_first_seen_order() {
        let records = vec![
            record("2000/2001", "Arsenal"),
            record("2000/2001", "Leeds United"),
            record("1999/2000", "Arsenal"),
            record("1999/2000", "Watford"),
            record("1998/1999", "Leeds United"),
        ];
        assert_eq!(
            unique_teams(&records),
            vec!["Arsenal", "Leeds United", "Watford"]
        );
    }
}
