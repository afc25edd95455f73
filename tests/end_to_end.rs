use premscrape::aggregate::{concatenate, season_labels, unique_teams};
use premscrape::config::SeasonYearExtractor;
use premscrape::export::{write_column, write_records};
use premscrape::link_scraper::{SeasonLink, discover_links};
use premscrape::match_scraper::extract_season_matches;
use premscrape::schema::SchemaVariant;
use premscrape::season_scraper::extract_season_stats;

const BASE: &str = "https://fbref.com";
const SENTINEL: &str = "https://fbref.com/en/comps/9/Premier-League-Stats";

const INDEX_PAGE: &str = r#"
    <html><body>
      <a href="/en/comps/9/2020-2021/2020-2021-Premier-League-Stats">2020-2021</a>
      <a href="/en/comps/9/2000-2001/2000-2001-Premier-League-Stats">2000-2001</a>
      <a href="/en/comps/9/2020-2021/2020-2021-Premier-League-Stats">2020-2021 duplicate</a>
      <a href="/en/comps/9/1990-1991/1990-1991-Premier-League-Stats">1990-1991</a>
      <a href="/en/comps/9/2020-2021/schedule/2020-2021-Premier-League-Scores-and-Fixtures">2020-2021 fixtures</a>
      <a href="/en/comps/11/2020-2021/2020-2021-Serie-A-Stats">wrong competition</a>
    </body></html>"#;

fn standings_table(squads: &[(&str, u32, u32, u32, u32, u32, u32)]) -> String {
    let mut rows = String::new();
    for (rank, (squad, w, d, l, gf, ga, pts)) in squads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><th>{}</th><td>{squad}</td><td>38</td><td>{w}</td><td>{d}</td><td>{l}</td><td>{gf}</td><td>{ga}</td><td>{pts}</td></tr>",
            rank + 1
        ));
    }
    format!(
        r#"<table>
          <caption>Regular season Table</caption>
          <thead>
            <tr><th>Rk</th><th>Squad</th><th>MP</th><th>W</th><th>D</th><th>L</th><th>GF</th><th>GA</th><th>Pts</th></tr>
          </thead>
          <tbody>{rows}</tbody>
        </table>"#
    )
}

fn shooting_table(squads: &[&str]) -> String {
    let mut rows = String::new();
    for (index, squad) in squads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><th>{squad}</th><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            500 + index,
            200 + index,
            2 + index,
            5 + index
        ));
    }
    format!(
        r#"<table>
          <caption>Squad Shooting Table</caption>
          <thead>
            <tr><th colspan="1"></th><th colspan="4">Standard</th></tr>
            <tr><th>Squad</th><th>Sh</th><th>SoT</th><th>FK</th><th>PK</th></tr>
          </thead>
          <tbody>{rows}</tbody>
        </table>"#
    )
}

fn passing_table(squads: &[&str]) -> String {
    let mut rows = String::new();
    for (index, squad) in squads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><th>{squad}</th><td>{},500</td><td>{},000</td><td>85.{}</td></tr>",
            18 + index,
            21 + index,
            index
        ));
    }
    format!(
        r#"<table>
          <caption>Squad Passing Table</caption>
          <thead>
            <tr><th colspan="1"></th><th colspan="3">Total</th></tr>
            <tr><th>Squad</th><th>Cmp</th><th>Att</th><th>Cmp%</th></tr>
          </thead>
          <tbody>{rows}</tbody>
        </table>"#
    )
}

fn pass_types_table(squads: &[&str]) -> String {
    let mut rows = String::new();
    for (index, squad) in squads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><th>{squad}</th><td>{}</td></tr>",
            220 + index
        ));
    }
    format!(
        r#"<table>
          <caption>Squad Pass Types Table</caption>
          <thead>
            <tr><th colspan="1"></th><th colspan="1">Pass Types</th></tr>
            <tr><th>Squad</th><th>CK</th></tr>
          </thead>
          <tbody>{rows}</tbody>
        </table>"#
    )
}

fn misc_table(squads: &[&str]) -> String {
    let mut rows = String::new();
    for (index, squad) in squads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><th>{squad}</th><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            50 + index,
            index,
            380 + index,
            3 + index,
            index
        ));
    }
    format!(
        r#"<table>
          <caption>Squad Miscellaneous Stats Table</caption>
          <thead>
            <tr><th colspan="1"></th><th colspan="5">Performance</th></tr>
            <tr><th>Squad</th><th>CrdY</th><th>CrdR</th><th>Fls</th><th>PKcon</th><th>OG</th></tr>
          </thead>
          <tbody>{rows}</tbody>
        </table>"#
    )
}

fn season_page(starting_year: u16) -> String {
    match starting_year {
        2020 => {
            let squads = ["Manchester City", "Manchester United"];
            format!(
                "<html><body>{}{}{}{}{}</body></html>",
                standings_table(&[
                    ("Manchester City", 27, 5, 6, 83, 32, 86),
                    ("Manchester United", 21, 11, 6, 73, 44, 74),
                ]),
                shooting_table(&squads),
                passing_table(&squads),
                pass_types_table(&squads),
                misc_table(&squads)
            )
        }
        2000 => {
            let squads = ["Manchester United", "Arsenal"];
            format!(
                "<html><body>{}{}{}</body></html>",
                standings_table(&[
                    ("Manchester United", 24, 8, 6, 79, 31, 80),
                    ("Arsenal", 20, 10, 8, 63, 38, 70),
                ]),
                shooting_table(&squads),
                misc_table(&squads)
            )
        }
        1990 => format!(
            "<html><body>{}</body></html>",
            standings_table(&[
                ("Arsenal", 24, 13, 1, 74, 18, 83),
                ("Liverpool", 23, 7, 8, 77, 40, 76),
            ])
        ),
        year => panic!("no synthetic page for {year}"),
    }
}

const SCHEDULE_PAGE: &str = "<html><body><table>
      <caption>Scores &amp; Fixtures</caption>
      <thead>
        <tr><th>Wk</th><th>Date</th><th>Home</th><th>Score</th><th>Away</th><th>Venue</th></tr>
      </thead>
      <tbody>
        <tr><th>1</th><td>2020-09-12</td><td>Manchester City</td><td>3\u{2013}1</td><td>Manchester United</td><td>Etihad Stadium</td></tr>
        <tr><th>2</th><td>2020-09-19</td><td>Manchester United</td><td></td><td>Manchester City</td><td>Old Trafford</td></tr>
      </tbody>
    </table></body></html>";

#[test]
fn three_season_run_aggregates_and_exports() {
    let extractor = SeasonYearExtractor::new().unwrap();

    let season_urls = discover_links(INDEX_PAGE, "/en/comps/9/", "Premier-League-Stats", BASE);
    assert_eq!(season_urls.len(), 3, "duplicate links must collapse");

    let links: Vec<SeasonLink> = season_urls
        .into_iter()
        .map(|url| SeasonLink::from_url(url, SENTINEL, "2025/2026", &extractor).unwrap())
        .collect();
    assert_eq!(
        season_labels(&links),
        vec!["2020/2021", "2000/2001", "1990/1991"]
    );

    let mut per_season = Vec::new();
    for link in &links {
        let variant = SchemaVariant::for_starting_year(link.starting_year);
        let page = season_page(link.starting_year);
        per_season.push(extract_season_stats(&page, &link.label, variant).unwrap());
    }
    let standings = concatenate(per_season);

    // One row per squad per season, tagged in discovery order.
    assert_eq!(standings.len(), 6);
    let tags: Vec<_> = standings
        .iter()
        .map(|record| (record.season.as_str(), record.squad.as_str()))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("2020/2021", "Manchester City"),
            ("2020/2021", "Manchester United"),
            ("2000/2001", "Manchester United"),
            ("2000/2001", "Arsenal"),
            ("1990/1991", "Arsenal"),
            ("1990/1991", "Liverpool"),
        ]
    );

    // Variant-correct column population per row.
    let city = &standings[0];
    assert_eq!(city.points, 86);
    assert_eq!(city.shots, Some(500));
    assert_eq!(city.passes_completed, Some(18_500));
    assert_eq!(city.corner_kicks, Some(220));
    assert_eq!(city.penalties_conceded, Some(3));

    let united_2000 = &standings[2];
    assert_eq!(united_2000.shots_on_target, Some(200));
    assert_eq!(united_2000.yellow_cards, Some(50));
    assert_eq!(united_2000.shots, None);
    assert_eq!(united_2000.passes_completed, None);
    assert_eq!(united_2000.corner_kicks, None);

    let arsenal_1990 = &standings[4];
    assert_eq!(arsenal_1990.points, 83);
    assert_eq!(arsenal_1990.shots_on_target, None);
    assert_eq!(arsenal_1990.yellow_cards, None);

    let teams = unique_teams(&standings);
    assert_eq!(
        teams,
        vec!["Manchester City", "Manchester United", "Arsenal", "Liverpool"]
    );

    // Schedule side: discovery, extraction, score splitting.
    let schedule_urls = discover_links(INDEX_PAGE, "/en/comps/9/", "schedule", BASE);
    assert_eq!(schedule_urls.len(), 1);
    let schedule_link = SeasonLink::from_url(
        schedule_urls.into_iter().next().unwrap(),
        SENTINEL,
        "2025/2026",
        &extractor,
    )
    .unwrap();
    assert_eq!(schedule_link.label, "2020/2021");
    let matches = extract_season_matches(SCHEDULE_PAGE, &schedule_link.label).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].home_goals, Some(3));
    assert_eq!(matches[0].away_goals, Some(1));
    assert_eq!(matches[1].home_goals, None);

    // Export and read back.
    let dir = tempfile::tempdir().unwrap();
    write_column(&dir.path().join("seasons.csv"), "season", &season_labels(&links)).unwrap();
    write_records(&dir.path().join("standings.csv"), &standings).unwrap();
    write_column(&dir.path().join("teams.csv"), "team", &teams).unwrap();
    write_records(&dir.path().join("matches.csv"), &matches).unwrap();

    let seasons_csv = std::fs::read_to_string(dir.path().join("seasons.csv")).unwrap();
    assert_eq!(seasons_csv, "season\n2020/2021\n2000/2001\n1990/1991\n");

    let standings_csv = std::fs::read_to_string(dir.path().join("standings.csv")).unwrap();
    assert_eq!(standings_csv.lines().count(), 7);
    let header = standings_csv.lines().next().unwrap();
    assert_eq!(
        header,
        "season,squad,wins,draws,losses,goals_for,goals_against,points,\
         shots,shots_on_target,free_kick_goals,penalty_goals,passes_completed,\
         passes_attempted,pass_completion_pct,corner_kicks,yellow_cards,red_cards,\
         fouls,penalties_conceded,own_goals"
    );

    let matches_csv = std::fs::read_to_string(dir.path().join("matches.csv")).unwrap();
    let mut match_lines = matches_csv.lines();
    assert_eq!(
        match_lines.next().unwrap(),
        "season,week,date,home_team,away_team,venue,home_goals,away_goals"
    );
    assert_eq!(
        match_lines.next().unwrap(),
        "2020/2021,1,2020-09-12,Manchester City,Manchester United,Etihad Stadium,3,1"
    );
    assert_eq!(
        match_lines.next().unwrap(),
        "2020/2021,2,2020-09-19,Manchester United,Manchester City,Old Trafford,,"
    );
}
