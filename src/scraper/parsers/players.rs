//! Player list parser for Chess-Results starting-rank pages.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::scraper::columns::{ColumnMap, ColumnSpan};
use crate::scraper::dom;
use crate::types::Player;

/// Parser for player list pages
pub struct PlayerListParser;

impl PlayerListParser {
    /// Parse players from HTML, in page order.
    ///
    /// A page without the data table, or without a "Name" column, yields no
    /// players.
    pub fn parse(html: &str) -> Vec<Player> {
        let document = Html::parse_document(html);

        let Some(table) = dom::data_table(&document) else {
            debug!("No data table in player list");
            return Vec::new();
        };

        let rows = dom::table_rows(&table);
        let Some(header) = dom::header_row(&rows) else {
            return Vec::new();
        };
        let columns = ColumnMap::from_labels(&dom::header_labels(&header));

        let Some(name_col) = columns.name else {
            debug!("Player list has no Name column");
            return Vec::new();
        };

        rows.iter()
            .filter(|row| row.id() != header.id())
            .filter(|row| is_data_row(row))
            .map(|row| Self::parse_row(row, name_col, &columns))
            .collect()
    }

    fn parse_row(row: &ElementRef, name_col: ColumnSpan, columns: &ColumnMap) -> Player {
        let cells = dom::child_cells(row);
        let cell = |span: Option<ColumnSpan>| -> Option<String> {
            span.and_then(|s| cells.get(s.first))
                .map(dom::text_of)
                .filter(|text| !text.is_empty())
        };

        Player {
            name: cells.get(name_col.first).map(dom::text_of).unwrap_or_default(),
            fide_id: cell(columns.fide_id),
            rating: cell(columns.rating).and_then(|text| parse_rating(&text)),
            lichess: cell(columns.club_city),
            team: cell(columns.team),
        }
    }
}

/// Row with `td` cells and no `th` cells
pub(crate) fn is_data_row(row: &ElementRef) -> bool {
    !dom::is_header_row(row) && dom::first_child_matching(row, |c| dom::is_tag(c, "td")).is_some()
}

/// Ratings are plain integers; "0" marks an unrated player on some pages
pub(crate) fn parse_rating(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Parse players from HTML
pub fn parse_players(html: &str) -> Vec<Player> {
    PlayerListParser::parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Starting-rank list with the Club/City column repurposed for Lichess usernames
    const CLUB_CITY_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="defaultDialog">
<table class="CRs1">
  <tr class="CRng1b">
    <th class="CRc">No.</th><th class="CRc"></th><th class="CR">Name</th><th class="CRc">FideID</th>
    <th class="CRc">FED</th><th class="CRr">Rtg</th><th class="CR">Club/City</th>
  </tr>
  <tr class="CRng1">
    <td class="CRc">1</td><td class="CRc">GM</td><td><a href="tnr1.aspx?snr=1">Giri, Anish</a></td>
    <td class="CRc">24116068</td><td class="CRc">NED</td><td class="CRr">2745</td><td>AnishGiri</td>
  </tr>
  <tr class="CRng2">
    <td class="CRc">2</td><td class="CRc">GM</td><td><a href="tnr1.aspx?snr=2">Navara, David</a></td>
    <td class="CRc">309095</td><td class="CRc">CZE</td><td class="CRr">2679</td><td>RealDavidNavara</td>
  </tr>
  <tr class="CRng1">
    <td class="CRc">3</td><td class="CRc"></td><td><a href="tnr1.aspx?snr=3">Novak, Jan</a></td>
    <td class="CRc">0</td><td class="CRc">CZE</td><td class="CRr">0</td><td></td>
  </tr>
</table>
</div>
</body>
</html>"#;

    // Same logical columns in a different order, no Club/City, with a Team column
    const TEAM_HTML: &str = r#"<html><body>
<table class="CRs1">
  <tr><th>Rtg</th><th>Team</th><th>FideID</th><th>Name</th></tr>
  <tr><td>2789</td><td>Russia</td><td>4168119</td><td>Nepomniachtchi Ian</td></tr>
  <tr><td>2640</td><td>Finland</td><td>501280</td><td>Koskinen Timo</td></tr>
</table>
</body></html>"#;

    #[test]
    fn test_parse_players_with_club_city() {
        let players = parse_players(CLUB_CITY_HTML);

        assert_eq!(players.len(), 3);
        assert_eq!(
            players[1],
            Player {
                name: "Navara, David".to_string(),
                fide_id: Some("309095".to_string()),
                rating: Some(2679),
                lichess: Some("RealDavidNavara".to_string()),
                team: None,
            }
        );
    }

    #[test]
    fn test_empty_optional_cells_are_absent() {
        let players = parse_players(CLUB_CITY_HTML);

        assert_eq!(players[2].name, "Novak, Jan");
        assert_eq!(players[2].rating, Some(0));
        assert_eq!(players[2].lichess, None);
    }

    #[test]
    fn test_column_order_independent() {
        let players = parse_players(TEAM_HTML);

        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0],
            Player {
                name: "Nepomniachtchi Ian".to_string(),
                fide_id: Some("4168119".to_string()),
                rating: Some(2789),
                lichess: None,
                team: Some("Russia".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_club_city_leaves_lichess_absent() {
        let players = parse_players(TEAM_HTML);
        assert!(players.iter().all(|p| p.lichess.is_none()));
    }

    #[test]
    fn test_short_rows_do_not_panic() {
        let html = r#"<table class="CRs1">
  <tr><th>Name</th><th>FideID</th><th>Rtg</th><th>Club/City</th></tr>
  <tr><td>Short, Row</td><td>123</td></tr>
</table>"#;
        let players = parse_players(html);

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Short, Row");
        assert_eq!(players[0].fide_id, Some("123".to_string()));
        assert_eq!(players[0].rating, None);
        assert_eq!(players[0].lichess, None);
    }

    #[test]
    fn test_header_without_th_uses_first_row() {
        let html = r#"<table class="CRs1">
  <tr class="CRng1b"><td>No.</td><td>Name</td><td>Rtg</td></tr>
  <tr class="CRng1"><td>1</td><td>Kasparov, Garry</td><td>2812</td></tr>
</table>"#;
        let players = parse_players(html);

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Kasparov, Garry");
        assert_eq!(players[0].rating, Some(2812));
    }

    #[test]
    fn test_no_table_yields_empty() {
        assert!(parse_players("<html><body><p>Tournament not found</p></body></html>").is_empty());
    }

    #[test]
    fn test_no_name_column_yields_empty() {
        let html = r#"<table class="CRs1"><tr><th>No.</th><th>Rtg</th></tr><tr><td>1</td><td>2000</td></tr></table>"#;
        assert!(parse_players(html).is_empty());
    }
}
