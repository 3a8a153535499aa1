//! Pairings parser for Chess-Results round pages.
//!
//! Two layout families exist:
//! - individual events (swiss or round robin): flat rows with two "Name"
//!   columns, white first;
//! - team events (swiss, round robin or knockout): every board row holds
//!   small nested tables, each with a colour marker `div` and a player name.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, info};

use crate::error::{Result, ScraperError};
use crate::scraper::columns::{ColumnMap, ColumnSpan};
use crate::scraper::dom;
use crate::scraper::parsers::players::{is_data_row, parse_rating};
use crate::types::{Pairing, Player};

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*$").expect("valid board number pattern"));

/// Table layout family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Flat rows, one game per row
    Individual,
    /// Board rows with nested per-side tables and colour markers
    Team,
}

impl Layout {
    /// Classify a data table by its nested tables
    pub fn detect(table: &ElementRef) -> Self {
        let nested = dom::descendants_matching(table, |el| dom::is_tag(el, "table")).len();
        if nested > 1 {
            Layout::Team
        } else {
            Layout::Individual
        }
    }
}

/// Parser for pairing pages
pub struct PairingsParser;

impl PairingsParser {
    /// Parse pairings from HTML.
    ///
    /// Sides are replaced by the matching entry of `players` (exact name
    /// match) when a player list is given. Pages without the data table yield
    /// no pairings.
    pub fn parse(html: &str, players: Option<&[Player]>) -> Result<Vec<Pairing>> {
        let document = Html::parse_document(html);

        let Some(table) = dom::data_table(&document) else {
            debug!("No data table in pairings page");
            return Ok(Vec::new());
        };

        let rows = dom::table_rows(&table);
        let Some(header) = dom::header_row(&rows) else {
            return Ok(Vec::new());
        };
        let columns = ColumnMap::from_labels(&dom::header_labels(&header));
        let body: Vec<ElementRef> = rows
            .iter()
            .filter(|row| row.id() != header.id())
            .copied()
            .collect();

        let layout = Layout::detect(&table);
        debug!("Pairings layout: {:?}, columns: {:?}", layout, columns);

        let pairings = match layout {
            Layout::Team => Self::parse_team(&table, &body, &columns, players)?,
            Layout::Individual => Self::parse_individual(&body, &columns, players),
        };

        info!("Parsed {} pairings ({:?} layout)", pairings.len(), layout);
        Ok(pairings)
    }

    fn parse_individual(
        rows: &[ElementRef],
        columns: &ColumnMap,
        players: Option<&[Player]>,
    ) -> Vec<Pairing> {
        let Some(name_col) = columns.name.filter(ColumnSpan::is_paired) else {
            debug!("Individual pairings need two Name columns");
            return Vec::new();
        };

        let mut pairings = Vec::new();
        for row in rows {
            let cells = dom::child_cells(row);
            if !is_data_row(row) || cells.len() < 2 {
                continue;
            }

            let name_at = |idx: usize| cells.get(idx).map(dom::text_of).unwrap_or_default();
            let white = resolve_player(name_at(name_col.first), players);
            let black = resolve_player(name_at(name_col.last), players);

            pairings.push(Pairing {
                white,
                black,
                board: (pairings.len() + 1).to_string(),
                reversed: false,
            });
        }
        pairings
    }

    fn parse_team(
        table: &ElementRef,
        rows: &[ElementRef],
        columns: &ColumnMap,
        players: Option<&[Player]>,
    ) -> Result<Vec<Pairing>> {
        let mut boards = BoardCounter::default();
        let mut pairings = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            if dom::nested_tables(row).is_empty() {
                // Match or round heading
                boards.section_break();
                continue;
            }

            let markers = colour_markers(table, row);
            let Some(first) = markers.first() else {
                return Err(ScraperError::AmbiguousColors { row: index + 1 });
            };
            let reversed = dom::has_class(first, dom::BLACK_MARKER_CLASS);

            let white_name = side_name(&markers, dom::WHITE_MARKER_CLASS);
            let black_name = side_name(&markers, dom::BLACK_MARKER_CLASS);

            let cells = dom::child_cells(row);
            let left = RowFields::read(&cells, columns, |span| span.first);
            let right = RowFields::read(&cells, columns, |span| span.last);
            let (white_fields, black_fields) = if reversed { (right, left) } else { (left, right) };

            let board = boards.next(explicit_board(&cells, columns));

            pairings.push(Pairing {
                white: white_fields.apply(resolve_player(white_name, players)),
                black: black_fields.apply(resolve_player(black_name, players)),
                board,
                reversed,
            });
        }

        Ok(pairings)
    }
}

/// Colour marker `div`s inside the row's nested tables, in document order
fn colour_markers<'a>(table: &ElementRef<'a>, row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    dom::descendants_matching(row, |el| {
        dom::is_tag(el, "div")
            && (dom::has_class(el, dom::WHITE_MARKER_CLASS) || dom::has_class(el, dom::BLACK_MARKER_CLASS))
            && dom::enclosing_table(el).map(|t| t.id()) != Some(table.id())
    })
}

/// Name next to the marker: text of the marker's outermost ancestor inside its table
fn side_name(markers: &[ElementRef], class: &str) -> String {
    markers
        .iter()
        .find(|marker| dom::has_class(marker, class))
        .and_then(|marker| dom::ancestor_until(marker, |el| dom::is_tag(el, "table")))
        .map(|block| dom::text_of(&block))
        .unwrap_or_default()
}

fn explicit_board(cells: &[ElementRef], columns: &ColumnMap) -> Option<u32> {
    let text = dom::text_of(cells.get(columns.board?.first)?);
    TRAILING_NUMBER
        .captures(&text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Look a name up in the player list, falling back to a bare record
fn resolve_player(name: String, players: Option<&[Player]>) -> Player {
    let found = players.and_then(|list| list.iter().find(|p| p.name == name));
    match found {
        Some(player) => player.clone(),
        None => Player::named(name),
    }
}

/// Per-side values read from the outer row's own cells
#[derive(Debug, Default)]
struct RowFields {
    rating: Option<u32>,
    lichess: Option<String>,
    team: Option<String>,
}

impl RowFields {
    fn read<F>(cells: &[ElementRef], columns: &ColumnMap, pick: F) -> Self
    where
        F: Fn(ColumnSpan) -> usize,
    {
        let cell = |span: Option<ColumnSpan>| -> Option<String> {
            span.and_then(|s| cells.get(pick(s)))
                .map(dom::text_of)
                .filter(|text| !text.is_empty())
        };

        Self {
            rating: cell(columns.rating).and_then(|text| parse_rating(&text)),
            lichess: cell(columns.club_city),
            team: cell(columns.team),
        }
    }

    /// Row values win over the player list
    fn apply(self, mut player: Player) -> Player {
        if self.rating.is_some() {
            player.rating = self.rating;
        }
        if self.lichess.is_some() {
            player.lichess = self.lichess;
        }
        if self.team.is_some() {
            player.team = self.team;
        }
        player
    }
}

/// Derives "<round>.<board>" labels for team pages.
///
/// A new round starts whenever the board number does not exceed the previous
/// one. Without a "Bo." column, boards are counted from each heading row.
#[derive(Debug, Default)]
struct BoardCounter {
    round: u32,
    last_board: Option<u32>,
    running: u32,
}

impl BoardCounter {
    fn section_break(&mut self) {
        self.running = 0;
    }

    fn next(&mut self, explicit: Option<u32>) -> String {
        let board = explicit.unwrap_or(self.running.saturating_add(1));
        self.running = board;

        match self.last_board {
            None => self.round = 1,
            Some(last) if board <= last => self.round = self.round.saturating_add(1),
            Some(_) => {}
        }
        self.last_board = Some(board);

        format!("{}.{}", self.round, board)
    }
}

/// Parse pairings from HTML
pub fn parse_pairings(html: &str, players: Option<&[Player]>) -> Result<Vec<Pairing>> {
    PairingsParser::parse(html, players)
}

/// One "<white> <black>" line per pairing, Lichess usernames where known
pub fn format_pairing_lines(pairings: &[Pairing]) -> String {
    pairings
        .iter()
        .map(|p| format!("{} {}", p.white.bulk_handle(), p.black.bulk_handle()))
        .collect::<Vec<_>>()
        .join("\n")
}
