//! Round selection over scraped pairings.

use crate::types::Pairing;

/// Board number after the dot; `None` for undotted labels
fn sub_board(label: &str) -> Option<Option<u32>> {
    let (_, board) = label.split_once('.')?;
    Some(board.trim().parse().ok())
}

/// Pairings belonging to `round` (1-based).
///
/// Rounds are inferred from the board-within-round component of dotted
/// labels: every time it fails to increase, a new round begins. Lists with no
/// dotted labels (individual events) are a single round.
pub fn filter_round(pairings: &[Pairing], round: u32) -> Vec<Pairing> {
    let dotted = pairings.iter().any(|p| sub_board(&p.board).is_some());
    if !dotted {
        return if round == 1 {
            pairings.to_vec()
        } else {
            Vec::new()
        };
    }

    let mut current = 1;
    let mut last: Option<u32> = None;
    let mut selected = Vec::new();

    for pairing in pairings {
        if let Some(Some(board)) = sub_board(&pairing.board) {
            if matches!(last, Some(prev) if board <= prev) {
                current += 1;
            }
            last = Some(board);
        }
        if current == round {
            selected.push(pairing.clone());
        }
    }

    selected
}
