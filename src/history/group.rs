//! Pairing groups: grouping and aggregation over stored records.

use std::collections::{BTreeMap, HashMap};

use derive_getters::Getters;
use tracing::instrument;

use crate::record::{GameRecord, GameResult, Players};

/// Stats key for games that ended without a winner.
pub const DRAWS_KEY: &str = "Draws";

/// A record annotated with its 1-based position within a pairing group.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NumberedGame {
    /// 1-based position within the group.
    number: u32,
    /// The underlying stored record.
    record: GameRecord,
}

impl NumberedGame {
    /// Display label in the legacy `"Game N"` form.
    pub fn label(&self) -> String {
        format!("Game {}", self.number)
    }
}

/// All games between one ordered pair of names, with aggregate counts.
///
/// `stats` is keyed by the pairing's two names (taken from the group's
/// first game) plus [`DRAWS_KEY`]; each key is present even at zero.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PairingGroup {
    /// The pairing key, `"<x> vs <o>"`.
    title: String,
    /// The group's games in input order, numbered from 1.
    data: Vec<NumberedGame>,
    /// Win count per name, plus [`DRAWS_KEY`]; every key present at zero.
    stats: BTreeMap<String, u32>,
}

/// Groups records by player pairing.
///
/// Records are bucketed by the exact `"<x> vs <o>"` key built from their
/// trimmed names, in the fixed X-vs-O orientation: swapping seats forms a
/// different pairing. Groups come out in first-seen order; within a group,
/// records keep the input order and are numbered from 1. Each grouped
/// record carries the trimmed names.
#[instrument(skip(games), fields(count = games.len()))]
pub fn group_by_pairing(games: &[GameRecord]) -> Vec<PairingGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<GameRecord>> = HashMap::new();

    for record in games {
        let players = Players::new(record.players().x(), record.players().o());
        let title = format!("{} vs {}", players.x(), players.o());
        let trimmed = GameRecord::new(
            record.board().clone(),
            record.result().clone(),
            players,
            *record.timestamp(),
        );
        if !buckets.contains_key(&title) {
            order.push(title.clone());
        }
        buckets.entry(title).or_default().push(trimmed);
    }

    order
        .into_iter()
        .map(|title| {
            let records = buckets.remove(&title).unwrap_or_default();
            build_group(title, records)
        })
        .collect()
}

/// Numbers a group's records and tallies its win/draw counts.
///
/// Counter keys come from the first game's trimmed names; every record in
/// the bucket shares the pairing by construction. A result naming anybody
/// else counts as a draw, which is what the legacy history did with
/// records it could not attribute.
fn build_group(title: String, records: Vec<GameRecord>) -> PairingGroup {
    let x_name = records
        .first()
        .map(|record| record.players().x().clone())
        .unwrap_or_default();
    let o_name = records
        .first()
        .map(|record| record.players().o().clone())
        .unwrap_or_default();

    let mut stats = BTreeMap::new();
    stats.insert(x_name.clone(), 0);
    stats.insert(o_name.clone(), 0);
    stats.insert(DRAWS_KEY.to_string(), 0);

    let mut data = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let key = match record.result() {
            GameResult::Winner(name) if name == record.players().x() => x_name.as_str(),
            GameResult::Winner(name) if name == record.players().o() => o_name.as_str(),
            _ => DRAWS_KEY,
        };
        if let Some(count) = stats.get_mut(key) {
            *count += 1;
        }
        data.push(NumberedGame {
            number: position as u32 + 1,
            record,
        });
    }

    PairingGroup { title, data, stats }
}
