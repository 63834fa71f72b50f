//! Pairing rename: validation and bulk record rewrite.

use derive_more::{Display, Error};
use tracing::{debug, instrument};

use super::group::group_by_pairing;
use crate::record::{GameRecord, Players};

/// Separator between the two names in a pairing title.
pub const TITLE_SEPARATOR: &str = " vs ";

/// Validation failures for a pairing rename.
///
/// Each message is written for direct display to the user; a failed
/// rename rewrites nothing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RenameError {
    /// The new title is blank after trimming.
    #[display("the new title must not be empty")]
    EmptyTitle,
    /// The new title already names a different pairing.
    #[display("a pairing named '{}' already exists", title)]
    DuplicateTitle {
        /// The colliding title.
        title: String,
    },
    /// The new title does not look like `"<player> vs <player>"`.
    #[display("'{}' is not of the form '<player> vs <player>'", title)]
    MalformedTitle {
        /// The rejected title.
        title: String,
    },
}

/// Renames a pairing across every one of its records.
///
/// The new title is trimmed, checked non-empty, checked against every
/// *other* group's title, and split on [`TITLE_SEPARATOR`] into the two
/// new names, in that order. On success, every record whose trimmed
/// names match `old_title`'s parts gets the new trimmed names; all other
/// records come back untouched, order preserved. The caller persists the
/// returned sequence.
///
/// # Errors
///
/// Returns a [`RenameError`] describing the first validation rule the new
/// title breaks.
#[instrument(skip(games), fields(count = games.len()))]
pub fn rename_pairing(
    games: &[GameRecord],
    old_title: &str,
    new_title: &str,
) -> Result<Vec<GameRecord>, RenameError> {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return Err(RenameError::EmptyTitle);
    }

    let clash = group_by_pairing(games)
        .iter()
        .any(|group| group.title() != old_title && group.title() == new_title);
    if clash {
        return Err(RenameError::DuplicateTitle {
            title: new_title.to_string(),
        });
    }

    let (new_x, new_o) = split_title(new_title).ok_or_else(|| RenameError::MalformedTitle {
        title: new_title.to_string(),
    })?;

    // An old title that does not split is a title no stored pairing can
    // have produced; the rewrite matches nothing and returns the records
    // unchanged.
    let Some((old_x, old_o)) = split_title(old_title) else {
        return Ok(games.to_vec());
    };

    let mut renamed = 0usize;
    let records = games
        .iter()
        .map(|record| {
            let players = record.players();
            if players.x().trim() == old_x && players.o().trim() == old_o {
                renamed += 1;
                GameRecord::new(
                    record.board().clone(),
                    record.result().clone(),
                    Players::new(new_x.clone(), new_o.clone()),
                    *record.timestamp(),
                )
            } else {
                record.clone()
            }
        })
        .collect();

    debug!(renamed, "Pairing records rewritten");
    Ok(records)
}

/// Splits a title into its two trimmed names.
///
/// `None` unless the title has exactly two non-empty parts around the
/// literal separator.
fn split_title(title: &str) -> Option<(String, String)> {
    let mut parts = title.split(TITLE_SEPARATOR);
    let x = parts.next()?.trim();
    let o = parts.next()?.trim();
    if parts.next().is_some() || x.is_empty() || o.is_empty() {
        return None;
    }
    Some((x.to_string(), o.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_two_parts() {
        assert_eq!(
            split_title("Ann vs Bo"),
            Some(("Ann".to_string(), "Bo".to_string()))
        );
    }

    #[test]
    fn test_split_title_trims_parts() {
        assert_eq!(
            split_title("Ann  vs  Bo"),
            Some(("Ann".to_string(), "Bo".to_string()))
        );
    }

    #[test]
    fn test_split_title_rejects_bad_shapes() {
        assert_eq!(split_title("AnnBo"), None);
        assert_eq!(split_title("Ann vs Bo vs Cy"), None);
        assert_eq!(split_title(" vs Bo"), None);
        assert_eq!(split_title("Ann vs "), None);
    }
}
