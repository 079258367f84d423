//! Most-liked queries over artists and songs.

use serde::Serialize;

/// Outcome of a most-liked scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MostPopular {
    /// The scanned collection has no entries at all.
    Empty,
    /// There are entries, but none has a single like.
    NoLikes,
    Found { name: String, likes: u32 },
}

impl MostPopular {
    /// Renders the outcome as the name of the winner, or one of the two
    /// sentinel messages.
    pub fn into_message(self, empty_message: &str, no_likes_message: &str) -> String {
        match self {
            MostPopular::Empty => empty_message.to_owned(),
            MostPopular::NoLikes => no_likes_message.to_owned(),
            MostPopular::Found { name, .. } => name,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MostPopular::Found { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Picks the entry with the most likes, in iteration order. Only a strictly
/// greater count replaces the current leader, so the earliest entry wins ties
/// and entries with zero likes never win.
pub(crate) fn most_liked<'a, I>(entries: I) -> MostPopular
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut seen_any = false;
    let mut leader: Option<(&str, u32)> = None;
    let mut max_likes = 0;

    for (name, likes) in entries {
        seen_any = true;
        if likes > max_likes {
            max_likes = likes;
            leader = Some((name, likes));
        }
    }

    match (seen_any, leader) {
        (false, _) => MostPopular::Empty,
        (true, None) => MostPopular::NoLikes,
        (true, Some((name, likes))) => MostPopular::Found {
            name: name.to_owned(),
            likes,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(most_liked(std::iter::empty()), MostPopular::Empty);
    }

    #[test]
    fn all_zero_likes_is_no_likes() {
        let entries = [("a", 0), ("b", 0)];
        assert_eq!(most_liked(entries), MostPopular::NoLikes);
    }

    #[test]
    fn earliest_entry_wins_ties() {
        let entries = [("a", 1), ("b", 3), ("c", 3), ("d", 2)];
        assert_eq!(
            most_liked(entries),
            MostPopular::Found {
                name: "b".to_owned(),
                likes: 3
            }
        );
    }

    #[test]
    fn renders_sentinels() {
        assert_eq!(MostPopular::Empty.into_message("empty", "none"), "empty");
        assert_eq!(MostPopular::NoLikes.into_message("empty", "none"), "none");
        let found = MostPopular::Found {
            name: "Something".to_owned(),
            likes: 2,
        };
        assert_eq!(found.name(), Some("Something"));
        assert_eq!(found.into_message("empty", "none"), "Something");
    }
}
