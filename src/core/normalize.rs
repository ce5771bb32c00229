use crate::models::{MatchId, MatchLookup};

/// Flatten a lookup result of any shape into match ids, preserving order
#[inline]
pub fn match_ids(lookup: MatchLookup) -> Vec<MatchId> {
    lookup.into_vec().into_iter().map(|m| m.id).collect()
}

/// Append the ids from `lookup` to `ids`
#[inline]
pub fn extend_match_ids(ids: &mut Vec<MatchId>, lookup: MatchLookup) {
    ids.extend(lookup.into_vec().into_iter().map(|m| m.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, OneOrMany};
    use chrono::Utc;

    fn m(id: MatchId) -> Match {
        Match {
            id,
            student_request_id: 1,
            host_id: 1,
            host_confirmed: false,
            student_confirmed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_every_shape_flattens() {
        assert!(match_ids(OneOrMany::Empty).is_empty());
        assert_eq!(match_ids(OneOrMany::One(m(3))), vec![3]);
        assert_eq!(match_ids(OneOrMany::Many(vec![m(1), m(2)])), vec![1, 2]);
        assert!(match_ids(OneOrMany::Many(vec![])).is_empty());
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut ids = vec![9];
        extend_match_ids(&mut ids, OneOrMany::Many(vec![m(4), m(2)]));
        extend_match_ids(&mut ids, OneOrMany::One(m(1)));
        assert_eq!(ids, vec![9, 4, 2, 1]);
    }
}
