use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Add `member` with `score` to the sorted set stored at `key`, replacing a value of any other
/// type with a new sorted set. An existing member only has its score updated, and is not
/// counted in the reply.
///
/// Ref: <https://redis.io/docs/latest/commands/zadd/>
#[derive(Debug, PartialEq)]
pub struct Zadd {
    pub key: String,
    pub score: f64,
    pub member: Bytes,
}

impl Executable for Zadd {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let added = store.sorted_set_add(&self.key, self.score, self.member);
        Ok(Frame::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zadd {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let score = parser.next_float()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, score, member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{dispatch, Command};

    #[test]
    fn parse() {
        let cmd = Command::try_from(Frame::bulks(["ZADD", "zset", "1.5", "member1"])).unwrap();

        assert_eq!(
            cmd,
            Command::Zadd(Zadd {
                key: "zset".to_string(),
                score: 1.5,
                member: Bytes::from("member1")
            })
        );
    }

    #[test]
    fn update_is_not_an_addition() {
        let mut store = Store::new();

        assert_eq!(
            dispatch(Frame::bulks(["ZADD", "zset", "1.0", "a"]), &mut store),
            Frame::Integer(1)
        );
        assert_eq!(
            dispatch(Frame::bulks(["ZADD", "zset", "2.0", "a"]), &mut store),
            Frame::Integer(0)
        );

        assert_eq!(
            store.sorted_set_range("zset", 0, -1),
            Ok(vec![Bytes::from("a")])
        );
    }

    #[test]
    fn invalid_score() {
        let mut store = Store::new();

        for score in ["abc", "nan", ""] {
            assert_eq!(
                dispatch(Frame::bulks(["ZADD", "zset", score, "a"]), &mut store),
                Frame::error("ERR value is not a valid float")
            );
        }

        assert!(!store.exists("zset"));
    }
}
