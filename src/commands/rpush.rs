use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Append `value` to the tail of the list stored at `key`, see [`Lpush`](super::lpush::Lpush).
///
/// Ref: <https://redis.io/docs/latest/commands/rpush/>
#[derive(Debug, PartialEq)]
pub struct Rpush {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Rpush {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let len = store.push_right(&self.key, self.value);
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Rpush {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn push_to_tail() {
        let mut store = Store::new();

        for (i, value) in ["a", "b", "c"].into_iter().enumerate() {
            let cmd = Command::try_from(Frame::bulks(["RPUSH", "list", value])).unwrap();
            assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(i as i64 + 1));
        }

        assert_eq!(
            store.list_range("list", 0, -1),
            Ok(vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("c")])
        );
    }

    #[test]
    fn replaces_string() {
        let mut store = Store::new();
        store.set("key".to_string(), Bytes::from("value"));

        let cmd = Command::try_from(Frame::bulks(["RPUSH", "key", "a"])).unwrap();

        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));
        assert_eq!(store.list_range("key", 0, -1), Ok(vec![Bytes::from("a")]));
    }
}
