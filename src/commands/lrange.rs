use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns the elements of the list stored at `key` between the inclusive offsets `start` and
/// `stop`. Negative offsets count from the end of the list, so -1 is the last element. Out of
/// range offsets are clamped to the list and an inverted range is empty.
///
/// Ref: <https://redis.io/docs/latest/commands/lrange/>
#[derive(Debug, PartialEq)]
pub struct Lrange {
    pub key: String,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Lrange {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let values = store.list_range(&self.key, self.start, self.stop)?;
        Ok(Frame::bulks(values))
    }
}

impl TryFrom<&mut CommandParser> for Lrange {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{dispatch, Command};
    use bytes::Bytes;

    fn store() -> Store {
        let mut store = Store::new();
        for value in ["a", "b", "c"] {
            store.push_right("list", Bytes::from(value));
        }
        store
    }

    fn lrange(store: &mut Store, start: &'static str, stop: &'static str) -> Frame {
        let cmd = Command::try_from(Frame::bulks(["LRANGE", "list", start, stop])).unwrap();
        cmd.exec(store).unwrap()
    }

    #[test]
    fn parse() {
        let cmd = Command::try_from(Frame::bulks(["LRANGE", "list", "-2", "10"])).unwrap();

        assert_eq!(
            cmd,
            Command::Lrange(Lrange {
                key: "list".to_string(),
                start: -2,
                stop: 10
            })
        );
    }

    #[test]
    fn ranges() {
        let mut store = store();

        assert_eq!(lrange(&mut store, "0", "-1"), Frame::bulks(["a", "b", "c"]));
        assert_eq!(lrange(&mut store, "-100", "100"), Frame::bulks(["a", "b", "c"]));
        assert_eq!(lrange(&mut store, "2", "1"), Frame::Array(vec![]));
        assert_eq!(lrange(&mut store, "1", "-1"), Frame::bulks(["b", "c"]));
        assert_eq!(lrange(&mut store, "5", "10"), Frame::Array(vec![]));
    }

    #[test]
    fn invalid_index() {
        let mut store = store();

        assert_eq!(
            dispatch(Frame::bulks(["LRANGE", "list", "zero", "-1"]), &mut store),
            Frame::error("ERR value is not an integer or out of range")
        );
    }

    #[test]
    fn missing_key() {
        let mut store = Store::new();

        assert_eq!(
            dispatch(Frame::bulks(["LRANGE", "list", "0", "-1"]), &mut store),
            Frame::error("ERR key not found or wrong type")
        );
    }
}
