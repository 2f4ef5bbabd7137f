use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns `1` if `key` holds a value of any type, `0` otherwise.
///
/// Ref: <https://redis.io/docs/latest/commands/exists/>
#[derive(Debug, PartialEq)]
pub struct Exists {
    pub key: String,
}

impl Executable for Exists {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        Ok(Frame::Integer(i64::from(store.exists(&self.key))))
    }
}

impl TryFrom<&mut CommandParser> for Exists {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[test]
    fn any_type_exists() {
        let mut store = Store::new();
        store.set("string".to_string(), Bytes::from("v"));
        store.hash_set("hash", Bytes::from("f"), Bytes::from("v"));

        for key in ["string", "hash"] {
            let cmd = Command::try_from(Frame::bulks(["EXISTS", key])).unwrap();
            assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));
        }

        let cmd = Command::try_from(Frame::bulks(["EXISTS", "missing"])).unwrap();
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(0));
    }

    #[test]
    fn emptied_list_still_exists() {
        let mut store = Store::new();
        store.push_left("list", Bytes::from("a"));
        store.pop_left("list").unwrap();

        let cmd = Command::try_from(Frame::bulks(["EXISTS", "list"])).unwrap();

        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));
    }
}
