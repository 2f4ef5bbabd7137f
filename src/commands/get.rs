use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Get the value of `key`. If the key does not exist, or holds something other than a string,
/// the null bulk string is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/get/>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: String,
}

impl Executable for Get {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let res = match store.get(&self.key) {
            Ok(value) => Frame::bulk(value),
            Err(_) => Frame::null(),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Get {
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
    fn existing_key() {
        let frame = Frame::bulks(["GET", "key1"]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Get(Get {
                key: String::from("key1")
            })
        );

        let mut store = Store::new();
        store.set(String::from("key1"), Bytes::from("1"));

        let result = cmd.exec(&mut store).unwrap();

        assert_eq!(result, Frame::bulk("1"));
    }

    #[test]
    fn missing_key() {
        let cmd = Command::try_from(Frame::bulks(["GET", "key1"])).unwrap();
        let mut store = Store::new();

        let result = cmd.exec(&mut store).unwrap();

        assert_eq!(result, Frame::null());
        assert_eq!(result.serialize(), b"$-1\r\n");
    }

    #[test]
    fn wrong_type() {
        let cmd = Command::try_from(Frame::bulks(["GET", "key1"])).unwrap();
        let mut store = Store::new();
        store.push_left("key1", Bytes::from("a"));

        let result = cmd.exec(&mut store).unwrap();

        assert_eq!(result, Frame::null());
    }
}
