use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

// https://redis.io/commands/del
#[derive(Debug, PartialEq)]
pub struct Del {
    pub key: String,
}

impl Executable for Del {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let removed = store.remove(&self.key).is_some();
        Ok(Frame::Integer(i64::from(removed)))
    }
}

impl TryFrom<&mut CommandParser> for Del {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::commands::Command;

    use super::*;

    #[test]
    fn existing_and_missing_key() {
        let mut store = Store::new();
        store.push_right("foo", Bytes::from("a"));

        let cmd = Command::try_from(Frame::bulks(["DEL", "foo"])).unwrap();
        assert_eq!(
            cmd,
            Command::Del(Del {
                key: "foo".to_string()
            })
        );
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));
        assert!(!store.exists("foo"));

        let cmd = Command::try_from(Frame::bulks(["DEL", "foo"])).unwrap();
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(0));
    }

    #[test]
    fn zero_keys() {
        let err = Command::try_from(Frame::bulks(["DEL"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: "del".to_string()
            }
        );
    }

    #[test]
    fn invalid_frame() {
        let frame = Frame::Array(vec![Frame::bulk("DEL"), Frame::Integer(42)]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::InvalidArgument {
                actual: Frame::Integer(42)
            }
        );
    }
}
