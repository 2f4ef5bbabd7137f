use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Add `member` to the set stored at `key`, replacing a value of any other type with a new set.
/// Returns `1` if the member was added, `0` if it was already there.
///
/// Ref: <https://redis.io/docs/latest/commands/sadd/>
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: String,
    pub member: Bytes,
}

impl Executable for Sadd {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let added = store.set_add(&self.key, self.member);
        Ok(Frame::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sadd {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn add_members() {
        let mut store = Store::new();

        let cmd = Command::try_from(Frame::bulks(["SADD", "set", "member1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Sadd(Sadd {
                key: "set".to_string(),
                member: Bytes::from("member1")
            })
        );
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));

        let cmd = Command::try_from(Frame::bulks(["SADD", "set", "member2"])).unwrap();
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(1));

        let cmd = Command::try_from(Frame::bulks(["SADD", "set", "member1"])).unwrap();
        assert_eq!(cmd.exec(&mut store).unwrap(), Frame::Integer(0));
    }
}
