use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

// https://redis.io/commands/srem
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: String,
    pub member: Bytes,
}

impl Executable for Srem {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let removed = store.set_remove(&self.key, &self.member)?;
        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Srem {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}
