use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

// https://redis.io/commands/zrem
#[derive(Debug, PartialEq)]
pub struct Zrem {
    pub key: String,
    pub member: Bytes,
}

impl Executable for Zrem {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let removed = store.sorted_set_remove(&self.key, &self.member)?;
        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zrem {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}
