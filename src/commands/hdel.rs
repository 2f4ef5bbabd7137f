use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

// https://redis.io/commands/hdel
#[derive(Debug, PartialEq)]
pub struct Hdel {
    pub key: String,
    pub field: Bytes,
}

impl Executable for Hdel {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let deleted = store.hash_del(&self.key, &self.field)?;
        Ok(Frame::Integer(i64::from(deleted)))
    }
}

impl TryFrom<&mut CommandParser> for Hdel {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;

        Ok(Self { key, field })
    }
}
