use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Insert `value` at the head of the list stored at `key`. A missing key, or one holding
/// another type, starts over as an empty list. Returns the length of the list.
///
/// Ref: <https://redis.io/docs/latest/commands/lpush/>
#[derive(Debug, PartialEq)]
pub struct Lpush {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Lpush {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let len = store.push_left(&self.key, self.value);
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Lpush {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
