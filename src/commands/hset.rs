use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Set `field` in the hash stored at `key` to `value`, replacing a value of any other type with
/// a new hash. Returns `1` if the field is new, `0` if an existing field was overwritten.
///
/// Ref: <https://redis.io/docs/latest/commands/hset/>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: String,
    pub field: Bytes,
    pub value: Bytes,
}

impl Executable for Hset {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let added = store.hash_set(&self.key, self.field, self.value);
        Ok(Frame::Integer(i64::from(added)))
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, field, value })
    }
}
