use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns the value of `field` in the hash stored at `key`, or the null bulk string when the
/// key or the field is missing.
///
/// Ref: <https://redis.io/docs/latest/commands/hget/>
#[derive(Debug, PartialEq)]
pub struct Hget {
    pub key: String,
    pub field: Bytes,
}

impl Executable for Hget {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let res = match store.hash_get(&self.key, &self.field) {
            Ok(value) => Frame::bulk(value),
            Err(_) => Frame::null(),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Hget {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;

        Ok(Self { key, field })
    }
}
