use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Remove and return the first element of the list stored at `key`. A missing key, a key of
/// another type and an empty list all reply with the null bulk string.
///
/// Ref: <https://redis.io/docs/latest/commands/lpop/>
#[derive(Debug, PartialEq)]
pub struct Lpop {
    pub key: String,
}

impl Executable for Lpop {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let res = match store.pop_left(&self.key) {
            Ok(value) => Frame::bulk(value),
            Err(_) => Frame::null(),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Lpop {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
