use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Remove and return the last element of the list stored at `key`, with the same miss replies
/// as [`Lpop`](super::lpop::Lpop).
///
/// Ref: <https://redis.io/docs/latest/commands/rpop/>
#[derive(Debug, PartialEq)]
pub struct Rpop {
    pub key: String,
}

impl Executable for Rpop {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let res = match store.pop_right(&self.key) {
            Ok(value) => Frame::bulk(value),
            Err(_) => Frame::null(),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Rpop {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
