use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns all the members of the set stored at `key`, in no particular order. A missing key or
/// a key of another type is an error.
///
/// Ref: <https://redis.io/docs/latest/commands/smembers/>
#[derive(Debug, PartialEq)]
pub struct Smembers {
    pub key: String,
}

impl Executable for Smembers {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let members = store.set_members(&self.key)?;
        Ok(Frame::bulks(members))
    }
}

impl TryFrom<&mut CommandParser> for Smembers {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
