use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns the members of the sorted set stored at `key` ranked between `start` and `stop`,
/// lowest score first. Offsets follow the same rules as [`Lrange`](super::lrange::Lrange).
///
/// Ref: <https://redis.io/docs/latest/commands/zrange/>
#[derive(Debug, PartialEq)]
pub struct Zrange {
    pub key: String,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Zrange {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let members = store.sorted_set_range(&self.key, self.start, self.stop)?;
        Ok(Frame::bulks(members))
    }
}

impl TryFrom<&mut CommandParser> for Zrange {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}
