use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError};

/// Returns every field of the hash stored at `key` followed by its value, as a flat array.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall/>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: String,
}

impl Executable for Hgetall {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        let pairs = store.hash_get_all(&self.key)?;

        let frames = pairs
            .into_iter()
            .flat_map(|(field, value)| [Frame::bulk(field), Frame::bulk(value)])
            .collect();

        Ok(Frame::Array(frames))
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
