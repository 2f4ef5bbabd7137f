pub mod del;
pub mod executable;
pub mod exists;
pub mod get;
pub mod hdel;
pub mod hget;
pub mod hgetall;
pub mod hset;
pub mod lpop;
pub mod lpush;
pub mod lrange;
pub mod rpop;
pub mod rpush;
pub mod sadd;
pub mod set;
pub mod smembers;
pub mod srem;
pub mod zadd;
pub mod zrange;
pub mod zrem;

use bytes::Bytes;
use std::{str, vec};
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::frame::Frame;
use crate::store::{Store, StoreError};

use del::Del;
use exists::Exists;
use get::Get;
use hdel::Hdel;
use hget::Hget;
use hgetall::Hgetall;
use hset::Hset;
use lpop::Lpop;
use lpush::Lpush;
use lrange::Lrange;
use rpop::Rpop;
use rpush::Rpush;
use sadd::Sadd;
use set::Set;
use smembers::Smembers;
use srem::Srem;
use zadd::Zadd;
use zrange::Zrange;
use zrem::Zrem;

/// Runs one request against the store. This is the only place where failures become replies:
/// malformed requests and storage errors are both answered with an error frame.
pub fn dispatch(frame: Frame, store: &mut Store) -> Frame {
    let cmd = match Command::try_from(frame) {
        Ok(cmd) => cmd,
        Err(err) => return Frame::error(err.to_string()),
    };

    cmd.exec(store)
        .unwrap_or_else(|err| Frame::error(format!("ERR {}", err)))
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Del(Del),
    Exists(Exists),
    Get(Get),
    Set(Set),

    Lpop(Lpop),
    Lpush(Lpush),
    Lrange(Lrange),
    Rpop(Rpop),
    Rpush(Rpush),

    Sadd(Sadd),
    Smembers(Smembers),
    Srem(Srem),

    Hdel(Hdel),
    Hget(Hget),
    Hgetall(Hgetall),
    Hset(Hset),

    Zadd(Zadd),
    Zrange(Zrange),
    Zrem(Zrem),
}

impl Executable for Command {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError> {
        match self {
            Command::Del(cmd) => cmd.exec(store),
            Command::Exists(cmd) => cmd.exec(store),
            Command::Get(cmd) => cmd.exec(store),
            Command::Set(cmd) => cmd.exec(store),
            Command::Lpop(cmd) => cmd.exec(store),
            Command::Lpush(cmd) => cmd.exec(store),
            Command::Lrange(cmd) => cmd.exec(store),
            Command::Rpop(cmd) => cmd.exec(store),
            Command::Rpush(cmd) => cmd.exec(store),
            Command::Sadd(cmd) => cmd.exec(store),
            Command::Smembers(cmd) => cmd.exec(store),
            Command::Srem(cmd) => cmd.exec(store),
            Command::Hdel(cmd) => cmd.exec(store),
            Command::Hget(cmd) => cmd.exec(store),
            Command::Hgetall(cmd) => cmd.exec(store),
            Command::Hset(cmd) => cmd.exec(store),
            Command::Zadd(cmd) => cmd.exec(store),
            Command::Zrange(cmd) => cmd.exec(store),
            Command::Zrem(cmd) => cmd.exec(store),
        }
    }
}

impl TryFrom<Frame> for Command {
    type Error = CommandParserError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        // Clients send commands as arrays of bulk strings, the command name first.
        let frames = match frame {
            Frame::Array(array) if !array.is_empty() => array,
            _ => return Err(CommandParserError::EmptyCommand),
        };

        let parser = &mut CommandParser::new(frames);

        let command_name = parser.parse_command_name()?;

        // Arity counts the command name itself.
        let cmd = match &command_name.to_uppercase()[..] {
            "DEL" => Command::Del(parser.parse(2)?),
            "EXISTS" => Command::Exists(parser.parse(2)?),
            "GET" => Command::Get(parser.parse(2)?),
            "SET" => Command::Set(parser.parse(3)?),
            "LPOP" => Command::Lpop(parser.parse(2)?),
            "LPUSH" => Command::Lpush(parser.parse(3)?),
            "LRANGE" => Command::Lrange(parser.parse(4)?),
            "RPOP" => Command::Rpop(parser.parse(2)?),
            "RPUSH" => Command::Rpush(parser.parse(3)?),
            "SADD" => Command::Sadd(parser.parse(3)?),
            "SMEMBERS" => Command::Smembers(parser.parse(2)?),
            "SREM" => Command::Srem(parser.parse(3)?),
            "HDEL" => Command::Hdel(parser.parse(3)?),
            "HGET" => Command::Hget(parser.parse(3)?),
            "HGETALL" => Command::Hgetall(parser.parse(2)?),
            "HSET" => Command::Hset(parser.parse(4)?),
            "ZADD" => Command::Zadd(parser.parse(4)?),
            "ZRANGE" => Command::Zrange(parser.parse(4)?),
            "ZREM" => Command::Zrem(parser.parse(3)?),
            _ => {
                return Err(CommandParserError::UnknownCommand {
                    command: command_name,
                })
            }
        };

        Ok(cmd)
    }
}

pub struct CommandParser {
    parts: vec::IntoIter<Frame>,
    /// Number of frames in the request, command name included.
    len: usize,
    command_name: String,
}

impl CommandParser {
    fn new(frames: Vec<Frame>) -> CommandParser {
        CommandParser {
            len: frames.len(),
            parts: frames.into_iter(),
            command_name: String::new(),
        }
    }

    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        let command_name = match self.parts.next() {
            Some(Frame::Bulk(Some(bytes))) => str::from_utf8(&bytes[..])
                .map(|s| s.to_string())
                .map_err(|_| CommandParserError::InvalidCommandFormat)?,
            _ => return Err(CommandParserError::InvalidCommandFormat),
        };

        self.command_name = command_name.clone();
        Ok(command_name)
    }

    /// Checks the request has exactly `arity` frames, then parses the arguments into `T`.
    fn parse<T>(&mut self, arity: usize) -> Result<T, CommandParserError>
    where
        T: for<'a> TryFrom<&'a mut CommandParser, Error = CommandParserError>,
    {
        if self.len != arity {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: self.command_name.to_lowercase(),
            });
        }

        T::try_from(self)
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or(CommandParserError::EndOfStream)?;

        match frame {
            Frame::Bulk(Some(bytes)) => Ok(bytes),
            frame => Err(CommandParserError::InvalidArgument { actual: frame }),
        }
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        let bytes = self.next_bytes()?;

        str::from_utf8(&bytes[..])
            .map(|s| s.to_string())
            .map_err(CommandParserError::InvalidUTF8String)
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        self.next_string()?
            .parse::<i64>()
            .map_err(|_| CommandParserError::NotAnInteger)
    }

    fn next_float(&mut self) -> Result<f64, CommandParserError> {
        let float = self
            .next_string()?
            .parse::<f64>()
            .map_err(|_| CommandParserError::NotAFloat)?;

        if float.is_nan() {
            return Err(CommandParserError::NotAFloat);
        }

        Ok(float)
    }
}

/// Errors raised while turning a request frame into a [`Command`]. The messages are sent to the
/// client verbatim.
#[derive(Debug, ThisError, PartialEq)]
pub enum CommandParserError {
    #[error("ERR empty command")]
    EmptyCommand,
    #[error("ERR invalid command format")]
    InvalidCommandFormat,
    #[error("ERR unknown command '{command}'")]
    UnknownCommand { command: String },
    #[error("ERR wrong number of arguments for '{command}' command")]
    WrongNumberOfArguments { command: String },
    #[error("ERR expected bulk string, got {actual}")]
    InvalidArgument { actual: Frame },
    #[error("ERR invalid UTF-8 string")]
    InvalidUTF8String(#[from] str::Utf8Error),
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,
    #[error("ERR value is not a valid float")]
    NotAFloat,
    #[error("ERR attempting to extract a value failed due to the frame being fully consumed")]
    EndOfStream,
}
