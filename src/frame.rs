// Wire format: https://redis.io/docs/reference/protocol-spec

use std::fmt;

use bytes::Buf;
use bytes::Bytes;
use std::io::Cursor;
use std::string::FromUtf8Error;
use thiserror::Error as ThisError;

pub(crate) static CRLF: &[u8; 2] = b"\r\n";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("not enough data is available to parse an entire frame")]
    Incomplete,
    #[error("invalid frame data type: {0}")]
    InvalidDataType(u8),
    /// Invalid message encoding.
    #[error("{0}")]
    Other(crate::Error),
}

/// A single protocol value. Requests are always an `Array` of `Bulk` strings, responses may be
/// any variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    /// A length-prefixed string, `None` being the null bulk string (`$-1`).
    Bulk(Option<Bytes>),
    Array(Vec<Frame>),
}

impl Frame {
    pub fn ok() -> Frame {
        Frame::Simple("OK".to_string())
    }

    /// Simple strings are a single line on the wire, CR and LF are replaced with spaces.
    pub fn simple(msg: impl Into<String>) -> Frame {
        Frame::Simple(line_safe(msg.into()))
    }

    /// Same line restriction as [`Frame::simple`]. Error messages may echo client input.
    pub fn error(msg: impl Into<String>) -> Frame {
        Frame::Error(line_safe(msg.into()))
    }

    pub fn bulk(data: impl Into<Bytes>) -> Frame {
        Frame::Bulk(Some(data.into()))
    }

    pub fn null() -> Frame {
        Frame::Bulk(None)
    }

    /// Builds an array of bulk strings, the usual shape of multi-value replies.
    pub fn bulks<I, T>(items: I) -> Frame
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Frame::Array(items.into_iter().map(Frame::bulk).collect())
    }

    /// Decodes exactly one frame starting at `offset`, returning it along with the offset right
    /// after its last byte. Running out of input is an error, never a suspension.
    pub fn decode(src: &[u8], offset: usize) -> Result<(Frame, usize), Error> {
        let mut cursor = Cursor::new(src);
        cursor.set_position(offset as u64);

        let frame = Frame::parse(&mut cursor)?;

        Ok((frame, cursor.position() as usize))
    }

    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, Error> {
        // The first byte always identifies the type. Subsequent bytes constitute the type's
        // contents.
        let first_byte = get_byte(src)?;
        let data_type = DataType::try_from(first_byte)?;

        match data_type {
            DataType::SimpleString => {
                let line = get_line(src)?.to_vec();
                let string = String::from_utf8(line)?;
                Ok(Frame::Simple(string))
            }
            DataType::SimpleError => {
                let line = get_line(src)?.to_vec();
                let string = String::from_utf8(line)?;
                Ok(Frame::Error(string))
            }
            DataType::Integer => {
                let integer = get_integer(src)?;
                Ok(Frame::Integer(integer))
            }
            // $<length>\r\n<data>\r\n
            DataType::BulkString => {
                let length = get_integer(src)?;

                if length == -1 {
                    return Ok(Frame::Bulk(None));
                }

                let length = usize::try_from(length)
                    .map_err(|_| Error::from(format!("protocol error; invalid bulk length {length}")))?;

                if src.remaining() < length + CRLF.len() {
                    return Err(Error::Incomplete);
                }

                let start = src.position() as usize;
                let data = Bytes::copy_from_slice(&src.get_ref()[start..start + length]);
                src.advance(length);

                if &src.chunk()[..CRLF.len()] != CRLF {
                    return Err("protocol error; bulk string is not terminated by CRLF".into());
                }
                src.advance(CRLF.len());

                Ok(Frame::Bulk(Some(data)))
            }
            // *<number-of-elements>\r\n<element-1>...<element-n>
            DataType::Array => {
                let length = get_integer(src)?;

                // There is no null array in the value model, it collapses into an empty one.
                if length == -1 {
                    return Ok(Frame::Array(vec![]));
                }

                let length = usize::try_from(length)
                    .map_err(|_| Error::from(format!("protocol error; invalid array length {length}")))?;

                // Every element takes at least 3 bytes, don't trust the header for allocation.
                let mut frames = Vec::with_capacity(length.min(src.remaining() / 3));
                for _ in 0..length {
                    let frame = Self::parse(src)?;
                    frames.push(frame);
                }

                Ok(Frame::Array(frames))
            }
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Frame::Simple(s) => serialize_line(DataType::SimpleString, s),
            Frame::Error(s) => serialize_line(DataType::SimpleError, s),
            Frame::Integer(i) => {
                let digits = i.to_string();
                let mut bytes = Vec::with_capacity(1 + digits.len() + CRLF.len());
                bytes.push(u8::from(DataType::Integer));
                bytes.extend_from_slice(digits.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Bulk(Some(data)) => {
                let length_str = data.len().to_string();
                let mut result = Vec::with_capacity(
                    1 + length_str.len() + CRLF.len() + data.len() + CRLF.len(),
                );
                result.push(u8::from(DataType::BulkString));
                result.extend_from_slice(length_str.as_bytes());
                result.extend_from_slice(CRLF);
                result.extend_from_slice(data);
                result.extend_from_slice(CRLF);
                result
            }
            Frame::Bulk(None) => {
                let mut bytes = Vec::with_capacity(5);
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(b"-1");
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Array(arr) => {
                let length_str = arr.len().to_string();
                let mut bytes = Vec::with_capacity(1 + length_str.len() + CRLF.len());
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(length_str.as_bytes());
                bytes.extend_from_slice(CRLF);
                for frame in arr {
                    bytes.extend(frame.serialize());
                }
                bytes
            }
        }
    }
}

fn line_safe(s: String) -> String {
    if s.contains(['\r', '\n']) {
        s.replace(['\r', '\n'], " ")
    } else {
        s
    }
}

// A payload built without the constructors may still hold CR or LF, it must not end the line
// early and leak a second frame onto the wire.
fn serialize_line(data_type: DataType, s: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
    bytes.push(u8::from(data_type));
    bytes.extend(s.bytes().map(|b| match b {
        b'\r' | b'\n' => b' ',
        b => b,
    }));
    bytes.extend_from_slice(CRLF);
    bytes
}

// Human readable form used in logs, not the wire encoding.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Simple(s) => write!(f, "+{}", s),
            Frame::Error(s) => write!(f, "-{}", s),
            Frame::Integer(i) => write!(f, ":{}", i),
            Frame::Bulk(Some(bytes)) => write!(f, "${}", String::from_utf8_lossy(bytes)),
            Frame::Bulk(None) => write!(f, "$-1"),
            Frame::Array(arr) => {
                write!(f, "[")?;
                for (i, frame) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", frame)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn get_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let end = src.get_ref().len();

    let line_end = src.get_ref()[start..end]
        .windows(2)
        .position(|window| window == CRLF)
        .ok_or(Error::Incomplete)
        .map(|index| start + index)?;

    src.set_position((line_end + CRLF.len()) as u64);

    Ok(&src.get_ref()[start..line_end])
}

fn get_integer(src: &mut Cursor<&[u8]>) -> Result<i64, Error> {
    let line = get_line(src)?;
    let line = std::str::from_utf8(line).map_err(|_| Error::from("protocol error; invalid integer"))?;

    line.parse::<i64>()
        .map_err(|_| format!("protocol error; invalid integer {:?}", line).into())
}

fn get_byte(src: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }
    Ok(src.get_u8())
}

#[derive(Debug)]
enum DataType {
    SimpleString, // '+'
    SimpleError,  // '-'
    Integer,      // ':'
    BulkString,   // '$'
    Array,        // '*'
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b'+' => Ok(Self::SimpleString),
            b'-' => Ok(Self::SimpleError),
            b':' => Ok(Self::Integer),
            b'$' => Ok(Self::BulkString),
            b'*' => Ok(Self::Array),
            _ => Err(Error::InvalidDataType(byte)),
        }
    }
}

impl From<DataType> for u8 {
    fn from(value: DataType) -> Self {
        match value {
            DataType::SimpleString => b'+',
            DataType::SimpleError => b'-',
            DataType::Integer => b':',
            DataType::BulkString => b'$',
            DataType::Array => b'*',
        }
    }
}

impl From<FromUtf8Error> for Error {
    fn from(_src: FromUtf8Error) -> Error {
        "protocol error; invalid frame format".into()
    }
}

impl From<&str> for Error {
    fn from(src: &str) -> Error {
        src.to_string().into()
    }
}

impl From<String> for Error {
    fn from(src: String) -> Error {
        Error::Other(src.into())
    }
}
