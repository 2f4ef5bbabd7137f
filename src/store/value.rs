use bytes::Bytes;
use std::collections::{HashMap, HashSet, VecDeque};

use super::sorted_set::SortedSet;

pub type List = VecDeque<Bytes>;
pub type Set = HashSet<Bytes>;
pub type Hash = HashMap<Bytes, Bytes>;

/// The typed container stored under a key. A key holds exactly one of these at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(Bytes),
    List(List),
    Set(Set),
    Hash(Hash),
    SortedSet(SortedSet),
}

impl Value {
    #[cfg(test)]
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Hash(_) => "hash",
            Value::SortedSet(_) => "zset",
        }
    }
}

/// Typed view over a [`Value`], used by the store to implement its two access policies: read a
/// container only if it already has the right type, or replace whatever is there with a fresh
/// container of the right type.
pub(crate) trait Container: Sized {
    fn empty() -> Value;

    fn downcast(value: &Value) -> Option<&Self>;

    fn downcast_mut(value: &mut Value) -> Option<&mut Self>;

    /// Reinterprets `value` as `Self`, resetting it to an empty container when it holds another
    /// type.
    fn coerce(value: &mut Value) -> &mut Self;
}

macro_rules! container {
    ($ty:ty, $variant:ident) => {
        impl Container for $ty {
            fn empty() -> Value {
                Value::$variant(Default::default())
            }

            fn downcast(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn downcast_mut(value: &mut Value) -> Option<&mut Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn coerce(value: &mut Value) -> &mut Self {
                match value {
                    Value::$variant(inner) => inner,
                    other => {
                        *other = Self::empty();
                        Self::coerce(other)
                    }
                }
            }
        }
    };
}

container!(Bytes, String);
container!(List, List);
container!(Set, Set);
container!(Hash, Hash);
container!(SortedSet, SortedSet);
