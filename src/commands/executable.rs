use crate::frame::Frame;
use crate::store::{Store, StoreError};

pub trait Executable {
    fn exec(self, store: &mut Store) -> Result<Frame, StoreError>;
}
