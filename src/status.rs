//! Status codes shared with HTTP callers.
//!
//! The integer values are part of the public contract and must never change.

use serde::{Serialize, Serializer};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    UnknownError = -1,
    Success = 0,
    AliasAlreadyExists = 1,
    MusicIdNotExist = 2,
    NotFoundAlias = 3,
    MissingParameters = 4,
    EmptyString = 5,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}
