//! A wrapper around `Box<[u8; LEN]>` with a custom `bincode::Decode` implementation that
//! deserializes directly into heap memory.
//!
//! The implementation that `#[derive(Decode)]` generates for `Box<[u8; LEN]>` deserializes into
//! stack memory and then moves to the heap, which is wasteful for a full 64KB address space.

use bincode::de::read::Reader;
use bincode::de::{BorrowDecoder, Decoder};
use bincode::error::DecodeError;
use bincode::{BorrowDecode, Decode, Encode};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct BoxedByteArray<const LEN: usize>(Box<[u8; LEN]>);

fn zeroed<const LEN: usize>() -> Box<[u8; LEN]> {
    // A boxed slice of length LEN always converts to a boxed array of length LEN
    vec![0; LEN]
        .into_boxed_slice()
        .try_into()
        .unwrap_or_else(|_| unreachable!("boxed slice length always matches the array length"))
}

impl<const LEN: usize> BoxedByteArray<LEN> {
    #[must_use]
    pub fn new() -> Self {
        Self(zeroed())
    }
}

impl<const LEN: usize> Default for BoxedByteArray<LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEN: usize> Deref for BoxedByteArray<LEN> {
    type Target = Box<[u8; LEN]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const LEN: usize> DerefMut for BoxedByteArray<LEN> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const LEN: usize, Context> Decode<Context> for BoxedByteArray<LEN> {
    fn decode<D: Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, DecodeError> {
        let mut array = zeroed::<LEN>();
        decoder.reader().read(array.as_mut())?;
        Ok(Self(array))
    }
}

impl<'de, const LEN: usize, Context> BorrowDecode<'de, Context> for BoxedByteArray<LEN> {
    fn borrow_decode<D: BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, DecodeError> {
        let mut array = zeroed::<LEN>();
        decoder.reader().read(array.as_mut())?;
        Ok(Self(array))
    }
}
