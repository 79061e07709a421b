//! Little-endian field primitives shared by the BMP header types.

use crate::BitmapError;

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Read a field without advancing.
    pub(crate) fn peek<T: LeField>(&mut self) -> Result<T, BitmapError> {
        let pos = self.pos;
        let value = T::read(self);
        self.pos = pos;
        value
    }
}

// ── Fixed-width little-endian fields ────────────────────────────────

/// A value with a fixed little-endian wire encoding.
pub(crate) trait LeField: Sized + Copy {
    const SIZE: usize;

    fn read(cursor: &mut Cursor<'_>) -> Result<Self, BitmapError>;

    fn write(self, out: &mut Vec<u8>);
}

macro_rules! le_int {
    ($($ty:ty),+) => {
        $(
            impl LeField for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                fn read(cursor: &mut Cursor<'_>) -> Result<Self, BitmapError> {
                    Ok(<$ty>::from_le_bytes(cursor.read_fixed_bytes()?))
                }

                fn write(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )+
    };
}

le_int!(u16, u32, i32);

/// Raw bytes, copied as-is (e.g. the `BM` signature).
impl<const N: usize> LeField for [u8; N] {
    const SIZE: usize = N;

    fn read(cursor: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        cursor.read_fixed_bytes()
    }

    fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self);
    }
}

/// Declare a header struct whose fields are stored back to back, in
/// declaration order, with no padding.
///
/// Generates `SIZE`, `read` and `write` from the single field list so the
/// read and write paths cannot drift apart.
macro_rules! le_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $ty:ty,
            )+
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )+
        }

        impl $name {
            /// Encoded size in bytes.
            pub const SIZE: usize = 0 $(+ <$ty as $crate::bmp::fields::LeField>::SIZE)+;

            pub(crate) fn read(
                cursor: &mut $crate::bmp::fields::Cursor<'_>,
            ) -> Result<Self, $crate::BitmapError> {
                // struct expressions evaluate fields in source order
                Ok(Self {
                    $($field: <$ty as $crate::bmp::fields::LeField>::read(cursor)?,)+
                })
            }

            pub(crate) fn write(&self, out: &mut Vec<u8>) {
                $($crate::bmp::fields::LeField::write(self.$field, out);)+
            }
        }
    };
}

pub(crate) use le_struct;

#[cfg(test)]
mod tests {
    use super::*;

    le_struct! {
        #[derive(Debug, PartialEq)]
        struct Sample {
            tag: [u8; 2],
            a: u16,
            b: i32,
            c: u32,
        }
    }

    #[test]
    fn size_is_sum_of_fields() {
        assert_eq!(Sample::SIZE, 12);
    }

    #[test]
    fn fields_are_little_endian_in_order() {
        let s = Sample {
            tag: *b"XY",
            a: 0x0102,
            b: -2,
            c: 0x0A0B_0C0D,
        };
        let mut out = Vec::new();
        s.write(&mut out);
        assert_eq!(
            out,
            [b'X', b'Y', 0x02, 0x01, 0xFE, 0xFF, 0xFF, 0xFF, 0x0D, 0x0C, 0x0B, 0x0A]
        );

        let mut cursor = Cursor::new(&out);
        assert_eq!(Sample::read(&mut cursor).unwrap(), s);
        assert_eq!(cursor.position(), Sample::SIZE);
    }

    #[test]
    fn short_input_is_eof() {
        let mut cursor = Cursor::new(&[1, 2, 3]);
        assert!(matches!(
            u32::read(&mut cursor),
            Err(BitmapError::UnexpectedEof)
        ));
        assert!(cursor.skip(4).is_err());
        assert!(cursor.skip(3).is_ok());
        assert!(cursor.take(1).is_err());
    }

    #[test]
    fn peek_does_not_advance() {
        let mut cursor = Cursor::new(&[0x28, 0, 0, 0, 7]);
        assert_eq!(cursor.peek::<u32>().unwrap(), 40);
        assert_eq!(cursor.position(), 0);
        cursor.skip(2).unwrap();
        assert!(cursor.peek::<u32>().is_err());
        assert_eq!(cursor.position(), 2);
    }
}
