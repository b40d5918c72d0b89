use std::{borrow::Cow, fmt};

/// One value of a buffered row.
///
/// Values are held as raw bytes: text is usually UTF-8, but rows fed from a
/// legacy source may carry bytes in the configured source encoding, which is
/// what encoding conversion starts from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field(Vec<u8>);

/// An ordered sequence of values rendered as one CSV line.
pub type Row = Vec<Field>;

impl Field {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Text view of the value, invalid UTF-8 sequences replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<Vec<u8>> for Field {
    fn from(bytes: Vec<u8>) -> Self {
        Field(bytes)
    }
}

impl From<&[u8]> for Field {
    fn from(bytes: &[u8]) -> Self {
        Field(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Field {
    fn from(bytes: &[u8; N]) -> Self {
        Field(bytes.to_vec())
    }
}

impl From<String> for Field {
    fn from(text: String) -> Self {
        Field(text.into_bytes())
    }
}

impl From<&String> for Field {
    fn from(text: &String) -> Self {
        Field(text.as_bytes().to_vec())
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Field(text.as_bytes().to_vec())
    }
}

impl From<Cow<'_, str>> for Field {
    fn from(text: Cow<'_, str>) -> Self {
        Field(text.into_owned().into_bytes())
    }
}

macro_rules! field_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Field(value.to_string().into_bytes())
                }
            }
        )*
    };
}

field_from_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);
