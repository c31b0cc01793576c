use std::fmt::Display;

use crate::error::Error;

/// The element type of an operand. Corresponds to the `StorageType` family the teacher crate uses
/// on the frontend side, but here it tags runtime operand buffers rather than compile-time types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    U32,
    I32,
    F32,
}

impl ElementType {
    /// Size in bytes of a single element of this type.
    pub const fn size_of(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::U32 | Self::I32 | Self::F32 => 4,
        }
    }
}

impl TryFrom<&str> for ElementType {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name {
            "bool" => Ok(Self::Bool),
            "u32" => Ok(Self::U32),
            "i32" => Ok(Self::I32),
            "f32" => Ok(Self::F32),
            other => Err(Error::UnsupportedElementType(other.to_string())),
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::F32 => "f32",
        };
        write!(f, "{name}")
    }
}
