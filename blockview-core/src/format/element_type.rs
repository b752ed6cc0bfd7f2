//! Element type classification reported by backends

/// Element type tag of a backend array
///
/// Backends classify their contents as boolean, integer or anything else;
/// every other classification is treated as floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    Boolean = 0,
    Integer = 1,
    Float = 2,
}

impl ElementType {
    /// Classify a backend type tag
    ///
    /// Returns `None` for tags outside the recognised set; callers collapse
    /// those to [`ElementType::Float`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "boolean" | "logical" => Some(ElementType::Boolean),
            "integer" => Some(ElementType::Integer),
            "double" | "float" | "numeric" => Some(ElementType::Float),
            _ => None,
        }
    }

    /// Canonical tag for this type
    pub const fn tag(self) -> &'static str {
        match self {
            ElementType::Boolean => "boolean",
            ElementType::Integer => "integer",
            ElementType::Float => "double",
        }
    }

    /// Convert from the on-disk code
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ElementType::Boolean),
            1 => Some(ElementType::Integer),
            2 => Some(ElementType::Float),
            _ => None,
        }
    }

    /// Convert to the on-disk code
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Size in bytes of one stored element
    pub const fn size_bytes(self) -> usize {
        match self {
            ElementType::Boolean => 1,
            ElementType::Integer => 4,
            ElementType::Float => 8,
        }
    }
}

impl core::fmt::Display for ElementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
