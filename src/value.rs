//! Tagged cell values
//!
//! A `Value` holds one piece of cell or item data of any supported kind behind a
//! single type. The kind tag ([`ValueKind`]) selects the representation and the
//! behavior: how the value is copied, compared, parsed, formatted and rendered.
//!
//! # Kinds
//! - Inline: `Int32`, `UInt32`, `Int64`, `UInt64`, `Color`
//! - Owned text: `StringW` (UTF-16), `StringA` (UTF-8), deep-copied and released on drop
//! - Shared text: `ImmStringW`, `ImmStringA`, reference counted and never mutated
//! - `Icon`: a non-owning handle to a host icon; the value never releases it
//!
//! Values of different kinds order by kind first, so [`Value::compare`] is a total
//! order over all values.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::color::ColorRef;
use crate::error::Result;
use crate::text::{self, wide_chars};

/// Non-owning handle to an icon managed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct IconHandle(pub usize);

impl fmt::Display for IconHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Value kind tag
///
/// Each kind stands for one fixed set of behaviors shared by every value of
/// that kind. The discriminant order is the cross-kind sort order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Int32 = 0,
    UInt32 = 1,
    Int64 = 2,
    UInt64 = 3,
    /// Owned UTF-16 text
    StringW = 4,
    /// Owned UTF-8 text
    StringA = 5,
    /// Shared immutable UTF-16 text
    ImmStringW = 6,
    /// Shared immutable UTF-8 text
    ImmStringA = 7,
    Color = 8,
    Icon = 9,
}

impl ValueKind {
    pub const ALL: [ValueKind; 10] = [
        ValueKind::Int32,
        ValueKind::UInt32,
        ValueKind::Int64,
        ValueKind::UInt64,
        ValueKind::StringW,
        ValueKind::StringA,
        ValueKind::ImmStringW,
        ValueKind::ImmStringA,
        ValueKind::Color,
        ValueKind::Icon,
    ];

    /// Short lowercase name, also accepted by [`ValueKind::from_name`]
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Int32 => "int32",
            ValueKind::UInt32 => "uint32",
            ValueKind::Int64 => "int64",
            ValueKind::UInt64 => "uint64",
            ValueKind::StringW => "string-w",
            ValueKind::StringA => "string-a",
            ValueKind::ImmStringW => "immstring-w",
            ValueKind::ImmStringA => "immstring-a",
            ValueKind::Color => "color",
            ValueKind::Icon => "icon",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueKind::Int32 | ValueKind::UInt32 | ValueKind::Int64 | ValueKind::UInt64
        )
    }

    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            ValueKind::StringW | ValueKind::StringA | ValueKind::ImmStringW | ValueKind::ImmStringA
        )
    }

    /// Whether values of this kind exclusively own heap storage
    #[inline]
    pub const fn owns_storage(self) -> bool {
        matches!(self, ValueKind::StringW | ValueKind::StringA)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed cell value
///
/// Dropping a value releases owned text, decrements shared text and leaves
/// icons alone.
#[derive(Clone)]
pub enum Value {
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    StringW(Box<[u16]>),
    StringA(Box<str>),
    ImmStringW(Rc<[u16]>),
    ImmStringA(Rc<str>),
    Color(ColorRef),
    Icon(IconHandle),
}

impl Value {
    // Constructors

    #[inline]
    pub const fn int32(i: i32) -> Self {
        Value::Int32(i)
    }

    #[inline]
    pub const fn uint32(u: u32) -> Self {
        Value::UInt32(u)
    }

    #[inline]
    pub const fn int64(i: i64) -> Self {
        Value::Int64(i)
    }

    #[inline]
    pub const fn uint64(u: u64) -> Self {
        Value::UInt64(u)
    }

    /// Owned wide text, copied from `units`
    pub fn string_w(units: &[u16]) -> Result<Self> {
        Ok(Value::StringW(text::try_copy_wide(units)?))
    }

    /// Owned narrow text, copied from `s`
    pub fn string_a(s: &str) -> Result<Self> {
        Ok(Value::StringA(text::try_copy_str(s)?))
    }

    /// Shared wide text; no copy is made
    #[inline]
    pub fn immstring_w(shared: Rc<[u16]>) -> Self {
        Value::ImmStringW(shared)
    }

    /// Shared narrow text; no copy is made
    #[inline]
    pub fn immstring_a(shared: Rc<str>) -> Self {
        Value::ImmStringA(shared)
    }

    #[inline]
    pub const fn color(c: ColorRef) -> Self {
        Value::Color(c)
    }

    #[inline]
    pub const fn icon(icon: IconHandle) -> Self {
        Value::Icon(icon)
    }

    // Setters. Each replaces the current value, whatever its kind; the fallible
    // ones leave it untouched on error.

    pub fn set_int32(&mut self, i: i32) {
        *self = Value::Int32(i);
    }

    pub fn set_uint32(&mut self, u: u32) {
        *self = Value::UInt32(u);
    }

    pub fn set_int64(&mut self, i: i64) {
        *self = Value::Int64(i);
    }

    pub fn set_uint64(&mut self, u: u64) {
        *self = Value::UInt64(u);
    }

    pub fn set_string_w(&mut self, units: &[u16]) -> Result<()> {
        *self = Value::string_w(units)?;
        Ok(())
    }

    pub fn set_string_a(&mut self, s: &str) -> Result<()> {
        *self = Value::string_a(s)?;
        Ok(())
    }

    pub fn set_immstring_w(&mut self, shared: Rc<[u16]>) {
        *self = Value::ImmStringW(shared);
    }

    pub fn set_immstring_a(&mut self, shared: Rc<str>) {
        *self = Value::ImmStringA(shared);
    }

    pub fn set_color(&mut self, c: ColorRef) {
        *self = Value::Color(c);
    }

    pub fn set_icon(&mut self, icon: IconHandle) {
        *self = Value::Icon(icon);
    }

    // Accessors

    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Int32(_) => ValueKind::Int32,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::Int64(_) => ValueKind::Int64,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::StringW(_) => ValueKind::StringW,
            Value::StringA(_) => ValueKind::StringA,
            Value::ImmStringW(_) => ValueKind::ImmStringW,
            Value::ImmStringA(_) => ValueKind::ImmStringA,
            Value::Color(_) => ValueKind::Color,
            Value::Icon(_) => ValueKind::Icon,
        }
    }

    #[inline]
    pub const fn to_int32(&self) -> Option<i32> {
        match *self {
            Value::Int32(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_uint32(&self) -> Option<u32> {
        match *self {
            Value::UInt32(u) => Some(u),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_int64(&self) -> Option<i64> {
        match *self {
            Value::Int64(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_uint64(&self) -> Option<u64> {
        match *self {
            Value::UInt64(u) => Some(u),
            _ => None,
        }
    }

    /// Wide text of an owned or shared wide value
    pub fn as_string_w(&self) -> Option<&[u16]> {
        match self {
            Value::StringW(units) => Some(&units[..]),
            Value::ImmStringW(units) => Some(&units[..]),
            _ => None,
        }
    }

    /// Narrow text of an owned or shared narrow value
    pub fn as_string_a(&self) -> Option<&str> {
        match self {
            Value::StringA(s) => Some(&s[..]),
            Value::ImmStringA(s) => Some(&s[..]),
            _ => None,
        }
    }

    /// The shared storage behind an immutable wide value
    pub fn shared_w(&self) -> Option<&Rc<[u16]>> {
        match self {
            Value::ImmStringW(shared) => Some(shared),
            _ => None,
        }
    }

    /// The shared storage behind an immutable narrow value
    pub fn shared_a(&self) -> Option<&Rc<str>> {
        match self {
            Value::ImmStringA(shared) => Some(shared),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_color(&self) -> Option<ColorRef> {
        match *self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_icon(&self) -> Option<IconHandle> {
        match *self {
            Value::Icon(icon) => Some(icon),
            _ => None,
        }
    }

    /// Total order over values
    ///
    /// Numeric kinds compare numerically, text kinds lexicographically by code
    /// unit, colors by raw value and icons by handle. Different kinds compare by
    /// their [`ValueKind`].
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::UInt32(a), Value::UInt32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::UInt64(a), Value::UInt64(b)) => a.cmp(b),
            (Value::StringW(a), Value::StringW(b)) => a.cmp(b),
            (Value::StringA(a), Value::StringA(b)) => a.cmp(b),
            (Value::ImmStringW(a), Value::ImmStringW(b)) => a.cmp(b),
            (Value::ImmStringA(a), Value::ImmStringA(b)) => a.cmp(b),
            (Value::Color(a), Value::Color(b)) => a.cmp(b),
            (Value::Icon(a), Value::Icon(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }

    /// Copy that compares equal to `self`
    ///
    /// Owned text is deep-copied and reports allocation failure instead of
    /// aborting; shared text gains a reference; everything else is copied bitwise.
    pub fn try_clone(&self) -> Result<Value> {
        Ok(match self {
            Value::StringW(units) => Value::StringW(text::try_copy_wide(units)?),
            Value::StringA(s) => Value::StringA(text::try_copy_str(s)?),
            other => other.clone(),
        })
    }

    /// Overwrite `self` with a copy of `src`, leaving `self` unchanged on failure
    pub fn assign_from(&mut self, src: &Value) -> Result<()> {
        *self = src.try_clone()?;
        Ok(())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(i) => write!(f, "Int32({})", i),
            Value::UInt32(u) => write!(f, "UInt32({})", u),
            Value::Int64(i) => write!(f, "Int64({})", i),
            Value::UInt64(u) => write!(f, "UInt64({})", u),
            Value::StringW(units) => write!(f, "StringW({:?})", wide_chars(units).collect::<String>()),
            Value::StringA(s) => write!(f, "StringA({:?})", s),
            Value::ImmStringW(units) => {
                write!(f, "ImmStringW({:?})", wide_chars(units).collect::<String>())
            }
            Value::ImmStringA(s) => write!(f, "ImmStringA({:?})", s),
            Value::Color(c) => write!(f, "Color({})", c),
            Value::Icon(icon) => write!(f, "Icon({})", icon),
        }
    }
}
