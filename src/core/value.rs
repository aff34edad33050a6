//! Typed log arguments and the value renderer capability
//!
//! Arguments are a closed set of variants. The template engine never looks at
//! concrete Rust types; it asks a [`ValueRenderer`] for the text of every
//! non-string argument.

use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::fmt;

/// Type label produced by generic structure dumps of dynamically typed values
pub const GENERIC_TYPE_LABEL: &str = "interface {}";

/// Short alias substituted for [`GENERIC_TYPE_LABEL`]
pub const GENERIC_TYPE_ALIAS: &str = "any";

/// Apply the cosmetic type-label substitution to rendered text
pub fn normalize_type_labels(text: &str) -> Cow<'_, str> {
    if text.contains(GENERIC_TYPE_LABEL) {
        Cow::Owned(text.replace(GENERIC_TYPE_LABEL, GENERIC_TYPE_ALIAS))
    } else {
        Cow::Borrowed(text)
    }
}

/// Null-terminated byte buffer handed over by foreign (C) callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignBuffer<'a> {
    /// `signed char` buffer
    Signed(&'a [i8]),
    /// `unsigned char` buffer
    Unsigned(&'a [u8]),
}

impl<'a> ForeignBuffer<'a> {
    /// Borrow the bytes of a C string, terminator excluded
    pub fn from_c_str(s: &'a CStr) -> Self {
        ForeignBuffer::Unsigned(s.to_bytes())
    }

    /// Borrow a null-terminated buffer from a raw pointer
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, point to a null-terminated buffer, and stay
    /// valid and unmodified for `'a`. See [`CStr::from_ptr`].
    pub unsafe fn from_ptr(ptr: *const c_char) -> Self {
        Self::from_c_str(CStr::from_ptr(ptr))
    }

    /// Decode the text up to the first NUL byte (or the whole buffer)
    pub fn decode(&self) -> String {
        let bytes: Vec<u8> = match self {
            ForeignBuffer::Signed(raw) => raw
                .iter()
                .take_while(|&&b| b != 0)
                .map(|&b| b as u8)
                .collect(),
            ForeignBuffer::Unsigned(raw) => {
                raw.iter().copied().take_while(|&b| b != 0).collect()
            }
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// One argument of a templated log call
#[derive(Clone, Copy)]
pub enum LogValue<'a> {
    Str(&'a str),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    /// Rendered through `Display`, then treated like a string
    Display(&'a dyn fmt::Display),
    /// Decoded to text at MESSAGE level, rendered generically otherwise
    Foreign(ForeignBuffer<'a>),
    /// Arbitrary value rendered through its structure dump
    Opaque(&'a dyn fmt::Debug),
}

impl<'a> LogValue<'a> {
    /// Wrap any `Debug` value as an opaque argument
    pub fn debug<T: fmt::Debug>(value: &'a T) -> Self {
        LogValue::Opaque(value)
    }

    /// Wrap any `Display` value
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        LogValue::Display(value)
    }
}

impl fmt::Debug for LogValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            LogValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            LogValue::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            LogValue::F32(v) => f.debug_tuple("F32").field(v).finish(),
            LogValue::F64(v) => f.debug_tuple("F64").field(v).finish(),
            LogValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            LogValue::Char(v) => f.debug_tuple("Char").field(v).finish(),
            LogValue::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
            LogValue::Foreign(v) => f.debug_tuple("Foreign").field(v).finish(),
            LogValue::Opaque(v) => f.debug_tuple("Opaque").field(v).finish(),
        }
    }
}

/// Conversion of argument expressions into [`LogValue`]s
///
/// The logging macros call this on every argument.
pub trait ToLogValue {
    fn to_log_value(&self) -> LogValue<'_>;
}

impl<T: ToLogValue + ?Sized> ToLogValue for &T {
    fn to_log_value(&self) -> LogValue<'_> {
        (**self).to_log_value()
    }
}

impl ToLogValue for str {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Str(self)
    }
}

impl ToLogValue for String {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Str(self.as_str())
    }
}

impl ToLogValue for Cow<'_, str> {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Str(self.as_ref())
    }
}

impl ToLogValue for bool {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Bool(*self)
    }
}

impl ToLogValue for char {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Char(*self)
    }
}

impl ToLogValue for f32 {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::F32(*self)
    }
}

impl ToLogValue for f64 {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::F64(*self)
    }
}

macro_rules! impl_to_log_value_int {
    ($variant:ident, $target:ty: $($t:ty),+) => {
        $(
            impl ToLogValue for $t {
                fn to_log_value(&self) -> LogValue<'_> {
                    LogValue::$variant(*self as $target)
                }
            }
        )+
    };
}

impl_to_log_value_int!(Int, i64: i8, i16, i32, i64, isize);
impl_to_log_value_int!(UInt, u64: u8, u16, u32, u64, usize);

impl ToLogValue for ForeignBuffer<'_> {
    fn to_log_value(&self) -> LogValue<'_> {
        LogValue::Foreign(*self)
    }
}

impl ToLogValue for LogValue<'_> {
    fn to_log_value(&self) -> LogValue<'_> {
        *self
    }
}

/// Capability that turns an argument into display text
pub trait ValueRenderer: Send + Sync {
    fn render(&self, value: &LogValue<'_>) -> String;
}

/// Renderer used when none is injected
///
/// Scalars use `Display`; opaque values use the pretty `{:#?}` structure dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl ValueRenderer for DefaultRenderer {
    fn render(&self, value: &LogValue<'_>) -> String {
        match value {
            LogValue::Str(s) => (*s).to_string(),
            LogValue::Int(v) => v.to_string(),
            LogValue::UInt(v) => v.to_string(),
            LogValue::F32(v) => v.to_string(),
            LogValue::F64(v) => v.to_string(),
            LogValue::Bool(v) => v.to_string(),
            LogValue::Char(v) => v.to_string(),
            LogValue::Display(v) => v.to_string(),
            LogValue::Foreign(v) => format!("{:?}", v),
            LogValue::Opaque(v) => format!("{:#?}", v),
        }
    }
}
