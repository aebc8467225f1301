//! Locale-independent text conversion for values
//!
//! | Kind            | Format            | Parse accepts                              |
//! |-----------------|-------------------|--------------------------------------------|
//! | integers        | decimal           | optional sign, surrounding whitespace      |
//! | text            | the text itself   | any text                                   |
//! | color           | `#RRGGBB`         | `#RRGGBB`, `RRGGBB`, `rgb(r, g, b)`, `0x…` |
//! | icon            | `0x…` handle      | `0x…` hex or decimal handle                |
//!
//! Parsing never touches an existing value on failure, and formatting into a
//! caller buffer never writes past its end.

use std::fmt::{self, Write};
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::text::{self, wide_chars};
use crate::util::{ByteSink, FormatLen, WideSink};
use crate::value::{IconHandle, Value, ValueKind};

fn parse_int<T: FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

fn parse_icon(text: &str) -> Option<IconHandle> {
    let trimmed = text.trim();
    let handle = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok()?,
        None => trimmed.parse().ok()?,
    };
    Some(IconHandle(handle))
}

impl ValueKind {
    /// Parse `input` into a new value of this kind
    pub fn parse(self, input: &str) -> Result<Value> {
        let invalid = || Error::format(self, input);
        Ok(match self {
            ValueKind::Int32 => Value::Int32(parse_int(input).ok_or_else(invalid)?),
            ValueKind::UInt32 => Value::UInt32(parse_int(input).ok_or_else(invalid)?),
            ValueKind::Int64 => Value::Int64(parse_int(input).ok_or_else(invalid)?),
            ValueKind::UInt64 => Value::UInt64(parse_int(input).ok_or_else(invalid)?),
            ValueKind::StringW => Value::StringW(text::try_encode_wide(input)?),
            ValueKind::StringA => Value::StringA(text::try_copy_str(input)?),
            ValueKind::ImmStringW => Value::ImmStringW(Rc::from(text::to_wide(input))),
            ValueKind::ImmStringA => Value::ImmStringA(Rc::from(input)),
            ValueKind::Color => Value::Color(input.parse()?),
            ValueKind::Icon => Value::Icon(parse_icon(input).ok_or_else(invalid)?),
        })
    }

    /// Parse wide `units` into a new value of this kind
    ///
    /// Wide text kinds take the code units verbatim; other kinds decode them first.
    pub fn parse_wide(self, units: &[u16]) -> Result<Value> {
        match self {
            ValueKind::StringW => Value::string_w(units),
            ValueKind::ImmStringW => Ok(Value::ImmStringW(Rc::from(units))),
            _ => self.parse(&text::from_wide(units)),
        }
    }
}

impl Value {
    /// Replace this value with `text` parsed as the current kind
    ///
    /// On failure the value is left as it was.
    pub fn assign_from_str(&mut self, text: &str) -> Result<()> {
        *self = self.kind().parse(text)?;
        Ok(())
    }

    /// Write the text form into `buf`, truncating at a character boundary
    pub fn format_into(&self, buf: &mut [u8]) -> FormatLen {
        let mut sink = ByteSink::new(buf);
        // ByteSink never reports an error
        let _ = write!(sink, "{}", self);
        sink.finish()
    }

    /// Write the text form into `buf` as UTF-16, truncating without splitting
    /// surrogate pairs
    ///
    /// Wide text is copied unit for unit, so ill-formed UTF-16 survives.
    pub fn format_wide_into(&self, buf: &mut [u16]) -> FormatLen {
        let mut sink = WideSink::new(buf);
        match self.as_string_w() {
            Some(units) => sink.write_units(units),
            None => {
                let _ = write!(sink, "{}", self);
            }
        }
        sink.finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(i) => write!(f, "{}", i),
            Value::UInt32(u) => write!(f, "{}", u),
            Value::Int64(i) => write!(f, "{}", i),
            Value::UInt64(u) => write!(f, "{}", u),
            Value::StringW(units) => wide_chars(units).try_for_each(|ch| f.write_char(ch)),
            Value::ImmStringW(units) => wide_chars(units).try_for_each(|ch| f.write_char(ch)),
            Value::StringA(s) => f.write_str(s),
            Value::ImmStringA(s) => f.write_str(s),
            Value::Color(c) => write!(f, "{}", c),
            Value::Icon(icon) => write!(f, "{}", icon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRef;
    use crate::error::ErrorKind;
    use crate::text::to_wide;

    fn format(v: &Value) -> String {
        let mut buf = [0u8; 64];
        let len = v.format_into(&mut buf);
        assert!(!len.is_truncated());
        String::from_utf8(buf[..len.written].to_vec()).unwrap()
    }

    #[test]
    fn test_int32_scenario() {
        let v = Value::int32(42);
        assert_eq!(format(&v), "42");
        let parsed = ValueKind::Int32.parse("42").unwrap();
        assert_eq!(parsed.compare(&v), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(ValueKind::Int32.parse(" -17 ").unwrap(), Value::int32(-17));
        assert_eq!(ValueKind::Int32.parse("+5").unwrap(), Value::int32(5));
        assert_eq!(
            ValueKind::UInt64.parse("18446744073709551615").unwrap(),
            Value::uint64(u64::MAX)
        );
        assert_eq!(
            ValueKind::Int64.parse("-9223372036854775808").unwrap(),
            Value::int64(i64::MIN)
        );

        for (kind, bad) in [
            (ValueKind::Int32, ""),
            (ValueKind::Int32, "4x"),
            (ValueKind::Int32, "2147483648"),
            (ValueKind::UInt32, "-1"),
            (ValueKind::UInt64, "1.5"),
        ] {
            let err = kind.parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{} {:?}", kind, bad);
        }
    }

    #[test]
    fn test_parse_text_kinds() {
        assert_eq!(
            ValueKind::StringA.parse("hello").unwrap().as_string_a(),
            Some("hello")
        );
        assert_eq!(
            ValueKind::StringW.parse("hé").unwrap().as_string_w(),
            Some(&to_wide("hé")[..])
        );
        assert_eq!(
            ValueKind::ImmStringA.parse("x").unwrap().kind(),
            ValueKind::ImmStringA
        );
        // Text keeps its whitespace
        assert_eq!(
            ValueKind::StringA.parse("  a ").unwrap().as_string_a(),
            Some("  a ")
        );
    }

    #[test]
    fn test_parse_color_and_icon() {
        assert_eq!(
            ValueKind::Color.parse("#102030").unwrap(),
            Value::color(ColorRef::rgb(0x10, 0x20, 0x30))
        );
        assert_eq!(
            ValueKind::Icon.parse("0x1f").unwrap(),
            Value::icon(IconHandle(0x1f))
        );
        assert_eq!(
            ValueKind::Icon.parse("31").unwrap(),
            Value::icon(IconHandle(31))
        );
        assert_eq!(
            ValueKind::Icon.parse("0xZZ").unwrap_err().kind(),
            ErrorKind::Format
        );
        let err = ValueKind::Color.parse("purple").unwrap_err();
        assert_eq!(
            err,
            Error::Format {
                kind: ValueKind::Color,
                input: "purple".into()
            }
        );
    }

    #[test]
    fn test_assign_from_str_keeps_value_on_error() {
        let mut v = Value::uint32(9);
        assert!(v.assign_from_str("nine").is_err());
        assert_eq!(v, Value::uint32(9));

        v.assign_from_str("10").unwrap();
        assert_eq!(v, Value::uint32(10));
    }

    #[test]
    fn test_format_kinds() {
        assert_eq!(format(&Value::int64(-3)), "-3");
        assert_eq!(format(&Value::uint32(u32::MAX)), "4294967295");
        assert_eq!(format(&Value::string_w(&to_wide("wide")).unwrap()), "wide");
        assert_eq!(format(&Value::color(ColorRef::rgb(1, 2, 3))), "#010203");
        assert_eq!(format(&Value::icon(IconHandle(255))), "0xff");
    }

    #[test]
    fn test_format_truncates() {
        let v = Value::string_a("abcdef").unwrap();
        let mut buf = [0u8; 4];
        let len = v.format_into(&mut buf);
        assert_eq!(len, FormatLen { written: 4, required: 6 });
        assert!(len.is_truncated());
        assert_eq!(&buf, b"abcd");

        let len = Value::int32(12345).format_into(&mut []);
        assert_eq!(len, FormatLen { written: 0, required: 5 });
    }

    #[test]
    fn test_format_wide() {
        let v = Value::int32(-12);
        let mut buf = [0u16; 8];
        let len = v.format_wide_into(&mut buf);
        assert_eq!(&buf[..len.written], &to_wide("-12")[..]);

        // Ill-formed wide text is copied as-is
        let broken = Value::string_w(&[0x61, 0xDC00]).unwrap();
        let len = broken.format_wide_into(&mut buf);
        assert_eq!(&buf[..len.written], &[0x61, 0xDC00]);
        assert_eq!(
            ValueKind::StringW.parse_wide(&buf[..len.written]).unwrap(),
            broken
        );
    }

    #[test]
    fn test_parse_wide_numeric() {
        assert_eq!(
            ValueKind::Int32.parse_wide(&to_wide("77")).unwrap(),
            Value::int32(77)
        );
    }

    #[test]
    fn test_round_trip_every_kind() {
        let values = [
            Value::int32(i32::MIN),
            Value::uint32(0),
            Value::int64(1 << 40),
            Value::uint64(u64::MAX),
            Value::string_w(&to_wide("wide text")).unwrap(),
            Value::string_a("narrow text").unwrap(),
            Value::immstring_w(Rc::from(to_wide("shared"))),
            Value::immstring_a(Rc::from("shared")),
            Value::color(ColorRef::NONE),
            Value::icon(IconHandle(0xdead)),
        ];
        for v in &values {
            let parsed = v.kind().parse(&v.to_string()).unwrap();
            assert_eq!(&parsed, v);
        }
    }
}
