//! Narrow and wide text support
//!
//! Narrow text is UTF-8 (`str`). Wide text is a sequence of UTF-16 code units
//! (`[u16]`), compared and stored unit by unit; it need not be well-formed.

mod table;

pub use table::StringTable;

use crate::error::Result;

/// Encode `s` as UTF-16 code units
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Decode UTF-16 code units, replacing unpaired surrogates with U+FFFD
pub fn from_wide(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Iterate over the characters of wide text, replacing unpaired surrogates
pub fn wide_chars(units: &[u16]) -> impl Iterator<Item = char> + '_ {
    char::decode_utf16(units.iter().copied()).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Copy narrow text into exactly-sized owned storage
pub(crate) fn try_copy_str(s: &str) -> Result<Box<str>> {
    let mut owned = String::new();
    owned.try_reserve_exact(s.len())?;
    owned.push_str(s);
    Ok(owned.into_boxed_str())
}

/// Copy wide text into exactly-sized owned storage
pub(crate) fn try_copy_wide(units: &[u16]) -> Result<Box<[u16]>> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(units.len())?;
    owned.extend_from_slice(units);
    Ok(owned.into_boxed_slice())
}

/// Encode `s` as UTF-16 into exactly-sized owned storage
pub(crate) fn try_encode_wide(s: &str) -> Result<Box<[u16]>> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(s.encode_utf16().count())?;
    owned.extend(s.encode_utf16());
    Ok(owned.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_conversion() {
        let wide = to_wide("héllo 中文");
        assert_eq!(wide.len(), 8);
        assert_eq!(from_wide(&wide), "héllo 中文");

        let emoji = to_wide("😀");
        assert_eq!(emoji.len(), 2);
        assert_eq!(wide_chars(&emoji).collect::<String>(), "😀");
    }

    #[test]
    fn test_unpaired_surrogate() {
        let broken = [0x61, 0xD800, 0x62];
        assert_eq!(from_wide(&broken), "a\u{FFFD}b");
        assert_eq!(wide_chars(&broken).count(), 3);
    }

    #[test]
    fn test_try_copy() {
        assert_eq!(&*try_copy_str("abc").unwrap(), "abc");
        assert_eq!(&*try_copy_wide(&[1, 2, 3]).unwrap(), &[1, 2, 3]);
        assert_eq!(&*try_encode_wide("ab").unwrap(), &[0x61, 0x62]);
        assert!(try_copy_str("").unwrap().is_empty());
    }
}
