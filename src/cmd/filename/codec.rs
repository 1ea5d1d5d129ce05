//! MySQL filesystem name encoding.
//!
//! MySQL stores table and database names on disk with every character
//! outside `[0-9A-Za-z_]` replaced by `@XXXX`, the four-digit lowercase
//! hex of the code point. Only basic-plane characters have an encoded
//! form.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([0-9a-f]{4})").expect("Invalid escape regex"));

/// A character with no on-disk encoding.
#[derive(Debug, Error)]
#[error("cannot encode '{0}' (U+{1:04X}) in a MySQL file name")]
pub struct EncodeError(pub char, pub u32);

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Encodes a table or database name into its on-disk form.
pub fn encode(name: &str) -> Result<String, EncodeError> {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if is_safe(ch) {
            out.push(ch);
        } else {
            let code = ch as u32;
            if code > 0xFFFF {
                return Err(EncodeError(ch, code));
            }
            out.push_str(&format!("@{code:04x}"));
        }
    }
    Ok(out)
}

/// Decodes an on-disk name back to the table or database name.
///
/// Escapes that do not name a valid character pass through untouched, as
/// does anything that never was an escape.
pub fn decode(name: &str) -> String {
    ESCAPE
        .replace_all(name, |caps: &Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_names_pass_through() {
        assert_eq!(encode("actor").unwrap(), "actor");
        assert_eq!(encode("film_actor_2").unwrap(), "film_actor_2");
        assert_eq!(decode("actor"), "actor");
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        assert_eq!(encode("db.table").unwrap(), "db@002etable");
        assert_eq!(encode("my-table").unwrap(), "my@002dtable");
        assert_eq!(encode("a b").unwrap(), "a@0020b");
        assert_eq!(encode("naïve").unwrap(), "na@00efve");
    }

    #[test]
    fn escapes_decode_back() {
        assert_eq!(decode("db@002etable"), "db.table");
        assert_eq!(decode("na@00efve"), "naïve");
        assert_eq!(decode("@0040"), "@");
    }

    #[test]
    fn decode_inverts_encode() {
        for name in ["actor", "db.table", "weird name-ç", "100%"] {
            assert_eq!(decode(&encode(name).unwrap()), name);
        }
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(decode("@12"), "@12");
        assert_eq!(decode("@zzzz"), "@zzzz");
        assert_eq!(decode("trailing@"), "trailing@");
        // uppercase hex is not the on-disk form
        assert_eq!(decode("@00AB"), "@00AB");
        // surrogate code points name no character
        assert_eq!(decode("@d800"), "@d800");
    }

    #[test]
    fn astral_characters_cannot_be_encoded() {
        let err = encode("emoji\u{1F600}").unwrap_err();
        assert_eq!(err.1, 0x1F600);
    }
}
