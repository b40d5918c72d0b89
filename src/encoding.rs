//! Character encodings known to the writer.
//!
//! The set of supported encodings is the static table of the
//! [WHATWG Encoding Standard](https://encoding.spec.whatwg.org/) as shipped by
//! `encoding_rs`. Labels are matched case-insensitively, so `UTF-8`, `utf8` and
//! `unicode-1-1-utf-8` all resolve to the same encoding, and `ISO-8859-1`
//! resolves to `windows-1252` as browsers do.
//!
//! Conversion is two-step: rendered text that already decodes cleanly as the
//! target encoding is left untouched, anything else is decoded from the source
//! encoding and re-encoded into the target one.

use std::borrow::Cow;

use encoding_rs::Encoding;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CsvWriterError;

fn registry() -> [&'static Encoding; 39] {
    use encoding_rs::*;
    [
        UTF_8,
        UTF_16LE,
        UTF_16BE,
        IBM866,
        ISO_8859_2,
        ISO_8859_3,
        ISO_8859_4,
        ISO_8859_5,
        ISO_8859_6,
        ISO_8859_7,
        ISO_8859_8,
        ISO_8859_8_I,
        ISO_8859_10,
        ISO_8859_13,
        ISO_8859_14,
        ISO_8859_15,
        ISO_8859_16,
        KOI8_R,
        KOI8_U,
        MACINTOSH,
        WINDOWS_874,
        WINDOWS_1250,
        WINDOWS_1251,
        WINDOWS_1252,
        WINDOWS_1253,
        WINDOWS_1254,
        WINDOWS_1255,
        WINDOWS_1256,
        WINDOWS_1257,
        WINDOWS_1258,
        X_MAC_CYRILLIC,
        GBK,
        GB18030,
        BIG5,
        EUC_JP,
        ISO_2022_JP,
        SHIFT_JIS,
        EUC_KR,
        X_USER_DEFINED,
    ]
}

/// Canonical names of every encoding accepted as a conversion source.
pub fn supported_encodings() -> Vec<&'static str> {
    registry().iter().map(|encoding| encoding.name()).collect()
}

/// Resolves an encoding label, `None` when the label is unknown.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.as_bytes())
}

pub fn is_supported(label: &str) -> bool {
    lookup(label).is_some()
}

/// Whether `bytes` decode as `encoding` without a single malformed sequence.
pub fn is_valid_as(encoding: &'static Encoding, bytes: &[u8]) -> bool {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .is_some()
}

/// A validated pair of source and target encodings.
///
/// The labels are kept as given so getters return them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EncodingLabels", into = "EncodingLabels")]
pub struct EncodingPair {
    source_name: String,
    target_name: String,
    source: &'static Encoding,
    target: &'static Encoding,
}

#[derive(Serialize, Deserialize)]
struct EncodingLabels {
    source: String,
    target: String,
}

impl EncodingPair {
    /// Validates both labels, the source first.
    ///
    /// A target must be an encoding the encoder can produce: UTF-16LE and
    /// UTF-16BE are accepted as a source only.
    pub fn new(source: &str, target: &str) -> Result<Self, CsvWriterError> {
        let source_encoding = lookup(source).ok_or_else(|| unsupported(source))?;
        let target_encoding = lookup(target)
            .filter(|encoding| encoding.output_encoding() == *encoding)
            .ok_or_else(|| unsupported(target))?;

        Ok(EncodingPair {
            source_name: source.to_string(),
            target_name: target.to_string(),
            source: source_encoding,
            target: target_encoding,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn source(&self) -> &'static Encoding {
        self.source
    }

    pub fn target(&self) -> &'static Encoding {
        self.target
    }

    /// Converts `text` from the source to the target encoding unless it
    /// already reads as the target encoding.
    ///
    /// The check runs on the text followed by a single space, so a text ending
    /// in the middle of a multi-byte sequence is not mistaken for valid input.
    pub fn convert<'a>(&self, text: &'a [u8]) -> Cow<'a, [u8]> {
        let mut probe = Vec::with_capacity(text.len() + 1);
        probe.extend_from_slice(text);
        probe.push(b' ');

        if is_valid_as(self.target, &probe) {
            debug!(
                "Text already valid as {}, skipping conversion",
                self.target.name()
            );
            return Cow::Borrowed(text);
        }

        debug!(
            "Converting {} bytes from {} to {}",
            text.len(),
            self.source.name(),
            self.target.name()
        );
        let (decoded, _) = self.source.decode_without_bom_handling(text);
        let (encoded, _, _) = self.target.encode(&decoded);
        Cow::Owned(encoded.into_owned())
    }
}

fn unsupported(label: &str) -> CsvWriterError {
    CsvWriterError::UnsupportedEncoding {
        encoding: label.to_string(),
    }
}

impl TryFrom<EncodingLabels> for EncodingPair {
    type Error = CsvWriterError;

    fn try_from(labels: EncodingLabels) -> Result<Self, Self::Error> {
        EncodingPair::new(&labels.source, &labels.target)
    }
}

impl From<EncodingPair> for EncodingLabels {
    fn from(pair: EncodingPair) -> Self {
        EncodingLabels {
            source: pair.source_name,
            target: pair.target_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_labels_should_be_supported() {
        for label in ["UTF-8", "utf8", "ISO-8859-1", "latin1", "windows-1252", "Shift_JIS"] {
            assert!(is_supported(label), "{label} should be supported");
        }
        assert!(!is_supported("BOGUS-ENCODING"));
        assert!(!is_supported(""));
    }

    #[test]
    fn supported_encodings_should_list_canonical_names() {
        let names = supported_encodings();

        assert!(names.contains(&"UTF-8"));
        assert!(names.contains(&"windows-1252"));
        assert!(!names.contains(&"replacement"));
    }

    #[test]
    fn unknown_target_should_be_named_in_error() {
        let error = EncodingPair::new("UTF-8", "BOGUS-ENCODING").unwrap_err();

        assert!(matches!(
            error,
            CsvWriterError::UnsupportedEncoding { ref encoding } if encoding == "BOGUS-ENCODING"
        ));
    }

    #[test]
    fn unknown_source_should_be_reported_first() {
        let error = EncodingPair::new("NOPE", "ALSO-NOPE").unwrap_err();

        assert_eq!(error.to_string(), "Unsupported encoding: NOPE");
    }

    #[test]
    fn utf16_should_only_be_accepted_as_source() {
        assert!(EncodingPair::new("UTF-16LE", "UTF-8").is_ok());
        assert!(EncodingPair::new("UTF-8", "UTF-16LE").is_err());
    }

    #[test]
    fn names_should_be_kept_verbatim() {
        let pair = EncodingPair::new("latin1", "utf8").unwrap();

        assert_eq!(pair.source_name(), "latin1");
        assert_eq!(pair.target_name(), "utf8");
        assert_eq!(pair.source(), encoding_rs::WINDOWS_1252);
        assert_eq!(pair.target(), encoding_rs::UTF_8);
    }

    #[test]
    fn latin1_text_should_be_converted_to_utf8() {
        let pair = EncodingPair::new("ISO-8859-1", "UTF-8").unwrap();

        let converted = pair.convert(b"caf\xe9");

        assert_eq!(converted.as_ref(), "café".as_bytes());
    }

    #[test]
    fn text_already_in_target_should_not_be_converted_twice() {
        let pair = EncodingPair::new("ISO-8859-1", "UTF-8").unwrap();

        let converted = pair.convert("café".as_bytes());

        assert!(matches!(converted, Cow::Borrowed(_)));
        assert_eq!(converted.as_ref(), "café".as_bytes());
    }

    #[test]
    fn single_byte_target_should_accept_any_text_as_already_encoded() {
        let pair = EncodingPair::new("UTF-8", "ISO-8859-1").unwrap();

        let converted = pair.convert("café".as_bytes());

        assert_eq!(converted.as_ref(), "café".as_bytes());
    }

    #[test]
    fn utf8_text_should_be_converted_to_seven_bit_target() {
        let pair = EncodingPair::new("UTF-8", "ISO-2022-JP").unwrap();

        let converted = pair.convert("日本".as_bytes());

        assert_ne!(converted.as_ref(), "日本".as_bytes());
        assert!(converted.iter().all(|byte| byte.is_ascii()));
        let (decoded, had_errors) = encoding_rs::ISO_2022_JP.decode_without_bom_handling(&converted);
        assert!(!had_errors);
        assert_eq!(decoded, "日本");
    }

    #[test]
    fn truncated_multibyte_sequence_should_be_converted() {
        let pair = EncodingPair::new("ISO-8859-1", "UTF-8").unwrap();

        // 0xC3 alone is the start of a two-byte UTF-8 sequence.
        let converted = pair.convert(b"abc\xc3");

        assert_eq!(converted.as_ref(), "abcÃ".as_bytes());
    }

    #[test]
    fn empty_text_should_be_left_untouched() {
        let pair = EncodingPair::new("ISO-8859-1", "UTF-8").unwrap();

        assert!(pair.convert(b"").is_empty());
    }
}
