use encoding_rs::WINDOWS_1251;
use thiserror::Error;

/// Encodings tried on downloaded question files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1251,
    /// Same code page as `Windows1251` under its other common name.
    Cp1251,
    /// UTF-8 with a leading byte-order mark removed.
    Utf8Sig,
}

/// Fixed priority order, first success wins.
pub const CANDIDATES: [TextEncoding; 4] = [
    TextEncoding::Utf8,
    TextEncoding::Windows1251,
    TextEncoding::Cp1251,
    TextEncoding::Utf8Sig,
];

pub const LOSSY_LABEL: &str = "utf-8 (lossy)";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
// 0x98 has no assigned character in code page 1251
const CP1251_UNASSIGNED: u8 = 0x98;

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1251 => "windows-1251",
            TextEncoding::Cp1251 => "cp1251",
            TextEncoding::Utf8Sig => "utf-8-sig",
        }
    }

    /// Strict decode: `None` on any byte the encoding cannot map.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            TextEncoding::Windows1251 | TextEncoding::Cp1251 => {
                if bytes.contains(&CP1251_UNASSIGNED) {
                    return None;
                }
                WINDOWS_1251
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_string)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("none of the candidate encodings could decode the input")]
pub struct AllFailed;

pub fn decode(bytes: &[u8], candidates: &[TextEncoding]) -> Result<Decoded, AllFailed> {
    candidates
        .iter()
        .find_map(|enc| {
            enc.decode(bytes).map(|text| Decoded {
                text,
                encoding: enc.label(),
            })
        })
        .ok_or(AllFailed)
}

/// [`decode`] over [`CANDIDATES`], falling back to UTF-8 with invalid byte
/// sequences dropped. Never fails.
pub fn decode_or_lossy(bytes: &[u8]) -> Decoded {
    decode(bytes, &CANDIDATES).unwrap_or_else(|AllFailed| {
        let mut text = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            text.push_str(chunk.valid());
        }
        Decoded {
            text,
            encoding: LOSSY_LABEL,
        }
    })
}
