//! Input container detection.
//!
//! A `.graffle` file is a property-list XML document that is either stored
//! gzip-compressed or as plain text. Detection tries, in order:
//!
//! 1. gzip: valid if the stream inflates and its first line starts with
//!    `<?xml`;
//! 2. plain text: the encoding is taken from a byte-order mark, else UTF-8
//!    when the bytes are valid UTF-8, else Windows-1252; valid under the same
//!    first-line test;
//!
//! and otherwise fails with [`ContainerError::InvalidInputFile`].

use std::{
    fmt, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use flate2::read::GzDecoder;
use log::{debug, info};
use thiserror::Error;

const XML_PREFIX: &str = "<?xml";

/// Failure to open an input container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid input file: {}", path.display())]
    InvalidInputFile { path: PathBuf },
}

/// How the XML text was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Gzip,
    PlainText { encoding: &'static Encoding },
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gzip => f.write_str("gzip"),
            Self::PlainText { encoding } => write!(f, "plain text ({})", encoding.name()),
        }
    }
}

/// An opened graffle container holding the decoded XML text.
#[derive(Debug)]
pub struct GraffleFile {
    path: PathBuf,
    kind: ContainerKind,
    text: String,
}

impl GraffleFile {
    /// Open and detect the container at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::Io`] if the file cannot be read and
    /// [`ContainerError::InvalidInputFile`] if neither detection succeeds.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        info!(path:? = path; "Opening input container");

        let bytes = fs::read(path).map_err(|source| ContainerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(path, &bytes)
    }

    /// Detect a container already loaded into memory.
    ///
    /// `path` is only used for error messages.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self, ContainerError> {
        let path = path.into();

        let detected = detect_gzip(bytes)
            .map(|text| (ContainerKind::Gzip, text))
            .or_else(|| {
                detect_plain_text(bytes)
                    .map(|(encoding, text)| (ContainerKind::PlainText { encoding }, text))
            });

        match detected {
            Some((kind, text)) => {
                debug!(kind:% = kind, bytes = text.len(); "Container detected");
                Ok(Self { path, kind, text })
            }
            None => Err(ContainerError::InvalidInputFile { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// The decoded XML text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Release the container, keeping the XML text.
    pub fn close(self) -> String {
        debug!(path:? = self.path; "Closing input container");
        self.text
    }
}

fn detect_gzip(bytes: &[u8]) -> Option<String> {
    let mut inflated = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut inflated).ok()?;
    let (_, text) = decode_text(&inflated);
    starts_with_xml(&text).then_some(text)
}

fn detect_plain_text(bytes: &[u8]) -> Option<(&'static Encoding, String)> {
    let (encoding, text) = decode_text(bytes);
    starts_with_xml(&text).then_some((encoding, text))
}

/// Decodes bytes with the encoding named by their byte-order mark, falling
/// back to UTF-8 and then Windows-1252.
fn decode_text(bytes: &[u8]) -> (&'static Encoding, String) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (encoding, text.into_owned());
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => (UTF_8, text.to_string()),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (WINDOWS_1252, text.into_owned())
        }
    }
}

fn starts_with_xml(text: &str) -> bool {
    text.lines().next().is_some_and(|line| line.starts_with(XML_PREFIX))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{Compression, write::GzEncoder};

    use super::*;

    const PLIST: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\"><dict/></plist>\n";

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detect_gzip() {
        let file = GraffleFile::from_bytes("a.graffle", &gzip(PLIST.as_bytes())).unwrap();
        assert_eq!(file.kind(), ContainerKind::Gzip);
        assert_eq!(file.text(), PLIST);
    }

    #[test]
    fn test_detect_plain_utf8() {
        let file = GraffleFile::from_bytes("a.graffle", PLIST.as_bytes()).unwrap();
        assert_eq!(file.kind(), ContainerKind::PlainText { encoding: UTF_8 });
        assert_eq!(file.close(), PLIST);
    }

    #[test]
    fn test_detect_plain_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in PLIST.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = GraffleFile::from_bytes("a.graffle", &bytes).unwrap();
        assert_eq!(
            file.kind(),
            ContainerKind::PlainText {
                encoding: encoding_rs::UTF_16LE
            }
        );
        assert_eq!(file.text(), PLIST);
    }

    #[test]
    fn test_detect_plain_latin1_fallback() {
        let mut bytes = PLIST.replace("<dict/>", "<string>caf</string>").into_bytes();
        let pos = bytes.iter().position(|&b| b == b'f').unwrap() + 1;
        bytes.insert(pos, 0xE9);
        let file = GraffleFile::from_bytes("a.graffle", &bytes).unwrap();
        assert_eq!(file.kind(), ContainerKind::PlainText { encoding: WINDOWS_1252 });
        assert!(file.text().contains("café"));
    }

    #[test]
    fn test_gzip_without_xml_is_invalid() {
        let err = GraffleFile::from_bytes("a.graffle", &gzip(b"hello\nworld")).unwrap_err();
        assert!(matches!(err, ContainerError::InvalidInputFile { .. }));
    }

    #[test]
    fn test_binary_is_invalid() {
        let err = GraffleFile::from_bytes("b.graffle", b"bplist00\x01\x02").unwrap_err();
        assert_eq!(err.to_string(), "invalid input file: b.graffle");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GraffleFile::open(dir.path().join("missing.graffle")).unwrap_err();
        assert!(matches!(err, ContainerError::Io { .. }));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.graffle");
        fs::write(&path, gzip(PLIST.as_bytes())).unwrap();

        let file = GraffleFile::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert_eq!(file.kind(), ContainerKind::Gzip);
    }
}
