//! File-type identification by magic bytes
//!
//! Cache entries carry no extensions. After the copy pass each written
//! file's leading bytes are matched against a fixed signature table and
//! matches are renamed in place with the inferred extension appended.
//! Identification is best-effort: unmatched and unreadable files are
//! left untouched and counted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Prefix length read for sniffing. Every rule in the table, including
/// the RIFF/ftyp/EBML container probes, resolves within this window.
pub const SNIFF_LEN: usize = 512;

/// A magic-byte rule: `magic` at `offset` identifies `ext`
struct Signature {
    ext: &'static str,
    offset: usize,
    magic: &'static [u8],
}

impl Signature {
    fn matches(&self, buf: &[u8]) -> bool {
        buf.len() >= self.offset + self.magic.len()
            && &buf[self.offset..self.offset + self.magic.len()] == self.magic
    }
}

/// Plain prefix rules, checked after the container probes
const SIGNATURES: &[Signature] = &[
    // images
    Signature {
        ext: "png",
        offset: 0,
        magic: &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
    },
    Signature {
        ext: "jpg",
        offset: 0,
        magic: &[0xFF, 0xD8, 0xFF],
    },
    Signature {
        ext: "gif",
        offset: 0,
        magic: b"GIF8",
    },
    Signature {
        ext: "bmp",
        offset: 0,
        magic: b"BM",
    },
    Signature {
        ext: "ico",
        offset: 0,
        magic: &[0x00, 0x00, 0x01, 0x00],
    },
    // audio
    Signature {
        ext: "mp3",
        offset: 0,
        magic: b"ID3",
    },
    Signature {
        ext: "mp3",
        offset: 0,
        magic: &[0xFF, 0xFB],
    },
    Signature {
        ext: "mp3",
        offset: 0,
        magic: &[0xFF, 0xF3],
    },
    Signature {
        ext: "flac",
        offset: 0,
        magic: b"fLaC",
    },
    Signature {
        ext: "ogg",
        offset: 0,
        magic: b"OggS",
    },
    // archives
    Signature {
        ext: "zip",
        offset: 0,
        magic: &[0x50, 0x4B, 0x03, 0x04],
    },
    Signature {
        ext: "gz",
        offset: 0,
        magic: &[0x1F, 0x8B, 0x08],
    },
    Signature {
        ext: "bz2",
        offset: 0,
        magic: b"BZh",
    },
    Signature {
        ext: "7z",
        offset: 0,
        magic: &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
    },
    // documents
    Signature {
        ext: "pdf",
        offset: 0,
        magic: b"%PDF",
    },
    // fonts
    Signature {
        ext: "woff",
        offset: 0,
        magic: b"wOFF",
    },
    Signature {
        ext: "woff2",
        offset: 0,
        magic: b"wOF2",
    },
    Signature {
        ext: "otf",
        offset: 0,
        magic: b"OTTO",
    },
    Signature {
        ext: "ttf",
        offset: 0,
        magic: &[0x00, 0x01, 0x00, 0x00, 0x00],
    },
];

/// Match leading bytes against the signature table
pub fn sniff(buf: &[u8]) -> Option<&'static str> {
    // container formats need a second field read, probe those first
    sniff_riff(buf)
        .or_else(|| sniff_ftyp(buf))
        .or_else(|| sniff_ebml(buf))
        .or_else(|| SIGNATURES.iter().find(|s| s.matches(buf)).map(|s| s.ext))
}

/// RIFF containers: wav, avi, webp share the outer header
fn sniff_riff(buf: &[u8]) -> Option<&'static str> {
    if buf.len() < 12 || &buf[0..4] != b"RIFF" {
        return None;
    }
    match &buf[8..12] {
        b"WAVE" => Some("wav"),
        b"AVI " => Some("avi"),
        b"WEBP" => Some("webp"),
        _ => None,
    }
}

/// ISO base media: brand box at offset 4 covers mp4, m4a and mov
fn sniff_ftyp(buf: &[u8]) -> Option<&'static str> {
    if buf.len() < 12 || &buf[4..8] != b"ftyp" {
        return None;
    }
    match &buf[8..12] {
        brand if brand.starts_with(b"M4A") => Some("m4a"),
        b"qt  " => Some("mov"),
        _ => Some("mp4"),
    }
}

/// EBML header covers both webm and mkv; the doctype string a few
/// bytes in tells them apart
fn sniff_ebml(buf: &[u8]) -> Option<&'static str> {
    if buf.len() < 4 || buf[0..4] != [0x1A, 0x45, 0xDF, 0xA3] {
        return None;
    }
    if buf.windows(4).any(|w| w == b"webm") {
        Some("webm")
    } else {
        Some("mkv")
    }
}

/// Sniff one file's type from a bounded prefix read.
/// Read failures mean unidentified, never an abort.
pub async fn classify_file(path: &Path) -> Option<&'static str> {
    let mut file = fs::File::open(path).await.ok()?;
    let mut buf = [0u8; SNIFF_LEN];
    let mut filled = 0;

    while filled < buf.len() {
        match file.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
    }

    sniff(&buf[..filled])
}

/// Tally of one variant's classification pass
#[derive(Debug, Default)]
pub struct ClassifyOutcome {
    /// Files renamed with an inferred extension (or already carrying it)
    pub identified: u64,
    /// Files left under their original name
    pub unidentified: u64,
}

/// Classify and rename a variant's copied files.
///
/// Each file is visited exactly once. A file whose name already ends in
/// the sniffed extension is left alone, so re-running the pass cannot
/// stack extensions.
pub async fn classify_copied(files: &[PathBuf]) -> ClassifyOutcome {
    let mut outcome = ClassifyOutcome::default();

    for path in files {
        let Some(ext) = classify_file(path).await else {
            outcome.unidentified += 1;
            continue;
        };

        if path.extension().is_some_and(|e| e == ext) {
            outcome.identified += 1;
            continue;
        }

        let Some(file_name) = path.file_name() else {
            outcome.unidentified += 1;
            continue;
        };
        let mut renamed: OsString = file_name.to_os_string();
        renamed.push(".");
        renamed.push(ext);

        match fs::rename(path, path.with_file_name(&renamed)).await {
            Ok(()) => outcome.identified += 1,
            Err(e) => {
                debug!("rename of {} failed: {}", path.display(), e);
                outcome.unidentified += 1;
            }
        }
    }

    outcome
}
