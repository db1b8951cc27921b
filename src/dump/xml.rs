use std::borrow::Cow;
use std::io::{self, Write};

use crate::scan::FolderNode;

/// Version attributes GrandPerspective expects in the dump envelope.
const APP_VERSION: &str = "2.5.3";
const FORMAT_VERSION: &str = "6";

/// Escapes the five XML metacharacters. Names land in attribute values,
/// so the quote characters must be covered as well.
pub fn escape_text(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}

/// Emits a scan dump document into the sink it owns. One element per
/// line, nesting expressed purely by element structure.
pub struct ScanDumpWriter<W: Write> {
    sink: W,
}

impl<W: Write> ScanDumpWriter<W> {
    pub fn new(sink: W) -> Self {
        ScanDumpWriter { sink }
    }

    /// Writes the complete document: envelope, the folder tree, footer.
    /// `scan_time` is informational metadata and is emitted verbatim.
    pub fn write_dump(&mut self, root: &FolderNode, scan_time: &str) -> io::Result<()> {
        self.write_header(scan_time)?;
        self.write_folder(root)?;
        self.write_footer()?;
        self.sink.flush()
    }

    fn write_header(&mut self, scan_time: &str) -> io::Result<()> {
        writeln!(self.sink, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            self.sink,
            r#"<GrandPerspectiveScanDump appVersion="{APP_VERSION}" formatVersion="{FORMAT_VERSION}">"#
        )?;
        writeln!(
            self.sink,
            r#"<ScanInfo volumePath="/" volumeSize="0" freeSpace="0" scanTime="{scan_time}" fileSizeMeasure="physical">"#
        )
    }

    fn write_folder(&mut self, node: &FolderNode) -> io::Result<()> {
        writeln!(self.sink, r#"<Folder name="{}">"#, escape_text(node.name()))?;

        for file in node.files() {
            writeln!(
                self.sink,
                r#"<File name="{}" size="{}"/>"#,
                escape_text(file.basename()),
                file.size()
            )?;
        }

        for child in node.folders() {
            self.write_folder(child)?;
        }

        writeln!(self.sink, "</Folder>")
    }

    fn write_footer(&mut self) -> io::Result<()> {
        writeln!(self.sink, "</ScanInfo>")?;
        writeln!(self.sink, "</GrandPerspectiveScanDump>")
    }
}
