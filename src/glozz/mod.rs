//! Glozz output pair.
//!
//! A converted document is stored as two files sharing a base name:
//! `<name>.ac` holds the raw text and `<name>.aa` the annotations, whose
//! offsets index into the `.ac` text. Neither file is touched until the
//! whole document has been built. Both are written to temporary siblings
//! and then renamed, and a failed run leaves neither file behind.

mod xml;

use std::fs;
use std::path::{Path, PathBuf};

pub use xml::{to_xml_string, write_annotations};

use crate::document::Document;
use crate::error::{ConversionError, Result};

/// Extension of the text file.
pub const TEXT_EXTENSION: &str = "ac";

/// Extension of the annotation file.
pub const ANNOTATION_EXTENSION: &str = "aa";

/// Where a document's two files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub text: PathBuf,
    pub annotations: PathBuf,
}

impl OutputPaths {
    /// Derive output paths from the input file name.
    ///
    /// The base name is the file name up to its first `.`, so
    /// `game1.soclog.seg.csv` gives `game1.ac` and `game1.aa`. Files land
    /// beside the input unless `output_dir` is given.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Result<Self> {
        let base = input
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('.').next())
            .filter(|base| !base.is_empty())
            .ok_or_else(|| ConversionError::OutputName(input.to_path_buf()))?;

        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok(Self {
            text: dir.join(format!("{base}.{TEXT_EXTENSION}")),
            annotations: dir.join(format!("{base}.{ANNOTATION_EXTENSION}")),
        })
    }
}

/// Sizes of the files written for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenSizes {
    pub text_bytes: u64,
    pub annotation_bytes: u64,
}

/// Write both files of a document.
///
/// Both temporary files are written before either is moved into place, and
/// the text file is removed again if the annotations cannot follow it.
pub fn write_document(document: &Document, paths: &OutputPaths) -> Result<WrittenSizes> {
    let xml = to_xml_string(document)?;

    let text_tmp = write_temporary(&paths.text, document.text().as_bytes())?;
    let annotations_tmp = match write_temporary(&paths.annotations, xml.as_bytes()) {
        Ok(tmp) => tmp,
        Err(e) => {
            let _ = fs::remove_file(&text_tmp);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&text_tmp, &paths.text) {
        let _ = fs::remove_file(&text_tmp);
        let _ = fs::remove_file(&annotations_tmp);
        return Err(ConversionError::io(&paths.text, e));
    }
    if let Err(e) = fs::rename(&annotations_tmp, &paths.annotations) {
        let _ = fs::remove_file(&annotations_tmp);
        let _ = fs::remove_file(&paths.text);
        return Err(ConversionError::io(&paths.annotations, e));
    }

    tracing::info!(
        text = %paths.text.display(),
        annotations = %paths.annotations.display(),
        "Wrote Glozz pair"
    );

    Ok(WrittenSizes {
        text_bytes: document.text().len() as u64,
        annotation_bytes: xml.len() as u64,
    })
}

/// Write `contents` to `<path>.tmp` and return that path.
fn write_temporary(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, contents).map_err(|e| ConversionError::io(&tmp, e))?;
    Ok(tmp)
}
