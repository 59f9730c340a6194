//! Request-level entry points wiring parsing, sorting, encoding and storage together.
//!
//! [`SortService`] is what a transport layer (HTTP handlers, a CLI, ...) holds
//! on to. It owns the only shared state, the [`ArtifactStore`]; every sort
//! works on data owned by the call that started it.

use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::codec::{self, Format, check_extension};
use crate::error::{MissingInput, SortError, SortResult};
use crate::names;
use crate::store::{Artifact, ArtifactId, ArtifactStore, StoreConfig};
use crate::table::KeySpec;

/// Stem used when sanitising leaves nothing of the uploaded name.
const FALLBACK_STEM: &str = "data";

/// Outcome of a successful upload-and-sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedUpload {
    /// Handle for [`SortService::download`].
    pub id: ArtifactId,
    /// Confirmation naming the key columns.
    pub message: String,
    /// Name suggested for the downloaded file.
    pub download_filename: String,
}

#[derive(Debug, Default)]
pub struct SortService {
    store: ArtifactStore,
}

impl SortService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            store: ArtifactStore::new(config),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Sorts a comma-delimited name list, see [`names::sort_names`].
    pub fn sort_names(&self, input: &str) -> String {
        names::sort_names(input)
    }

    /// Decodes an uploaded CSV or workbook file, sorts it by `key_spec` and
    /// stores the result in the upload's format (`.xls` uploads come back as `.xlsx`).
    ///
    /// Checks run in order: file name present, key columns present, supported
    /// extension, decodable content, known key columns. Nothing is stored
    /// unless every step succeeds.
    pub fn upload_and_sort(
        &self,
        filename: &str,
        bytes: &[u8],
        key_spec: &str,
    ) -> SortResult<SortedUpload> {
        let result = self.sort_upload(filename, bytes, key_spec);
        if let Err(err) = &result {
            warn!(filename, key_spec, error = %err, "upload rejected");
        }
        result
    }

    fn sort_upload(&self, filename: &str, bytes: &[u8], key_spec: &str) -> SortResult<SortedUpload> {
        if filename.trim().is_empty() {
            return Err(SortError::MissingInput(MissingInput::File));
        }
        let spec = KeySpec::parse(key_spec)?;
        let format = check_extension(filename)?;

        let mut table = codec::decode(format, bytes)?;
        table.sort_by_columns(&spec)?;
        let encoded = codec::encode(format, &table)?;

        let download_filename = download_filename(filename, format);
        let id = self.store.put(Artifact::new(
            download_filename.clone(),
            format.content_type(),
            encoded,
        ));

        info!(%id, %format, rows = table.len(), keys = %spec, "table sorted");
        Ok(SortedUpload {
            id,
            message: spec.summary(),
            download_filename,
        })
    }

    /// Hands out a stored artifact. Each id can be downloaded once.
    pub fn download(&self, id: ArtifactId) -> SortResult<Artifact> {
        self.store.take(id)
    }
}

/// Name for the sorted copy of an uploaded file: `sorted_` plus a sanitised name.
///
/// Accented letters are reduced to ASCII through NFKD decomposition, path
/// separators and whitespace runs become `_`, characters outside
/// `[A-Za-z0-9._-]` are dropped, and leading or trailing `.`/`_` are stripped.
/// The extension follows [`Format::output`].
///
/// ```
/// use casesort::codec::Format;
/// use casesort::service::download_filename;
///
/// assert_eq!(download_filename("My Customers.csv", Format::Csv), "sorted_My_Customers.csv");
/// assert_eq!(download_filename("Müller.xls", Format::Xls), "sorted_Muller.xlsx");
/// ```
pub fn download_filename(filename: &str, format: Format) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');

    let output = format.output();
    if cleaned.is_empty() {
        return format!("sorted_{FALLBACK_STEM}.{output}");
    }
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) if output != format && ext.eq_ignore_ascii_case(format.extension()) => {
            format!("sorted_{stem}.{output}")
        }
        _ => format!("sorted_{cleaned}"),
    }
}
