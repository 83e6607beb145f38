//! Streaming file downloads.

use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{CarbonArcError, Result};
use crate::request::RequestManager;

/// Default write chunk: 250 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 250 * 1024 * 1024;

/// Options for [`download_to_directory`].
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Output file name. When `None` it comes from `Content-Disposition`.
    pub filename: Option<String>,
    /// Bytes buffered before each write.
    pub chunk_size: usize,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            filename: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl DownloadOptions {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

/// Stream `url` into `directory`.
///
/// The directory is checked before any request is made. The file name is the
/// explicit option, else the response's `Content-Disposition` name, else an
/// error. Returns the path written.
///
/// # Errors
///
/// [`CarbonArcError::MissingDirectory`] if `directory` is not an existing
/// directory, [`CarbonArcError::FilenameRequired`] if no name can be resolved,
/// plus any request or I/O error.
#[tracing::instrument(skip(requests, options))]
pub async fn download_to_directory(
    requests: &RequestManager,
    url: &str,
    directory: &Path,
    options: &DownloadOptions,
) -> Result<PathBuf> {
    if !directory.is_dir() {
        return Err(CarbonArcError::MissingDirectory(directory.to_path_buf()));
    }

    let response = requests.get_stream(url).await?;

    let filename = match options.filename.as_deref() {
        Some(name) => sanitize_filename(name).ok_or(CarbonArcError::FilenameRequired)?,
        None => filename_from_response(&response).ok_or(CarbonArcError::FilenameRequired)?,
    };
    let path = directory.join(&filename);
    let partial = directory.join(format!(".{filename}.part"));

    let result = async {
        let written = write_chunked(response, &partial, options.chunk_size).await?;
        tokio::fs::rename(&partial, &path).await?;
        Ok::<_, CarbonArcError>(written)
    }
    .await;

    match result {
        Ok(written) => {
            tracing::info!(path = %path.display(), bytes = written, "download complete");
            Ok(path)
        }
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::debug!(
                    path = %partial.display(),
                    error = %cleanup,
                    "partial file not removed"
                );
            }
            tracing::warn!(path = %path.display(), error = %e, "download failed");
            Err(e)
        }
    }
}

async fn write_chunked(mut response: Response, path: &Path, chunk_size: usize) -> Result<u64> {
    let chunk_size = chunk_size.max(1);
    let mut file = File::create(path).await?;
    let mut buffer: Vec<u8> = Vec::new();
    let mut written: u64 = 0;

    while let Some(bytes) = response.chunk().await.map_err(CarbonArcError::HttpError)? {
        let mut rest = bytes.as_ref();
        while !rest.is_empty() {
            let take = (chunk_size - buffer.len()).min(rest.len());
            buffer.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if buffer.len() == chunk_size {
                file.write_all(&buffer).await?;
                written += buffer.len() as u64;
                buffer.clear();
            }
        }
    }

    if !buffer.is_empty() {
        file.write_all(&buffer).await?;
        written += buffer.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

fn filename_from_response(response: &Response) -> Option<String> {
    let header = response.headers().get(CONTENT_DISPOSITION)?.to_str().ok()?;
    filename_from_content_disposition(header)
}

/// Extract the file name from a `Content-Disposition` value.
///
/// `filename*=UTF-8''...` wins over `filename=`. Directory components are
/// stripped.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in split_parameters(header) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = unquote(value);
                let encoded = encoded
                    .split_once("''")
                    .map_or(encoded.as_str(), |(_charset, rest)| rest);
                extended = urlencoding::decode(encoded).ok().map(|s| s.into_owned());
            }
            "filename" => plain = Some(unquote(value)),
            _ => {}
        }
    }

    extended.or(plain).and_then(|name| sanitize_filename(&name))
}

/// Split a header on `;` outside quoted strings.
fn split_parameters(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in header.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                parts.push(header[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(header[start..].trim());
    parts
}

/// Strip surrounding quotes and resolve `\x` escapes.
fn unquote(value: &str) -> String {
    let value = value.trim();
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}
