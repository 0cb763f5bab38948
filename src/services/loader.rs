use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use colormap_match::PageImage;
use image::DynamicImage;
use rayon::prelude::*;

use crate::error::LoadError;

/// One source of page pixels after pattern expansion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Input {
    Path(PathBuf),
    Url(String),
}

impl Input {
    /// Identifier used in logs and failure reports
    pub fn source_id(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Url(url) => url.clone(),
        }
    }

    /// Page id: the file stem, or the stem of the last URL path segment.
    pub fn page_id(&self) -> String {
        match self {
            Input::Path(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Input::Url(url) => url_page_id(url),
        }
    }

    /// Page id, prefixed with the parent directory name when this is a path
    /// whose stem appears in `colliding`.
    pub fn qualified_page_id(&self, colliding: &HashSet<String>) -> String {
        let id = self.page_id();
        match self {
            Input::Path(path) if colliding.contains(&id) => {
                match path.parent().and_then(Path::file_name) {
                    Some(parent) => format!("{}/{id}", parent.to_string_lossy()),
                    None => id,
                }
            }
            _ => id,
        }
    }
}

/// Stems shared by more than one path input.
fn colliding_stems(inputs: &[Result<Input, LoadError>]) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for input in inputs.iter().flatten() {
        if let Input::Path(_) = input {
            *counts.entry(input.page_id()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(stem, _)| stem)
        .collect()
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn has_glob_chars(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn url_page_id(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let rest = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    // Drop the host
    let path = rest.split_once('/').map_or("", |(_, path)| path);
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    match Path::new(segment).file_stem() {
        Some(stem) if !stem.is_empty() => stem.to_string_lossy().into_owned(),
        _ => url.to_string(),
    }
}

/// Expand input strings into concrete sources.
///
/// URLs pass through unchanged. Strings with glob characters expand to the
/// sorted list of matching paths; a pattern matching nothing is logged and
/// contributes nothing. Anything else is a plain path. Repeated sources are
/// kept once, at their first position.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Vec<Result<Input, LoadError>> {
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();

    for raw in inputs {
        let raw = raw.as_ref();
        if is_url(raw) {
            push_unique(&mut expanded, &mut seen, Input::Url(raw.to_string()));
        } else if has_glob_chars(raw) {
            expand_pattern(raw, &mut expanded, &mut seen);
        } else {
            push_unique(&mut expanded, &mut seen, Input::Path(PathBuf::from(raw)));
        }
    }

    expanded
}

fn push_unique(
    expanded: &mut Vec<Result<Input, LoadError>>,
    seen: &mut HashSet<Input>,
    input: Input,
) {
    if seen.insert(input.clone()) {
        expanded.push(Ok(input));
    }
}

fn expand_pattern(
    pattern: &str,
    expanded: &mut Vec<Result<Input, LoadError>>,
    seen: &mut HashSet<Input>,
) {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            expanded.push(Err(LoadError::Pattern {
                source_id: pattern.to_string(),
                message: e.msg.to_string(),
            }));
            return;
        }
    };

    let mut matched = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => matched.push(path),
            Err(e) => {
                let source_id = e.path().display().to_string();
                expanded.push(Err(LoadError::Io {
                    source_id,
                    error: std::io::Error::from(e),
                }));
            }
        }
    }

    if matched.is_empty() {
        tracing::warn!(pattern = %pattern, "Input pattern matched no files");
        return;
    }

    matched.sort();
    tracing::debug!(pattern = %pattern, count = matched.len(), "Expanded input pattern");
    for path in matched {
        push_unique(expanded, seen, Input::Path(path));
    }
}

/// Reads files and URLs and decodes them into page images
#[derive(Debug, Clone)]
pub struct PageLoader {
    timeout: Duration,
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl PageLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Expand and load every input. Results keep input order.
    ///
    /// Files from different directories that share a stem get ids
    /// qualified with their parent directory, e.g. `a/doc-1` and `b/doc-1`.
    pub fn load_all<S: AsRef<str> + Sync>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<(String, PageImage), LoadError>> {
        let expanded = expand_inputs(inputs);
        let colliding = colliding_stems(&expanded);
        if !colliding.is_empty() {
            tracing::debug!(stems = colliding.len(), "Qualifying page ids that share a file stem");
        }

        expanded
            .into_par_iter()
            .map(|input| {
                input.and_then(|input| self.load_as(&input, input.qualified_page_id(&colliding)))
            })
            .collect()
    }

    /// Load one source into a `(page_id, image)` pair.
    pub fn load(&self, input: &Input) -> Result<(String, PageImage), LoadError> {
        self.load_as(input, input.page_id())
    }

    fn load_as(&self, input: &Input, page_id: String) -> Result<(String, PageImage), LoadError> {
        let source_id = input.source_id();
        let bytes = match input {
            Input::Path(path) => read_file(path, &source_id)?,
            Input::Url(url) => self.fetch(url)?,
        };
        let image = decode(&bytes, &source_id)?;

        tracing::debug!(
            source = %source_id,
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            "Loaded page"
        );
        Ok((page_id, image))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let fetch_error = |error| LoadError::Fetch {
            source_id: url.to_string(),
            error,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(fetch_error)?;

        let response = client.get(url).send().map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                source_id: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

fn read_file(path: &Path, source_id: &str) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|error| LoadError::Io {
        source_id: source_id.to_string(),
        error,
    })
}

/// Decode encoded image bytes. Alpha is kept so the extractor can composite
/// it; grayscale stays at one or two channels, which the extractor reports
/// as an empty table.
pub fn decode(bytes: &[u8], source_id: &str) -> Result<PageImage, LoadError> {
    let decoded = image::load_from_memory(bytes).map_err(|error| LoadError::Decode {
        source_id: source_id.to_string(),
        error,
    })?;
    to_page_image(decoded).map_err(|error| LoadError::Image {
        source_id: source_id.to_string(),
        error,
    })
}

fn to_page_image(decoded: DynamicImage) -> Result<PageImage, colormap_match::MatchError> {
    let (width, height) = (decoded.width(), decoded.height());
    let color = decoded.color();

    if color.channel_count() < 3 {
        if color.has_alpha() {
            PageImage::from_luma_alpha(width, height, decoded.into_luma_alpha8().into_raw())
        } else {
            PageImage::from_luma(width, height, decoded.into_luma8().into_raw())
        }
    } else if color.has_alpha() {
        PageImage::from_rgba(width, height, decoded.into_rgba8().into_raw())
    } else {
        PageImage::from_rgb(width, height, decoded.into_rgb8().into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_page_id_from_path() {
        assert_eq!(Input::Path("scans/doc-4.png".into()).page_id(), "doc-4");
        assert_eq!(Input::Path("doc.tar.png".into()).page_id(), "doc.tar");
    }

    #[test]
    fn test_page_id_from_url() {
        assert_eq!(
            Input::Url("https://host/papers/fig-2.png".into()).page_id(),
            "fig-2"
        );
        assert_eq!(
            Input::Url("https://host/p/page-9.jpg?size=large".into()).page_id(),
            "page-9"
        );
        assert_eq!(
            Input::Url("https://host".into()).page_id(),
            "https://host"
        );
    }

    #[test]
    fn test_expand_plain_and_url() {
        let expanded: Vec<Input> = expand_inputs(&["a.png", "https://h/b.png", "a.png"])
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            expanded,
            vec![
                Input::Path("a.png".into()),
                Input::Url("https://h/b.png".into()),
            ]
        );
    }

    #[test]
    fn test_expand_glob_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["p-2.png", "p-1.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let pattern = format!("{}/*.png", dir.path().display());

        let expanded: Vec<Input> = expand_inputs(&[pattern])
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            expanded,
            vec![
                Input::Path(dir.path().join("p-1.png")),
                Input::Path(dir.path().join("p-2.png")),
            ]
        );
    }

    #[test]
    fn test_expand_glob_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.png", dir.path().display());
        assert!(expand_inputs(&[pattern]).is_empty());
    }

    #[test]
    fn test_expand_bad_pattern() {
        let expanded = expand_inputs(&["pages/[.png"]);
        assert_eq!(expanded.len(), 1);
        let err = expanded.into_iter().next().unwrap().unwrap_err();
        assert!(matches!(err, LoadError::Pattern { .. }));
        assert_eq!(err.source_id(), "pages/[.png");
    }

    #[test]
    fn test_decode_keeps_layout() {
        let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 1, image::Rgb([1, 2, 3])));
        let page = decode(&encode_png(rgb), "rgb").unwrap();
        assert_eq!(page.channels(), 3);
        assert_eq!(page.data(), &[1, 2, 3, 1, 2, 3]);

        let rgba =
            DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(1, 1, image::Rgba([9, 8, 7, 0])));
        let page = decode(&encode_png(rgba), "rgba").unwrap();
        assert_eq!(page.channels(), 4);

        let luma = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(3, 2, image::Luma([40])));
        let page = decode(&encode_png(luma), "luma").unwrap();
        assert_eq!(page.channels(), 1);
        assert_eq!(page.pixel_count(), 6);
    }

    #[test]
    fn test_luma_alpha_stays_two_channel_and_extracts_empty() {
        let luma_alpha = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(
            2,
            2,
            image::LumaA([90, 255]),
        ));
        let page = decode(&encode_png(luma_alpha), "luma-alpha").unwrap();
        assert_eq!(page.channels(), 2);
        assert_eq!(page.pixel_count(), 4);

        let table = colormap_match::extract_colors(&page, "luma-alpha").unwrap();
        assert!(table.samples.is_empty());
    }

    #[test]
    fn test_colliding_stems_are_qualified() {
        let inputs: Vec<Result<Input, LoadError>> = vec![
            Ok(Input::Path("a/doc-1.png".into())),
            Ok(Input::Path("b/doc-1.png".into())),
            Ok(Input::Path("b/doc-2.png".into())),
            Ok(Input::Url("https://h/doc-2.png".into())),
        ];
        let colliding = colliding_stems(&inputs);
        assert_eq!(colliding, HashSet::from(["doc-1".to_string()]));

        let ids: Vec<String> = inputs
            .iter()
            .flatten()
            .map(|input| input.qualified_page_id(&colliding))
            .collect();
        assert_eq!(ids, vec!["a/doc-1", "b/doc-1", "doc-2", "doc-2"]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"not an image", "junk.png").unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(err.source_id(), "junk.png");
    }

    #[test]
    fn test_load_missing_file() {
        let input = Input::Path("/nonexistent/doc-1.png".into());
        let err = PageLoader::default().load(&input).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.source_id(), "/nonexistent/doc-1.png");
    }
}
