//! Extraction options
//!
//! Controls how leaf scripts are turned into files. The defaults reproduce
//! the standard layout: inflated bodies, a two-line header, `.rb` files.

/// Default container file name
pub const DEFAULT_INPUT: &str = "Scripts.rvdata2";

/// Default output directory name
pub const DEFAULT_OUTPUT: &str = "Scripts";

/// Options for a script extraction pass.
///
/// # Example
///
/// ```
/// use rvscripts::extract::ExtractionOptions;
///
/// let options = ExtractionOptions::new()
///     .with_inflate_bodies(false)
///     .with_extension("txt");
/// assert_eq!(options.extension, "txt");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Inflate zlib-compressed bodies before normalizing them
    pub inflate_bodies: bool,

    /// Prepend the `# encoding` / `# Name` header to each file
    pub write_header: bool,

    /// File extension for leaf scripts, without the dot
    pub extension: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionOptions {
    /// Create options with the standard layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inflate_bodies: true,
            write_header: true,
            extension: "rb".to_string(),
        }
    }

    /// Set whether to inflate zlib bodies.
    #[must_use]
    pub fn with_inflate_bodies(mut self, inflate: bool) -> Self {
        self.inflate_bodies = inflate;
        self
    }

    /// Set whether to write the header lines.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.write_header = header;
        self
    }

    /// Set the leaf file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }
}
