//! Text fixtures and builders.
//!
//! Provides builders for e-mail style bodies containing plain and Safe Links
//! URLs, with configurable line endings and `<...>` delimiters.

use safelinks::SAFE_LINKS_BASE_DOMAIN;

/// Destinations used across fixture bodies.
pub const DESTINATIONS: &[&str] = &[
    "https://example.com/",
    "https://example.org/docs/getting-started?lang=en&page=2",
    "https://www.example.net/path/to/file.pdf",
    "https://sub.example.com/a/b/c#section-2",
    "http://legacy.example.com/index.html",
];

/// Line ending used when joining fixture lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Percent-encodes `url` the way the Safe Links service does.
pub fn percent_encode(url: &str) -> String {
    url.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
            other => {
                let mut buf = [0u8; 4];
                other
                    .encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}

/// Builds a Safe Links URL wrapping `destination`.
pub fn safe_link(subdomain: &str, destination: &str) -> String {
    format!(
        "https://{}.{}/?url={}&data=05%7C01%7Cuser%40example.com%7C0%7C0&sdata=abc%3D&reserved=0",
        subdomain,
        SAFE_LINKS_BASE_DOMAIN,
        percent_encode(destination)
    )
}

/// Builder for e-mail style message bodies.
///
/// # Example
///
/// ```ignore
/// let body = EmailBuilder::new()
///     .with_line("Hello,")
///     .with_link("https://example.com/")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct EmailBuilder {
    lines: Vec<(String, Option<String>)>,
    line_ending: LineEnding,
    angle_brackets: bool,
    wrap_links: bool,
}

impl EmailBuilder {
    /// Creates a builder producing LF bodies with wrapped links.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            line_ending: LineEnding::Lf,
            angle_brackets: false,
            wrap_links: true,
        }
    }

    /// Sets the line ending.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Encloses every link in `<...>`.
    pub fn with_angle_brackets(mut self) -> Self {
        self.angle_brackets = true;
        self
    }

    /// Writes links as plain URLs instead of Safe Links.
    pub fn unwrapped(mut self) -> Self {
        self.wrap_links = false;
        self
    }

    /// Adds a line of prose.
    pub fn with_line(mut self, text: &str) -> Self {
        self.lines.push((text.to_string(), None));
        self
    }

    /// Adds a line of prose followed by a link.
    pub fn with_link(mut self, destination: &str) -> Self {
        self.lines
            .push(("See the page at".to_string(), Some(destination.to_string())));
        self
    }

    fn render(&self, wrap: bool) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, (text, link))| match link {
                None => text.clone(),
                Some(destination) => {
                    let url = if wrap {
                        let subdomain = if i % 2 == 0 { "nam02" } else { "eur01" };
                        safe_link(subdomain, destination)
                    } else {
                        destination.clone()
                    };
                    if self.angle_brackets {
                        format!("{} <{}> for details.", text, url)
                    } else {
                        format!("{} {} for details.", text, url)
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(self.line_ending.as_str())
    }

    /// Renders the body.
    pub fn build(&self) -> String {
        self.render(self.wrap_links)
    }

    /// Renders the body as it should read once all links are decoded.
    pub fn build_decoded(&self) -> String {
        self.render(false)
    }
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard test body with four https and one http destination.
pub fn standard_email() -> EmailBuilder {
    DESTINATIONS
        .iter()
        .fold(EmailBuilder::new().with_line("Hello team,").with_line(""), |b, d| {
            b.with_link(d)
        })
        .with_line("")
        .with_line("Thanks!")
}
