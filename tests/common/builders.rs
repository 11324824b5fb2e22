//! Test builders: ergonomic constructors for raw access-log lines.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

// ---------------------------------------------------------------------------
// AccessLineBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw tab-delimited access-log lines.
///
/// Defaults describe a plain kept request from a returning visitor.
///
/// # Example
///
/// ```rust
/// let line = AccessLineBuilder::new()
///     .existing_cookie("uid=v1")
///     .url("/index.html?foo=1")
///     .user_agent("Mozilla/5.0")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AccessLineBuilder {
    fields: Vec<String>,
}

impl Default for AccessLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessLineBuilder {
    pub fn new() -> Self {
        let fields = [
            "-",
            "uid=visitor-1",
            "10.0.0.1",
            "-",
            "-",
            "[2014-01-01T00:00:00Z",
            "GET /index.html HTTP/1.1",
            "200",
            "1024",
            "http://ref.example",
            "Mozilla/5.0",
        ];
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn set(mut self, index: usize, value: impl Into<String>) -> Self {
        self.fields[index] = value.into();
        self
    }

    /// A cookie issued on this very request.
    pub fn new_cookie(self, value: impl Into<String>) -> Self {
        self.set(0, value)
    }

    /// No cookie issued; visitor comes from the existing `name=value` cookie.
    pub fn existing_cookie(self, pair: impl Into<String>) -> Self {
        self.set(0, "-").set(1, pair)
    }

    /// Set only the `name=value` cookie field.
    pub fn cookie(self, pair: impl Into<String>) -> Self {
        self.set(1, pair)
    }

    pub fn ip(self, ip: impl Into<String>) -> Self {
        self.set(2, ip)
    }

    pub fn timestamp(self, ts: impl Into<String>) -> Self {
        self.set(5, ts)
    }

    /// Replace the whole request line.
    pub fn request(self, request: impl Into<String>) -> Self {
        self.set(6, request)
    }

    /// `GET <url> HTTP/1.1`.
    pub fn url(self, url: &str) -> Self {
        self.request(format!("GET {url} HTTP/1.1"))
    }

    pub fn response_code(self, code: impl Into<String>) -> Self {
        self.set(7, code)
    }

    pub fn referer(self, referer: impl Into<String>) -> Self {
        self.set(9, referer)
    }

    pub fn user_agent(self, ua: impl Into<String>) -> Self {
        self.set(10, ua)
    }

    /// Drop fields from the end until `n` remain.
    pub fn truncate(mut self, n: usize) -> Self {
        self.fields.truncate(n);
        self
    }

    /// Append extra trailing fields.
    pub fn extra(mut self, value: impl Into<String>) -> Self {
        self.fields.push(value.into());
        self
    }

    pub fn build(self) -> String {
        self.fields.join("\t")
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A line every default rule keeps, for visitor `id` at `url`.
pub fn kept_line(id: &str, url: &str) -> String {
    AccessLineBuilder::new().new_cookie(id).url(url).build()
}

/// A static-asset request.
pub fn asset_line(id: &str) -> String {
    AccessLineBuilder::new()
        .new_cookie(id)
        .url("/static/app.js")
        .build()
}

/// A crawler request.
pub fn bot_line(id: &str) -> String {
    AccessLineBuilder::new()
        .new_cookie(id)
        .user_agent("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)")
        .build()
}

/// A request from the default blocked address.
pub fn blocked_ip_line(id: &str) -> String {
    AccessLineBuilder::new()
        .new_cookie(id)
        .ip("75.72.48.19")
        .build()
}
