//! Endpoint URL handling.

use regex::Regex;
use std::sync::LazyLock;

/// `user:password@` right after the scheme. Path segments such as `/@@mail`
/// contain a slash before the `@` and are left alone.
static CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"://([^/:@]+:[^/:@]+)@").expect("Invalid credentials regex")
});

/// Where and as whom to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Endpoint URL with any embedded credentials removed.
    pub url: String,

    /// Basic-auth user and password.
    pub credentials: Option<(String, String)>,
}

impl Target {
    /// Split embedded `user:password@` credentials out of `url`.
    ///
    /// `fallback` is used when the URL carries none.
    pub fn parse(url: &str, fallback: Option<(String, String)>) -> Self {
        let Some(found) = CREDENTIALS_REGEX.captures(url).and_then(|c| c.get(1)) else {
            return Self {
                url: url.to_string(),
                credentials: fallback,
            };
        };

        let auth = found.as_str();
        let credentials = auth
            .split_once(':')
            .map(|(user, password)| (user.to_string(), password.to_string()));
        let mut stripped = String::with_capacity(url.len());
        stripped.push_str(&url[..found.start()]);
        // Skip the credentials and the '@' that follows them.
        stripped.push_str(&url[found.end() + 1..]);

        Self {
            url: stripped,
            credentials,
        }
    }
}
