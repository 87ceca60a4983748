//! Footer redirects.
//!
//! A provider may answer a request for a large dataset with a placeholder
//! message whose footer carries the URL where the dataset will be published
//! once ready. The client polls that URL with a fixed wait before each
//! attempt and a hard cap on attempts.

use std::future::Future;
use std::time::Duration;

use sdmx_types::{Footer, FooterRetry, SdmxError};
use url::Url;

/// Final state of a redirect poll.
#[derive(Debug)]
pub enum Redirect<T> {
    /// The footer holds no URL; keep the original message.
    NotRedirected,
    /// An attempt succeeded.
    Resolved(T),
    /// Every attempt failed.
    Exhausted {
        /// The polled URL.
        url: String,
        /// Attempts made.
        attempts: u32,
    },
}

/// Returns true if `line` is an absolute http, https or ftp URL with a host.
#[must_use]
pub fn is_url(line: &str) -> bool {
    Url::parse(line.trim()).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https" | "ftp")
            && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Returns the first footer line that is a URL.
#[must_use]
pub fn footer_url(footer: &Footer) -> Option<&str> {
    footer.lines.iter().map(|l| l.trim()).find(|l| is_url(l))
}

/// Polls the URL found in `footer` with `fetch`, following `retry`.
///
/// Waits `retry.wait` before every attempt. The first successful attempt is
/// returned immediately; failed attempts are logged and the next one is made
/// until `retry.attempts` is used up.
pub async fn follow<T, F, Fut>(footer: &Footer, retry: FooterRetry, mut fetch: F) -> Redirect<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, SdmxError>>,
{
    if !retry.is_enabled() {
        return Redirect::NotRedirected;
    }
    let Some(url) = footer_url(footer) else {
        return Redirect::NotRedirected;
    };

    tracing::info!(
        %url,
        attempts = retry.attempts,
        wait_secs = retry.wait.as_secs_f64(),
        "Found URL in footer, polling"
    );

    for attempt in 1..=retry.attempts {
        wait(retry.wait).await;
        match fetch(url.to_string()).await {
            Ok(value) => {
                tracing::info!(%url, attempt, "Footer URL retrieved");
                return Redirect::Resolved(value);
            }
            Err(e) => {
                tracing::info!(%url, attempt, error = %e, "Footer URL attempt failed");
            }
        }
    }

    tracing::warn!(%url, attempts = retry.attempts, "Footer URL still unavailable, giving up");
    Redirect::Exhausted {
        url: url.to_string(),
        attempts: retry.attempts,
    }
}

async fn wait(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    const DATA_URL: &str = "http://ec.europa.eu/eurostat/SDMX/diss-web/file/abc123";

    fn placeholder() -> Footer {
        Footer::new([
            "Due to the large query the response will be written to a file.",
            DATA_URL,
            "http://second.example.org/ignored",
        ])
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.org/data"));
        assert!(is_url("  https://example.org  "));
        assert!(is_url("ftp://files.example.org/x.zip"));
        assert!(!is_url("example.org/data"));
        assert!(!is_url("mailto:someone@example.org"));
        assert!(!is_url("Please try again later."));
        assert!(!is_url(""));
    }

    #[test]
    fn test_footer_url_first_match() {
        assert_eq!(footer_url(&placeholder()), Some(DATA_URL));
        assert_eq!(footer_url(&Footer::new(["no url here"])), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_succeeds_after_one_wait() {
        let retry = FooterRetry::new(Duration::from_secs(30), 3);
        let calls = Cell::new(0);
        let start = Instant::now();

        let result = follow(&placeholder(), retry, |url| {
            calls.set(calls.get() + 1);
            async move { Ok::<_, SdmxError>(url) }
        })
        .await;

        assert!(matches!(result, Redirect::Resolved(ref url) if url == DATA_URL));
        assert_eq!(calls.get(), 1);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(30) && elapsed < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_attempt_succeeds() {
        let retry = FooterRetry::new(Duration::from_secs(10), 3);
        let calls = Cell::new(0);
        let start = Instant::now();

        let result = follow(&placeholder(), retry, |_| {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 2 {
                    Err(SdmxError::Transport("not ready".to_string()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert!(matches!(result, Redirect::Resolved(2)));
        assert_eq!(calls.get(), 2);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(20) && elapsed < Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_attempts_fail() {
        let retry = FooterRetry::new(Duration::from_secs(5), 3);
        let calls = Cell::new(0);

        let result: Redirect<()> = follow(&placeholder(), retry, |_| {
            calls.set(calls.get() + 1);
            async { Err(SdmxError::Transport("404".to_string())) }
        })
        .await;

        assert!(matches!(
            result,
            Redirect::Exhausted { ref url, attempts: 3 } if url == DATA_URL
        ));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_no_url_in_footer() {
        let footer = Footer::new(["Informational message"]);
        let calls = Cell::new(0);
        let result: Redirect<()> = follow(&footer, FooterRetry::default(), |_| {
            calls.set(calls.get() + 1);
            async { Ok(()) }
        })
        .await;
        assert!(matches!(result, Redirect::NotRedirected));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_disabled() {
        let calls = Cell::new(0);
        let result: Redirect<()> = follow(&placeholder(), FooterRetry::disabled(), |_| {
            calls.set(calls.get() + 1);
            async { Ok(()) }
        })
        .await;
        assert!(matches!(result, Redirect::NotRedirected));
        assert_eq!(calls.get(), 0);
    }
}
