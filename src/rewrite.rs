use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

// Encodes everything except unreserved characters, so captured URLs
// survive a round trip through a query parameter.
pub const TARGET_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

pub fn encode_target(url: &str) -> String {
    utf8_percent_encode(url, TARGET_ENCODE).to_string()
}

// Narrow transform seam: the forwarder only sees this trait, so the
// regex passes below could be swapped for a real parser later.
pub trait Rewrite: Send + Sync {
    fn rewrite(&self, body: &str) -> String;
}

// Regex-based rewriter. No parsing; a fixed sequence of passes over the
// raw document text. Rewritten values are same-origin paths that no
// longer match the absolute-URL patterns, so the composed transform is
// idempotent as long as the pass order is preserved.
pub struct RegexRewriter;

lazy_static! {
    // paired script elements, then any dangling script tags
    static ref SCRIPT_PAIR: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?i)</?script\b[^>]*>").unwrap();

    // absolute http(s) URLs in href/src, either quote style
    static ref HREF_ABS: Regex =
        Regex::new(r#"(?i)\bhref\s*=\s*(?:"(https?://[^"]*)"|'(https?://[^']*)')"#).unwrap();
    static ref SRC_ABS: Regex =
        Regex::new(r#"(?i)\bsrc\s*=\s*(?:"(https?://[^"]*)"|'(https?://[^']*)')"#).unwrap();

    // form actions: a strict quoted pass, then a loose pass that
    // normalizes missing or mismatched quoting
    static ref FORM_ACTION: Regex = Regex::new(
        r#"(?is)(<form\b[^>]*?)\baction\s*=\s*(?:"(https?://[^"]*)"|'(https?://[^']*)')"#
    )
    .unwrap();
    static ref FORM_ACTION_LOOSE: Regex = Regex::new(
        r#"(?is)(<form\b[^>]*?)\baction\s*=\s*["']?(https?://[^\s"'>]+)["']?"#
    )
    .unwrap();
}

// Pulls the captured URL and its quote character out of a two-branch
// (double/single quote) match.
fn quoted_capture<'a>(caps: &'a Captures<'_>, double: usize, single: usize) -> (char, &'a str) {
    match caps.get(double) {
        Some(m) => ('"', m.as_str()),
        None => ('\'', &caps[single]),
    }
}

fn rewrite_url_attr(input: &str, re: &Regex, attr: &str, endpoint: &str) -> String {
    re.replace_all(input, |caps: &Captures| {
        let (quote, target) = quoted_capture(caps, 1, 2);
        format!(
            "{attr}={quote}{endpoint}?url={}{quote}",
            encode_target(target)
        )
    })
    .into_owned()
}

impl Rewrite for RegexRewriter {
    fn rewrite(&self, body: &str) -> String {
        let body = SCRIPT_PAIR.replace_all(body, "");
        let body = SCRIPT_TAG.replace_all(&body, "");
        let body = rewrite_url_attr(&body, &HREF_ABS, "href", "/proxy");
        let body = rewrite_url_attr(&body, &SRC_ABS, "src", "/proxy");
        let body = FORM_ACTION.replace_all(&body, |caps: &Captures| {
            let (quote, target) = quoted_capture(caps, 2, 3);
            format!(
                "{}action={quote}/form-proxy?url={}{quote}",
                &caps[1],
                encode_target(target)
            )
        });
        let body = FORM_ACTION_LOOSE.replace_all(&body, |caps: &Captures| {
            format!(
                "{}action=\"/form-proxy?url={}\"",
                &caps[1],
                encode_target(&caps[2])
            )
        });
        body.into_owned()
    }
}
