use axum::http::HeaderMap;

// Hop-by-hop headers are connection-scoped and must not cross the
// proxy in either direction (RFC 9110).
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

// Stripped from the client request before the upstream leg: the origin
// must never see the browsing client's cookies or address, and framing
// headers are recomputed for the new connection.
// accept-encoding is stripped so origins reply with identity bodies;
// the HTML branch rewrites the raw text and cannot decode compressed
// payloads.
const OUTBOUND_DENY: [&str; 7] = [
    "cookie",
    "x-forwarded-for",
    "forwarded",
    "x-real-ip",
    "host",
    "content-length",
    "accept-encoding",
];

// Stripped from the upstream response before it reaches the client:
// the origin must not set cookies through the proxy, and framing is
// recomputed for the downstream connection.
const INBOUND_DENY: [&str; 2] = ["set-cookie", "content-length"];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

pub fn sanitize_outbound_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| {
            let name = name.as_str();
            !is_hop_by_hop(name) && !OUTBOUND_DENY.iter().any(|d| name.eq_ignore_ascii_case(d))
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

pub fn sanitize_inbound_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| {
            let name = name.as_str();
            !is_hop_by_hop(name) && !INBOUND_DENY.iter().any(|d| name.eq_ignore_ascii_case(d))
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn outbound_strips_cookies_and_client_address() {
        let out = sanitize_outbound_headers(&headers(&[
            ("cookie", "session=secret"),
            ("x-forwarded-for", "10.0.0.1"),
            ("forwarded", "for=10.0.0.1"),
            ("x-real-ip", "10.0.0.1"),
            ("accept", "text/html"),
            ("accept-language", "en"),
        ]));
        assert!(out.get("cookie").is_none());
        assert!(out.get("x-forwarded-for").is_none());
        assert!(out.get("forwarded").is_none());
        assert!(out.get("x-real-ip").is_none());
        assert_eq!(out.get("accept").unwrap(), "text/html");
        assert_eq!(out.get("accept-language").unwrap(), "en");
    }

    #[test]
    fn outbound_strips_host_and_hop_by_hop() {
        let out = sanitize_outbound_headers(&headers(&[
            ("host", "proxy.example"),
            ("connection", "keep-alive"),
            ("upgrade", "websocket"),
            ("user-agent", "test"),
        ]));
        assert!(out.get("host").is_none());
        assert!(out.get("connection").is_none());
        assert!(out.get("upgrade").is_none());
        assert_eq!(out.get("user-agent").unwrap(), "test");
    }

    #[test]
    fn inbound_strips_set_cookie() {
        let out = sanitize_inbound_headers(&headers(&[
            ("set-cookie", "tracker=1"),
            ("content-type", "image/png"),
            ("etag", "\"abc\""),
        ]));
        assert!(out.get("set-cookie").is_none());
        assert_eq!(out.get("content-type").unwrap(), "image/png");
        assert_eq!(out.get("etag").unwrap(), "\"abc\"");
    }

    #[test]
    fn inbound_strips_framing_headers() {
        let out = sanitize_inbound_headers(&headers(&[
            ("content-length", "42"),
            ("transfer-encoding", "chunked"),
            ("content-type", "application/json"),
        ]));
        assert!(out.get("content-length").is_none());
        assert!(out.get("transfer-encoding").is_none());
        assert!(out.get("content-type").is_some());
    }
}
