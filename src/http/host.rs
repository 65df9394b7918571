//! Host header validation
//!
//! Patterns are exact host names, `*` for any host, or `.example.com` for a
//! domain and all of its subdomains. Matching ignores ASCII case and the port.

/// Patterns accepted in debug mode when none is configured
const DEBUG_HOSTS: [&str; 3] = [".localhost", "127.0.0.1", "[::1]"];

/// Strip the port from a `Host` header value, keeping IPv6 brackets
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

/// Check a `Host` header value against the configured patterns
pub fn is_allowed_host(host: &str, allowed: &[String], debug: bool) -> bool {
    let host = strip_port(host.trim()).trim_end_matches('.');
    if host.is_empty() {
        return false;
    }

    if allowed.is_empty() {
        return debug && DEBUG_HOSTS.iter().any(|pattern| matches_pattern(host, pattern));
    }

    allowed.iter().any(|pattern| matches_pattern(host, pattern))
}

fn matches_pattern(host: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(domain) = pattern.strip_prefix('.') {
        // ".example.com" matches "example.com" and "a.example.com"
        if host.eq_ignore_ascii_case(domain) {
            return true;
        }
        return host.len() > pattern.len()
            && host
                .get(host.len() - pattern.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(pattern));
    }

    host.eq_ignore_ascii_case(pattern)
}
