use actix_web::HttpRequest;

/// Best guess at the caller's address, used as a rate-limit key.
///
/// Proxy headers (`Forwarded`, `X-Forwarded-For`) are only honoured when
/// `trust_proxy_headers` is set, otherwise the socket peer is used.
pub fn get_client_ip(req: &HttpRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(addr) = req.connection_info().realip_remote_addr() {
            return strip_port(addr).to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn strip_port(addr: &str) -> &str {
    // [::1]:8080 / 1.2.3.4:8080 / bare IPv6
    if let Some(rest) = addr.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn forwarded_header_ignored_unless_trusted() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .peer_addr("192.168.1.10:5555".parse().unwrap())
            .to_http_request();

        assert_eq!(get_client_ip(&req, false), "192.168.1.10");
        assert_eq!(get_client_ip(&req, true), "203.0.113.7");
    }

    #[test]
    fn ports_are_stripped() {
        assert_eq!(strip_port("1.2.3.4:80"), "1.2.3.4");
        assert_eq!(strip_port("[2001:db8::1]:443"), "2001:db8::1");
        assert_eq!(strip_port("2001:db8::1"), "2001:db8::1");
    }
}
