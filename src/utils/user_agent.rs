//! User-Agent classification for click analytics.
//!
//! Parsing is delegated to `woothee`; raw substring checks back it up for
//! agents woothee does not know, so a UA that merely says "Mobile" still
//! counts as a mobile client.

use woothee::parser::Parser;

use crate::domain::entities::DeviceType;

const UNKNOWN: &str = "UNKNOWN";

/// Client name used when nothing better can be derived.
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// woothee names that describe a family of agents rather than one product.
const GENERIC_NAMES: &[&str] = &[
    UNKNOWN,
    "misc crawler",
    "HTTP Library",
    "RSSReader",
    "Mobile",
    "Mobile Transcoder",
];

const MOBILE_MARKERS: &[&str] = &["Mobile", "iPhone", "Android"];
const BOT_MARKERS: &[&str] = &["bot", "crawler", "spider", "slurp"];

/// What a click's User-Agent says about the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub client_name: String,
    pub device_type: DeviceType,
}

/// Parses a User-Agent header value.
///
/// Device rules, first match wins:
/// 1. `mobile` if the agent identifies as a phone
/// 2. `bot` if it identifies as a crawler
/// 3. `desktop` otherwise
///
/// # Examples
///
/// ```ignore
/// let info = parse_user_agent("Googlebot/2.1 (+http://www.google.com/bot.html)");
/// assert_eq!(info.device_type, DeviceType::Bot);
/// assert_eq!(info.client_name, "Googlebot");
/// ```
pub fn parse_user_agent(user_agent: &str) -> ClientInfo {
    let user_agent = user_agent.trim();
    let parser = Parser::new();
    let parsed = parser.parse(user_agent);

    let category = parsed.as_ref().map(|r| r.category).unwrap_or(UNKNOWN);
    let device_type = classify_device(user_agent, category);

    let client_name = parsed
        .as_ref()
        .map(|r| r.name)
        .filter(|name| !name.is_empty() && !GENERIC_NAMES.contains(name))
        .map(str::to_string)
        .or_else(|| product_token(user_agent))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    ClientInfo {
        client_name,
        device_type,
    }
}

fn classify_device(user_agent: &str, category: &str) -> DeviceType {
    let is_mobile = matches!(category, "smartphone" | "mobilephone")
        || MOBILE_MARKERS.iter().any(|m| user_agent.contains(m));
    if is_mobile {
        return DeviceType::Mobile;
    }

    let lowered = user_agent.to_ascii_lowercase();
    let is_bot = category == "crawler" || BOT_MARKERS.iter().any(|m| lowered.contains(m));
    if is_bot {
        return DeviceType::Bot;
    }

    DeviceType::Desktop
}

/// First `product/version` token, e.g. `curl` from `curl/8.4.0`.
///
/// `Mozilla` and `compatible` are skipped: nearly every agent sends them.
fn product_token(user_agent: &str) -> Option<String> {
    user_agent
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter_map(|token| token.split('/').next())
        .map(|name| name.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
        .find(|name| !name.is_empty() && !matches!(*name, "Mozilla" | "compatible"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_generic_mobile_agent_is_mobile() {
        let info = parse_user_agent("Mozilla/5.0 ... Mobile ...");
        assert_eq!(info.device_type, DeviceType::Mobile);
    }

    #[test]
    fn test_googlebot_is_bot() {
        let info = parse_user_agent("Googlebot/2.1");
        assert_eq!(info.device_type, DeviceType::Bot);
        assert_eq!(info.client_name, "Googlebot");
    }

    #[test]
    fn test_chrome_desktop() {
        let info = parse_user_agent(CHROME_DESKTOP);
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(info.client_name, "Chrome");
    }

    #[test]
    fn test_iphone_safari_is_mobile() {
        let info = parse_user_agent(SAFARI_IPHONE);
        assert_eq!(info.device_type, DeviceType::Mobile);
        assert_eq!(info.client_name, "Safari");
    }

    #[test]
    fn test_mobile_wins_over_bot() {
        let info = parse_user_agent("Mozilla/5.0 (Linux; Android 6.0.1) Mobile SomeBot/1.0");
        assert_eq!(info.device_type, DeviceType::Mobile);
    }

    #[test]
    fn test_unknown_tool_uses_product_token() {
        let info = parse_user_agent("acme-sync/3.4 (linux)");
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(info.client_name, "acme-sync");
    }

    #[test]
    fn test_crawlers_keep_distinct_names() {
        assert_eq!(parse_user_agent("Googlebot/2.1").client_name, "Googlebot");
        assert_eq!(parse_user_agent("bingbot/2.0").client_name, "bingbot");
        assert_eq!(
            parse_user_agent("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)")
                .client_name,
            "Googlebot"
        );
    }

    #[test]
    fn test_http_tools_keep_product_name() {
        let info = parse_user_agent("curl/8.0");
        assert_eq!(info.client_name, "curl");
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(parse_user_agent("python-requests/2.31.0").client_name, "python-requests");
    }

    #[test]
    fn test_empty_agent() {
        let info = parse_user_agent("");
        assert_eq!(info.device_type, DeviceType::Desktop);
        assert_eq!(info.client_name, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_product_token_skips_mozilla() {
        assert_eq!(product_token("Mozilla/5.0 Foo/1"), Some("Foo".to_string()));
        assert_eq!(product_token("Mozilla/5.0"), None);
        assert_eq!(product_token("Mozilla/5.0 (compatible; Foo/1)"), Some("Foo".to_string()));
    }
}
