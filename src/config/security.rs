//! Security policy data and its rendering into HTTP response headers.

/// Content-Security-Policy directive table, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspPolicy {
    /// `(directiveName, sources)` with camelCase names, e.g. `defaultSrc`.
    pub directives: Vec<(&'static str, Vec<String>)>,
    /// Send as `Content-Security-Policy-Report-Only` instead of enforcing.
    pub report_only: bool,
}

impl CspPolicy {
    /// Sources for a directive by its camelCase name.
    pub fn sources(&self, directive: &str) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(name, _)| *name == directive)
            .map(|(_, sources)| sources.as_slice())
    }

    pub fn header_name(&self) -> &'static str {
        if self.report_only {
            "content-security-policy-report-only"
        } else {
            "content-security-policy"
        }
    }

    /// `default-src 'self' ...; style-src ...`
    pub fn header_value(&self) -> String {
        self.directives
            .iter()
            .map(|(name, sources)| {
                let mut part = kebab_case(name);
                for source in sources {
                    part.push(' ');
                    part.push_str(source);
                }
                part
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hsts {
    /// Seconds.
    pub max_age: u64,
    pub include_sub_domains: bool,
    pub preload: bool,
}

impl Hsts {
    pub fn header_value(&self) -> String {
        let mut value = format!("max-age={}", self.max_age);
        if self.include_sub_domains {
            value.push_str("; includeSubDomains");
        }
        if self.preload {
            value.push_str("; preload");
        }
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPolicy {
    pub csp: CspPolicy,
    pub hsts: Hsts,
    /// `Referrer-Policy` value.
    pub referrer: &'static str,
    /// Also send the fixed hardening headers in [`ADDITIONAL_HEADERS`].
    pub additional_headers: bool,
    /// Apply headers even when `NODE_ENV` is not `production`.
    pub apply_in_dev: bool,
}

/// Hardening headers sent alongside the policy headers.
pub const ADDITIONAL_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("x-download-options", "noopen"),
    ("x-dns-prefetch-control", "off"),
];

impl SecurityPolicy {
    /// Build the fixed policy with the resolved auth host allowed as an image source.
    pub fn new(auth_host: &str) -> Self {
        let csp = CspPolicy {
            directives: vec![
                (
                    "defaultSrc",
                    sources(&[
                        "'self'",
                        "https://google-analytics.com",
                        "https://fonts.gstatic.com",
                        "https://fonts.googleapis.com",
                    ]),
                ),
                (
                    "styleSrc",
                    sources(&["'self'", "https://fonts.googleapis.com", "cdn.jsdelivr.net", "'unsafe-inline'"]),
                ),
                ("fontSrc", sources(&["fonts.gstatic.com", "cdn.jsdelivr.net"])),
                ("scriptSrc", sources(&["'self'", "'unsafe-inline'", "'unsafe-eval'"])),
                (
                    "imgSrc",
                    sources(&[
                        "'self'",
                        "https://www.google-analytics.com",
                        "https://www.gravatar.com",
                        auth_host,
                        "data: papermc.io paper.readthedocs.io",
                        // user-supplied descriptions may embed any https image
                        "https:",
                    ]),
                ),
                ("frameSrc", sources(&["'self'", "http://localhost/", "https://papermc.io/"])),
                ("manifestSrc", sources(&["'self'"])),
                (
                    "connectSrc",
                    sources(&["'self'", "https://www.google-analytics.com", "https://stats.g.doubleclick.net"]),
                ),
                ("mediaSrc", sources(&["'self'"])),
                ("objectSrc", sources(&["'none'"])),
                ("baseUri", sources(&["'none'"])),
            ],
            report_only: false,
        };

        Self {
            csp,
            hsts: Hsts { max_age: 15_552_000, include_sub_domains: true, preload: true },
            referrer: "same-origin",
            additional_headers: true,
            apply_in_dev: true,
        }
    }

    /// Whether headers should be attached in the given `NODE_ENV`.
    pub fn applies_to(&self, environment: Option<&str>) -> bool {
        self.apply_in_dev || environment == Some("production")
    }

    /// Every header this policy renders, as `(lowercase name, value)` pairs.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (self.csp.header_name(), self.csp.header_value()),
            ("strict-transport-security", self.hsts.header_value()),
            ("referrer-policy", self.referrer.to_string()),
        ];
        if self.additional_headers {
            headers.extend(ADDITIONAL_HEADERS.iter().map(|(k, v)| (*k, v.to_string())));
        }
        headers
    }
}

fn sources(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// `defaultSrc` -> `default-src`
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
