//! Hosts that render text on a canvas
//!
//! These editors keep no DOM text under the caret. The only input they
//! accept from outside is keyboard and clipboard events on a hidden target.

/// Where to send a synthetic paste on a canvas editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    pub name: &'static str,
    /// Hostname, matched exactly or as a parent domain
    pub host: &'static str,
    /// CSS selector of the element receiving key and clipboard events
    pub target_selector: &'static str,
    /// The selector names an iframe whose body is the real target
    pub in_iframe: bool,
}

pub const HOST_PROFILES: &[HostProfile] = &[HostProfile {
    name: "Google Docs",
    host: "docs.google.com",
    target_selector: ".docs-texteventtarget-iframe",
    in_iframe: true,
}];

/// Profile for a page hostname
pub fn profile_for_host(hostname: &str) -> Option<&'static HostProfile> {
    let hostname = hostname.trim_end_matches('.').to_ascii_lowercase();
    HOST_PROFILES.iter().find(|profile| {
        hostname == profile.host
            || hostname
                .strip_suffix(profile.host)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
