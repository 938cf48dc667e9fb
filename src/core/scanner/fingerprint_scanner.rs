// src/core/scanner/fingerprint_scanner.rs

use crate::core::error::ScanError;
use crate::core::scanner::fetch_site;
use crate::core::target::Target;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::{debug, error, info};

/// Where in the response a rule looks.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// A response header, by lower-case name.
    Header(&'static str),
    /// The `content` of `<meta name=…>`.
    MetaTag(&'static str),
    /// The raw HTML body.
    Body,
    /// `src` attributes of `<script>` tags.
    ScriptSrc,
    /// `href` attributes of `<link>` tags.
    LinkHref,
    /// All `set-cookie` values joined together.
    Cookie,
}

/// A rule that detects one technology.
struct Rule {
    tech: &'static str,
    source: Source,
    pattern: &'static str,
}

const fn rule(tech: &'static str, source: Source, pattern: &'static str) -> Rule {
    Rule { tech, source, pattern }
}

static RULES: &[Rule] = &[
    // Servers and edges
    rule("Nginx", Source::Header("server"), r"(?i)nginx"),
    rule("Nginx", Source::Body, r"<hr><center>nginx</center>"),
    rule("Apache", Source::Header("server"), r"Apache"),
    rule("Apache", Source::Body, r"Apache Server at"),
    rule("LiteSpeed", Source::Header("server"), r"LiteSpeed"),
    rule("Microsoft IIS", Source::Header("server"), r"Microsoft-IIS"),
    rule("Cloudflare", Source::Header("server"), r"(?i)cloudflare"),
    rule("Cloudflare", Source::Header("cf-ray"), r".+"),
    rule("Amazon CloudFront", Source::Header("x-amz-cf-id"), r".+"),
    rule("Fastly", Source::Header("x-served-by"), r"cache-"),
    rule("Vercel", Source::Header("x-vercel-id"), r".+"),
    rule("Netlify", Source::Header("x-nf-request-id"), r".+"),
    // CMS and shops
    rule("WordPress", Source::MetaTag("generator"), r"WordPress"),
    rule("WordPress", Source::Body, r"/wp-content/|/wp-includes/"),
    rule("Joomla", Source::MetaTag("generator"), r"Joomla!"),
    rule("Drupal", Source::Header("x-generator"), r"Drupal"),
    rule("Drupal", Source::MetaTag("generator"), r"Drupal"),
    rule("Ghost", Source::MetaTag("generator"), r"Ghost"),
    rule("Shopify", Source::Header("x-shopid"), r".+"),
    rule("Shopify", Source::Body, r"cdn\.shopify\.com"),
    rule("Magento", Source::Cookie, r"(?i)magento"),
    // Back-end languages and frameworks
    rule("PHP", Source::Header("x-powered-by"), r"PHP"),
    rule("PHP", Source::Cookie, r"PHPSESSID"),
    rule("ASP.NET", Source::Header("x-aspnet-version"), r".+"),
    rule("ASP.NET", Source::Header("x-powered-by"), r"ASP\.NET"),
    rule("Java", Source::Cookie, r"JSESSIONID"),
    rule("Django", Source::Cookie, r"csrftoken"),
    rule("Ruby on Rails", Source::Cookie, r"_rails_session"),
    rule("Express", Source::Header("x-powered-by"), r"Express"),
    // Front-end
    rule("Next.js", Source::Header("x-powered-by"), r"Next\.js"),
    rule("Next.js", Source::ScriptSrc, r"/_next/static/"),
    rule("Nuxt.js", Source::Body, r"__NUXT__"),
    rule("Angular", Source::Body, r#"ng-version=""#),
    rule("SolidJS", Source::Body, r"data-hk="),
    rule("Svelte", Source::Body, r#"class=["'][^"']*svelte-"#),
    rule("Gatsby", Source::Body, r#"id=["']___gatsby["']"#),
    rule("Astro", Source::MetaTag("generator"), r"Astro v"),
    rule("React", Source::Body, r"react-dom|data-reactroot|react\.development"),
    rule("Vue.js", Source::Body, r"data-v-app|__VUE_"),
    rule("jQuery", Source::ScriptSrc, r"jquery(?:-[\d.]+)?(?:\.slim)?(?:\.min)?\.js"),
    rule("Bootstrap", Source::LinkHref, r"bootstrap(?:\.min)?\.css"),
    rule("Google Analytics", Source::ScriptSrc, r"google-analytics\.com/|googletagmanager\.com/"),
];

struct CompiledRule {
    rule: &'static Rule,
    regex: Regex,
}

/// `RULES` with their patterns compiled. A pattern that fails to compile is
/// logged and left out.
static COMPILED: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    RULES
        .iter()
        .filter_map(|rule| match Regex::new(rule.pattern) {
            Ok(regex) => Some(CompiledRule { rule, regex }),
            Err(e) => {
                error!(tech = rule.tech, error = %e, "Invalid fingerprint pattern");
                None
            }
        })
        .collect()
});

static SCRIPT_SRC: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("script[src]").ok());
static LINK_HREF: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("link[href]").ok());

/// Fetches the target's site root and identifies the technologies behind it.
pub async fn run_fingerprint_scan(client: &Client, target: &Target) -> Result<BTreeSet<&'static str>, ScanError> {
    info!(host = target.host(), "Starting fingerprint scan.");
    let (headers, body) = fetch_site(client, target).await?;
    let technologies = fingerprint(&headers, &body);
    info!(count = technologies.len(), "Fingerprint scan finished.");
    Ok(technologies)
}

/// Names of every technology with at least one matching rule.
pub fn fingerprint(headers: &HeaderMap, body: &str) -> BTreeSet<&'static str> {
    let cookies = headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    let document = Html::parse_document(body);

    debug!(total_rules = COMPILED.len(), "Applying fingerprinting rules.");
    COMPILED
        .iter()
        .filter(|CompiledRule { rule, regex }| {
            let hit = match rule.source {
                Source::Header(name) => headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|value| regex.is_match(value)),
                Source::MetaTag(name) => meta_content_matches(&document, name, regex),
                Source::Body => regex.is_match(body),
                Source::ScriptSrc => attribute_matches(&document, SCRIPT_SRC.as_ref(), "src", regex),
                Source::LinkHref => attribute_matches(&document, LINK_HREF.as_ref(), "href", regex),
                Source::Cookie => regex.is_match(&cookies),
            };
            if hit {
                debug!(tech = rule.tech, source = ?rule.source, "Rule matched.");
            }
            hit
        })
        .map(|compiled| compiled.rule.tech)
        .collect()
}

fn meta_content_matches(document: &Html, name: &str, regex: &Regex) -> bool {
    let Ok(selector) = Selector::parse(&format!("meta[name='{}']", name)) else {
        return false;
    };
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .any(|content| regex.is_match(content))
}

fn attribute_matches(document: &Html, selector: Option<&Selector>, attribute: &str, regex: &Regex) -> bool {
    let Some(selector) = selector else { return false };
    document
        .select(selector)
        .filter_map(|el| el.value().attr(attribute))
        .any(|value| regex.is_match(value))
}
