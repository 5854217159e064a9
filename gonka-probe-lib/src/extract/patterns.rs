//! The label and value patterns used by every source strategy.
//!
//! All entries live in this one table so that gaps in locale coverage are visible and each entry
//! is covered by a test. Bump [`PATTERN_TABLE_VERSION`] whenever an entry changes meaning.

use regex::{Regex, RegexBuilder};

/// Revision of the pattern table below.
pub const PATTERN_TABLE_VERSION: u32 = 1;

/// A label pattern paired with the shape of the value expected near it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityRule {
    pub field: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub window: usize,
}

/// A single pattern whose first capture group holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRule {
    pub field: &'static str,
    pub pattern: &'static str,
}

/// A [`ProximityRule`] with both patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledProximityRule {
    pub label: Regex,
    pub value: Regex,
    pub window: usize,
}

impl ProximityRule {
    #[must_use]
    pub fn compile(&self) -> CompiledProximityRule {
        CompiledProximityRule {
            label: compile(self.label),
            value: compile(self.value),
            window: self.window,
        }
    }
}

impl CaptureRule {
    #[must_use]
    pub fn compile(&self) -> Regex {
        compile(self.pattern)
    }
}

/// Compile a pattern case-insensitively.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Every table entry is compiled by the
/// tests in this module.
#[must_use]
pub fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("invalid pattern table entry")
}

// Node dashboard

pub const NODE_TOTAL_COMPUTE_LABEL: &str = "Total Compute Power";
pub const NODE_LABEL_SELECTOR: &str = r#"[data-value="Total Compute Power"]"#;
pub const NODE_CARD_SELECTOR: &str = r#"div[class*="bg-base-100"]"#;
pub const NODE_FALLBACK_CARD_SELECTOR: &str = "div";
pub const NODE_VALUE_SELECTOR: &str = "h6 [data-value]";
pub const NODE_VALUE_ATTRIBUTE: &str = "data-value";

pub const NODE_VALIDATORS: ProximityRule = ProximityRule {
    field: "validators",
    label: r"Validators|Валидатор\w*",
    value: r"\d{1,8}",
    window: 120,
};

pub const NODE_NEXT_ROUND_ETA: ProximityRule = ProximityRule {
    field: "next_round_eta",
    label: r"Next\s*PoC",
    value: r"\d+\s*h\s*\d+\s*m\s*\d+\s*s",
    window: 200,
};

// Invite-community stats

pub const COMMUNITY_ONLINE: CaptureRule = CaptureRule {
    field: "online_count",
    pattern: r"(\d[\d\s\x{00a0}.,]*)\s*(?:в\s*сети|online)",
};

pub const COMMUNITY_MEMBERS: CaptureRule = CaptureRule {
    field: "member_count",
    pattern: r"(\d[\d\s\x{00a0}.,]*)\s*(?:участник\w*|members?)",
};

// Social follower count, in priority order

pub const FOLLOWER_CHAIN: [CaptureRule; 3] = [
    CaptureRule {
        field: "follower_count",
        pattern: r"(\d[\d\s.,]*\s*(?:тыс\.?|k|m)?)\s*(?:читател\w+|followers?)",
    },
    CaptureRule {
        field: "follower_count",
        pattern: r"verified_followers[^<]{0,500}?>(\d[\d\s.,\x{00a0}]*\s*(?:тыс\.?|k|m)?)<",
    },
    CaptureRule {
        field: "follower_count",
        pattern: r"followers_count\D{0,20}(\d[\d\s.,]*)",
    },
];

// Repository stars

pub const STAR_SELECTORS: [&str; 3] = [
    r#"a[href$="/stargazers"] span.Counter"#,
    r#"a[href$="/stargazers"] strong"#,
    r#"a[href$="/stargazers"]"#,
];

pub const STAR_DIGITS: &str = r"\d[\d\s.,kKmM]*";

pub const STAR_TEXT: CaptureRule = CaptureRule {
    field: "star_count",
    pattern: r"(\d[\d\s.,kKmM]*)\s*stars?",
};

// Exchange price, in priority order

pub const PRICE_CHAIN: [CaptureRule; 3] = [
    CaptureRule {
        field: "price",
        pattern: r"(?:Sell\s*Price|Цена\s*продажи)\s*[:]?\s*\$?\s*(\d+(?:[.,]\d+)*)",
    },
    CaptureRule {
        field: "price",
        pattern: r"(?:Buy\s*Price|Цена\s*покупки)\s*[:]?\s*\$?\s*(\d+(?:[.,]\d+)*)",
    },
    CaptureRule {
        field: "price",
        pattern: r"\$\s*(\d+(?:[.,]\d+)*)",
    },
];

/// Buttons a browser-backed fetcher should try to click before the price page is read.
pub const PRICE_OVERLAY_SELECTORS: [&str; 6] = [
    "button:has-text('Close')",
    "button:has-text('Закрыть')",
    "button:has-text('Понятно')",
    "button:has-text('OK')",
    "button:has-text('Принять')",
    "[aria-label='Close']",
];
