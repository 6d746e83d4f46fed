use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 50;

const ID_LENGTH: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script pattern"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("style pattern"));
// 只有緊接標籤名稱、`/` 或 `!` 的 `<` 才算標籤；"a < b" 保留為文字
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</?[A-Za-z!][^>]*>").expect("tag pattern"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").expect("entity pattern")
});

const NAMED_ENTITIES: [(&str, &str); 24] = [
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("laquo", "«"),
    ("raquo", "»"),
    ("bdquo", "„"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("minus", "\u{2212}"),
    ("hellip", "…"),
    ("copy", "©"),
    ("reg", "®"),
    ("trade", "™"),
    ("deg", "°"),
    ("times", "×"),
    ("euro", "€"),
    ("numero", "№"),
];

/// 依字元數截斷，超出時附加 "..."
pub fn truncate(s: &str, length: usize) -> String {
    match s.char_indices().nth(length) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// 首字大寫，其餘小寫
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Formats a Russian phone number as `+7 (XXX) XXX-XX-XX`.
///
/// Accepts 11 digits with a leading 7 or a bare 10-digit number; anything else
/// comes back untouched.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.len() {
        11 if digits.starts_with('7') => &digits[1..],
        10 => digits.as_str(),
        _ => return phone.to_string(),
    };

    format!(
        "+7 ({}) {}-{}-{}",
        &local[0..3],
        &local[3..6],
        &local[6..8],
        &local[8..10]
    )
}

pub fn generate_id(prefix: &str) -> String {
    let mut value = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_LENGTH);
    for _ in 0..ID_LENGTH {
        suffix.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    format!("{}_{}", prefix, suffix)
}

/// Reduces an HTML fragment to its text content.
pub fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let text = TAG_RE.replace_all(&without_styles, "");

    ENTITY_RE
        .replace_all(&text, |caps: &regex::Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Unknown named entities yield `None` and are left as written.
fn decode_entity(entity: &str) -> Option<String> {
    let code_point = if let Some(hex) = entity.strip_prefix("#x").or(entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()
    } else {
        None
    };

    if let Some(cp) = code_point {
        return Some(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER).to_string());
    }

    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, text)| text.to_string())
}
