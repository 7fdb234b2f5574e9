//! Message pools, gibberish bodies and body transforms
//!
//! Pure helpers driven entirely by the injected random source.

use chrono::Utc;
use domain::{BodyTransform, GibberishFormat};

use crate::ports::{RandomSource, RandomSourceExt};

/// Filler appended by response inflation
pub const PADDING_UNIT: &str = "CHAOS_MONKEY_PADDING_";

const MONKEY_WORDS: [&str; 8] = [
    "OOGA",
    "BOOGA",
    "BANANA",
    "CHAOS",
    "MONKEY",
    "MAYHEM",
    "HAVOC",
    "PANDEMONIUM",
];

const GENERIC_MESSAGES: &[&str] = &[
    "Unknown chaos error! 🐒❓",
    "Something went bananas and nobody knows why",
];

/// Message pool for a status code, falling back to the generic pool
#[must_use]
pub fn messages_for(status_code: u16) -> &'static [&'static str] {
    match status_code {
        400 => &[
            "Bad Request - The monkey scribbled on your payload! 🐒✏️",
            "Request rejected by a very picky monkey",
            "The monkey could not read your handwriting",
        ],
        401 => &[
            "Unauthorized - The monkey lost your keys! 🐒🔑",
            "Who are you? The monkey forgot",
            "Credentials eaten along with a banana",
        ],
        403 => &[
            "Forbidden - The monkey guards this door! 🐒🚫",
            "No bananas for you",
            "Access denied by monkey decree",
        ],
        404 => &[
            "Not Found - The monkey hid it somewhere! 🐒🙈",
            "The monkey swears it was here a second ago",
            "Resource buried under banana peels",
        ],
        429 => &[
            "Too Many Requests - The monkey is tired! 😴",
            "Rate limit exceeded by monkey business!",
            "Slow down, the monkey can't keep up!",
        ],
        500 => &[
            "Internal Server Error - The monkey broke something! 🐒💥",
            "Server meltdown courtesy of Chaos Monkey!",
            "OOPS! The monkey pressed the wrong button!",
        ],
        502 => &[
            "Bad Gateway - The monkey ate the router! 🐒🔌",
            "Gateway got monkey-slapped!",
            "Network chaos initiated!",
        ],
        503 => &[
            "Service Unavailable - Monkey is taking a banana break! 🍌",
            "The monkeys are on strike!",
            "Service temporarily monkeyed with!",
        ],
        504 => &[
            "Gateway Timeout - The monkey fell asleep upstream! 🐒💤",
            "Upstream is swinging through the trees, try later",
            "The monkey waited, then gave up",
        ],
        _ => GENERIC_MESSAGES,
    }
}

/// Draw a message for `status_code`
#[must_use]
pub fn error_message(status_code: u16, random: &dyn RandomSource) -> String {
    let pool = messages_for(status_code);
    pool.get(random.pick_index(pool.len()))
        .copied()
        .unwrap_or(GENERIC_MESSAGES[0])
        .to_string()
}

fn monkey_word(random: &dyn RandomSource) -> &'static str {
    MONKEY_WORDS[random.pick_index(MONKEY_WORDS.len())]
}

/// Synthesize a body for the given gibberish format
#[must_use]
pub fn gibberish_body(format: GibberishFormat, random: &dyn RandomSource) -> String {
    match format {
        GibberishFormat::Json => {
            let banana_count = random.range_inclusive(1, 5);
            let bananas: Vec<&str> = (0..banana_count).map(|_| monkey_word(random)).collect();
            let value = serde_json::json!({
                "chaos": true,
                "message": format!("{} {}", monkey_word(random), monkey_word(random)),
                "monkeyLevel": random.range_inclusive(0, 99),
                "bananas": bananas,
                "timestamp": Utc::now().to_rfc3339(),
                "warning": "This response has been monkey-fied! 🐒",
            });
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        },
        GibberishFormat::Html => format!(
            "<!DOCTYPE html>\n\
             <html><head><title>Chaos Monkey Strike!</title></head>\n\
             <body style=\"background: #ff6b6b; color: white; text-align: center; padding: 50px;\">\n  \
             <h1>🐒 {} {}! 🐒</h1>\n  \
             <p>Your request has been monkey-fied!</p>\n  \
             <p>Chaos Level: {}%</p>\n\
             </body></html>",
            monkey_word(random),
            monkey_word(random),
            random.range_inclusive(0, 99)
        ),
        GibberishFormat::Text => format!(
            "{} {}! The Chaos Monkey has struck! 🐒💥",
            monkey_word(random),
            monkey_word(random)
        ),
    }
}

/// Replace roughly `rate` of the characters with random printable ASCII
///
/// UTF-8 bodies stay valid UTF-8. Other bodies are corrupted byte by byte.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn corrupt_body(body: &[u8], rate: f64, random: &dyn RandomSource) -> Vec<u8> {
    let replacement = || random.range_inclusive(33, 126) as u8;
    match std::str::from_utf8(body) {
        Ok(text) => text
            .chars()
            .map(|ch| {
                if random.next_f64() < rate {
                    char::from(replacement())
                } else {
                    ch
                }
            })
            .collect::<String>()
            .into_bytes(),
        Err(_) => body
            .iter()
            .map(|&byte| {
                if random.next_f64() < rate {
                    replacement()
                } else {
                    byte
                }
            })
            .collect(),
    }
}

/// Append `padding_bytes` of filler after a blank line
#[must_use]
pub fn inflate_body(body: &[u8], padding_bytes: usize) -> Vec<u8> {
    let mut inflated = Vec::with_capacity(body.len() + padding_bytes + 2);
    inflated.extend_from_slice(body);
    inflated.extend_from_slice(b"\n\n");
    inflated.extend(PADDING_UNIT.bytes().cycle().take(padding_bytes));
    inflated
}

/// Apply a body transform
#[must_use]
pub fn apply_transform(
    body: &[u8],
    transform: BodyTransform,
    random: &dyn RandomSource,
) -> Vec<u8> {
    match transform {
        BodyTransform::Corrupt { rate } => corrupt_body(body, rate, random),
        BodyTransform::Inflate { padding_bytes } => inflate_body(body, padding_bytes),
    }
}
