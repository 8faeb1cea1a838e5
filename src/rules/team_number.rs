// Team-number resolution from display names.

/// Extract a team's ordinal strength number (1 = strongest) from its
/// display name.
///
/// Recognized shapes, tried in order:
/// 1. A number immediately following the club-name token, optionally
///    parenthesized: `"Riverside TT 3"`, `"Riverside TT (3)"`.
/// 2. The first standalone integer anywhere in the name (digit run not
///    glued to letters, so `"U15"` does not count): `"Entente 2"`.
///
/// Returns 0 when no number is found. 0 marks a rule-exempt team (friendly
/// or non-ranked squads) and bypasses every lock/quota check downstream.
pub fn strength_number(display_name: &str, club_token: &str) -> u32 {
    if let Some(n) = number_after_token(display_name, club_token) {
        return n;
    }
    first_standalone_number(display_name).unwrap_or(0)
}

/// Number directly after the club token, case-insensitive, allowing
/// `Token 3`, `Token (3)`, and `Token3`.
fn number_after_token(name: &str, token: &str) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    let lower_name = name.to_lowercase();
    let lower_token = token.to_lowercase();
    let start = lower_name.find(&lower_token)? + lower_token.len();
    // `find` on the lowercased string: ASCII club tokens keep byte offsets
    // stable; non-ASCII tokens fall back to the standalone scan.
    let rest = name.get(start..)?;

    let mut chars = rest.chars().peekable();
    while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
        chars.next();
    }
    if matches!(chars.peek(), Some('(')) {
        chars.next();
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
    }
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// First maximal digit run whose neighbours are not alphanumeric.
fn first_standalone_number(name: &str) -> Option<u32> {
    let chars: Vec<char> = name.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let before_ok = start == 0 || !chars[start - 1].is_alphanumeric();
            let after_ok = i == chars.len() || !chars[i].is_alphanumeric();
            if before_ok && after_ok {
                let digits: String = chars[start..i].iter().collect();
                if let Ok(n) = digits.parse() {
                    return Some(n);
                }
            }
        } else {
            i += 1;
        }
    }
    None
}
