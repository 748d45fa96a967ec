//! Field name conversions between the wire (lowerCamelCase, kebab-case) and Rust
//! (snake_case) conventions.

/// `nextTxnId` -> `next_txn_id`, `latNW` -> `lat_nw`, `ttp-groups` -> `ttp_groups`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = if i > 0 { chars.get(i - 1) } else { None };
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // 縮寫結尾，例如 "HTTPStatus" 的 'S'
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// `birth_date` -> `birthDate`.
pub fn to_lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for c in name.chars() {
        if c == '_' || c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("terminalId"), "terminal_id");
        assert_eq!(to_snake_case("nextTxnDate"), "next_txn_date");
        assert_eq!(to_snake_case("latNW"), "lat_nw");
        assert_eq!(to_snake_case("ttp-groups"), "ttp_groups");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("type"), "type");
    }

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("birth_date"), "birthDate");
        assert_eq!(to_lower_camel_case("middle_name"), "middleName");
        assert_eq!(to_lower_camel_case("inn"), "inn");
    }

    #[test]
    fn test_snake_then_camel_restores_wire_name() {
        for wire in ["firstName", "withdrawToEnrollmentRate", "snils"] {
            assert_eq!(to_lower_camel_case(&to_snake_case(wire)), wire);
        }
    }
}
