use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compares two strings the way a person would sort them: runs of digits
/// compare by numeric value, everything else case-insensitively.
///
/// | a        | b        | result  |
/// |----------|----------|---------|
/// | `iOS 9`  | `iOS 17` | Less    |
/// | `iOS 17` | `ios 17` | Less    |
/// | `iOS 16` | `iOS 16` | Equal   |
///
/// Strings that only differ in case or leading zeros fall back to a plain
/// byte comparison so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ord = compare_numbers(&digit_run(&mut left), &digit_run(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

/// Descending natural order, newest release first.
pub fn natural_cmp_desc(a: &str, b: &str) -> Ordering {
    natural_cmp(b, a)
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
