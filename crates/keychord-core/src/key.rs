// Keychord Key Name Tables
// Canonical names for special keys and the US-layout shift pairs

/// Numpad digit names for codes 96..=105.
const NUMPAD_DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Function key names for codes 112..=123.
const FUNCTION_KEYS: [&str; 12] = [
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

/// Canonical name for a "special" (non-printable or navigation/function) key
/// code as reported by keydown events.
///
/// Returns `None` for codes with no special name; that simply means the
/// lookup does not apply, never an error.
pub fn special_key_name(code: u16) -> Option<&'static str> {
    let name = match code {
        8 => "backspace",
        9 => "tab",
        13 => "return",
        16 => "shift",
        17 => "ctrl",
        18 => "alt",
        19 => "pause",
        20 => "capslock",
        27 => "esc",
        32 => "space",
        33 => "pageup",
        34 => "pagedown",
        35 => "end",
        36 => "home",
        37 => "left",
        38 => "up",
        39 => "right",
        40 => "down",
        45 => "insert",
        46 => "del",
        96..=105 => NUMPAD_DIGITS[usize::from(code - 96)],
        106 => "*",
        107 => "+",
        109 => "-",
        110 => ".",
        111 => "/",
        112..=123 => FUNCTION_KEYS[usize::from(code - 112)],
        144 => "numlock",
        145 => "scroll",
        188 => ",",
        190 => ".",
        191 => "/",
        224 => "meta",
        _ => return None,
    };
    Some(name)
}

/// The symbol produced when `ch` is typed with shift held, for the fixed set
/// of US-keyboard shift pairs (digits, backtick, hyphen, equals, semicolon,
/// quote, comma, period, slash, backslash).
///
/// This is what lets a combo be written either as `"shift+4"` or as `"$"`.
pub fn shifted_symbol(ch: char) -> Option<char> {
    let sym = match ch {
        '`' => '~',
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '\\' => '|',
        _ => return None,
    };
    Some(sym)
}

/// Lowercase printable character for an event code, if the code is a valid
/// non-control scalar value. Keypress codes are character codes; keydown
/// letter codes are the uppercase ASCII letters, so both end up lowercase.
pub fn printable_char(code: u16) -> Option<char> {
    char::from_u32(u32::from(code))
        .filter(|c| !c.is_control())
        .map(|c| c.to_ascii_lowercase())
}
