//! Column classes for laying out a field in a form grid.

/// CSS classes for the whole field, its label and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub field: String,
    pub label: String,
    pub value: String,
}

const SIZES: [&str; 3] = ["small", "medium", "large"];
const LABEL_UNITS: [u32; 3] = [12, 2, 2];

impl Placement {
    /// Parse a descriptor such as `small:0,12;medium:0,4right`.
    ///
    /// Segments are `size:offset,width` with an optional `right` suffix.
    /// Parsing stops at the first malformed segment.
    pub fn parse(descriptor: &str) -> Placement {
        let mut field = [Some(12), None, None];
        let mut label = [Some(12), Some(2), None];
        let mut value = [Some(12), Some(10), None];
        let mut right = false;
        for segment in descriptor.split(';').map(str::trim) {
            let Some((size, width, is_right)) = parse_segment(segment) else {
                break;
            };
            let label_width = (LABEL_UNITS[size] * (12 / width)).min(12);
            field[size] = Some(width);
            label[size] = Some(label_width);
            value[size] = Some(if label_width >= 12 { 12 } else { 12 - label_width });
            right = is_right;
        }
        Placement {
            field: format_classes(field, right),
            label: format_classes(label, false),
            value: format_classes(value, false),
        }
    }
}

fn parse_segment(segment: &str) -> Option<(usize, u32, bool)> {
    let (size, rest) = segment.split_once(':')?;
    let size = SIZES.iter().position(|s| *s == size)?;
    let (rest, right) = match rest.strip_suffix("right") {
        Some(rest) => (rest, true),
        None => (rest, false),
    };
    let (offset, width) = rest.split_once(',')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(offset) || !all_digits(width) {
        return None;
    }
    let width: u32 = width.parse().ok()?;
    if width == 0 {
        return None;
    }
    Some((size, width, right))
}

/// Larger sizes repeating the width of the previous one are left out.
fn format_classes(widths: [Option<u32>; 3], right: bool) -> String {
    let mut classes = vec![];
    let mut prev = None;
    for (size, width) in SIZES.iter().zip(widths) {
        let Some(width) = width else { continue };
        if prev == Some(width) {
            continue;
        }
        classes.push(format!("{size}-{width}"));
        prev = Some(width);
    }
    if right {
        classes.push("right".to_owned());
    }
    classes.push("columns".to_owned());
    classes.join(" ")
}
