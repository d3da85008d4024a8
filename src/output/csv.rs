//! CSV output for subnet listings.

use crate::processing::{SubnetList, Subprefix, SubprefixWindow};

/// Format a value as a quoted, right-aligned field.
///
/// Embedded double quotes are doubled.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string().replace('"', "\"\""));
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

const HEADER: &str = r#"   "index",                          "cidr",                                       "cidrFull","prefixLen""#;

fn csv_row(out: &mut String, index: impl ToString, s: &Subprefix) {
    out.push_str(&format!(
        "{index},{cidr},{cidr_full},{len}\n",
        index = format_field(index, 10),
        cidr = format_field(&s.cidr, 32),
        cidr_full = format_field(&s.cidr_full, 47),
        len = format_field(s.prefix_len, 11),
    ));
}

/// One row per subnet of an enumeration page.
pub fn window_csv(window: &SubprefixWindow) -> String {
    let mut out = format!("{HEADER}\n");
    for s in &window.subnets {
        csv_row(&mut out, s.index, &s.subnet);
    }
    out
}

/// The shown subnets of a split, then the last one with index `total - 1`.
pub fn subnet_list_csv(list: &SubnetList) -> String {
    let mut out = format!("{HEADER}\n");
    for (i, s) in list.subnets.iter().enumerate() {
        csv_row(&mut out, i, s);
    }
    if let Some(last) = &list.last {
        csv_row(&mut out, list.total.clone() - 1u32, last);
    }
    out
}
