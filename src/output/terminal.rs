//! Terminal output with colors.
//!
//! Every renderer returns a `String` so it can be tested; the binary prints
//! it.

use crate::models::{AddressTypeInfo, PrefixRange};
use crate::processing::{
    ContainmentCheck, GroupInfo, NetworkNeighbours, PlanFinding, PrefixCoverage, ReverseDns,
    Scenario, Severity, SubnetList, SubprefixWindow,
};
use colored::Colorize;

/// Format a label right-aligned to `width`, followed by its value.
///
/// # Arguments
/// * `label` - The label
/// * `value` - The value to print after the label
/// * `width` - The minimum width of the label column
pub fn format_row<T: ToString>(label: &str, value: T, width: usize) -> String {
    let label = format!("{label}:");
    format!("{label:>width$} {}", value.to_string())
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn row<T: ToString>(out: &mut String, label: &str, value: T) {
    push_line(out, &format_row(label, value, 18));
}

fn or_edge(value: &Option<String>, edge: &str) -> String {
    match value {
        Some(v) => v.green().to_string(),
        None => edge.dimmed().to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value {
        "true".green().to_string()
    } else {
        "false".red().to_string()
    }
}

/// Address type, expanded and compressed form.
pub fn render_address(expanded: &str, compressed: &str, kind: &AddressTypeInfo) -> String {
    let mut out = String::new();
    row(&mut out, "expanded", expanded);
    row(&mut out, "compressed", compressed.bold());
    row(&mut out, "type", format!("{} ({})", kind.kind, kind.label));
    out
}

/// Network, first and last address of a prefix.
pub fn render_range(range: &PrefixRange, prefix_len: u8) -> String {
    let mut out = String::new();
    row(&mut out, "network", format!("{}/{prefix_len}", range.network));
    row(&mut out, "first", &range.first);
    row(&mut out, "last", &range.last);
    out
}

/// First children of a split, an ellipsis and the last child.
pub fn render_subnet_list(list: &SubnetList) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!(
            "{} subnets of /{}",
            list.total.to_string().bold(),
            list.new_prefix_len
        ),
    );
    for (i, s) in list.subnets.iter().enumerate() {
        push_line(&mut out, &format!("{i:>8}  {}", s.cidr.green()));
    }
    if let Some(last) = &list.last {
        push_line(&mut out, &format!("{:>8}", "...".dimmed()));
        push_line(&mut out, &format!("{:>8}  {}", "last", last.cidr.green()));
    }
    out
}

/// One page of an enumeration.
pub fn render_window(window: &SubprefixWindow) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!(
            "/{} -> /{}: {} subnets, offset {}, limit {}",
            window.parent_prefix_len,
            window.target_prefix,
            window.total.to_string().bold(),
            window.offset,
            window.limit
        ),
    );
    if window.subnets.is_empty() {
        push_line(&mut out, &"(offset past the last subnet)".dimmed().to_string());
    }
    for s in &window.subnets {
        push_line(
            &mut out,
            &format!("{:>8}  {}", s.index, s.subnet.cidr.green()),
        );
    }
    out
}

pub fn render_containment(check: &ContainmentCheck) -> String {
    let mut out = String::new();
    row(&mut out, "A", &check.a_normalized);
    row(&mut out, "B", &check.b_normalized);
    row(&mut out, "A_in_B", yes_no(check.a_in_b));
    let overlap = match check.overlap {
        Some(o) => yes_no(o),
        None => "n/a (A is an address)".dimmed().to_string(),
    };
    row(&mut out, "overlap", overlap);
    out
}

pub fn render_reverse(rdns: &ReverseDns) -> String {
    let mut out = String::new();
    row(&mut out, "ip6ArpaFull", &rdns.ip6_arpa_full);
    match (&rdns.ip6_arpa_bis_prefix, rdns.effective_prefix) {
        (Some(cut), Some(effective)) => {
            row(&mut out, "ip6ArpaBisPrefix", cut.green());
            row(&mut out, "effectivePrefix", format!("/{effective}"));
        }
        _ => row(&mut out, "ip6ArpaBisPrefix", "n/a (no prefix)".dimmed()),
    }
    out
}

pub fn render_neighbours(n: &NetworkNeighbours) -> String {
    let mut out = String::new();
    row(&mut out, "basePrefix", n.base_prefix.bold());
    row(
        &mut out,
        "blockSize",
        format!("{} (2^{} addresses)", n.block_size, 128 - u16::from(n.prefix_len)),
    );
    row(
        &mut out,
        "nextPrefix",
        or_edge(&n.next_prefix, "none (top of the address space)"),
    );
    row(
        &mut out,
        "previousPrefix",
        or_edge(&n.previous_prefix, "none (bottom of the address space)"),
    );
    out
}

/// Groups with prefix coverage; covered groups in green, partial in yellow.
pub fn render_groups(groups: &[GroupInfo]) -> String {
    groups
        .iter()
        .map(|g| {
            let hex = match g.in_prefix {
                PrefixCoverage::Full => g.hex.green(),
                PrefixCoverage::Partial => g.hex.yellow(),
                PrefixCoverage::None => g.hex.normal(),
            };
            format!(
                "{:>2} [{:>3}..{:>3}) {} {}\n",
                g.group_index, g.group_start, g.group_end, hex, g.bits
            )
        })
        .collect()
}

pub fn render_scenario(s: &Scenario) -> String {
    let mut out = String::new();
    row(&mut out, "seed", s.seed);
    row(&mut out, "parent", s.parent.bold());
    row(&mut out, "sites", s.sites);
    row(&mut out, "vlans per site", s.vlans);
    row(
        &mut out,
        "solution",
        format!("/{} sites, /{} VLANs", s.site_prefix_len, s.vlan_prefix_len),
    );
    for ex in &s.site_examples {
        push_line(
            &mut out,
            &format!("{:>18} {} -> {}", "", ex.site.cidr, ex.vlan.cidr.green()),
        );
    }
    out
}

pub fn render_findings(findings: &[PlanFinding]) -> String {
    findings
        .iter()
        .map(|f| {
            let tag = match f.severity {
                Severity::Error => "ERROR".on_red().to_string(),
                Severity::Warn => "WARN".yellow().to_string(),
                Severity::Ok => "OK".green().to_string(),
            };
            format!("{tag} {}\n", f.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{
        containment_overlap_check, list_subnets, next_previous_network, reverse_dns_ip6_arpa,
    };

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row("type", "gua", 10), "     type: gua");
        assert_eq!(format_row("compressed", "::1", 5), "compressed: ::1");
        assert_eq!(format_row("len", 48, 6), "  len: 48");
    }

    #[test]
    fn test_render_subnet_list() {
        plain();
        let text = render_subnet_list(&list_subnets("2001:db8::/48", 8, 2).unwrap());
        assert!(text.starts_with("256 subnets of /56"));
        assert!(text.contains("       1  2001:db8:0:100::/56"));
        assert!(text.contains("    last  2001:db8:0:ff00::/56"));
    }

    #[test]
    fn test_render_containment() {
        plain();
        let text =
            render_containment(&containment_overlap_check("2001:db8::1", "2001:db8::/48").unwrap());
        assert!(text.contains("A_in_B: true"));
        assert!(text.contains("overlap: n/a (A is an address)"));
    }

    #[test]
    fn test_render_groups_one_line_per_group() {
        plain();
        let text = render_groups(&crate::processing::group_info("2001:db8::1", 48).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], " 0 [  0.. 16) 2001 0010000000000001");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_reverse_and_neighbours() {
        plain();
        let text = render_reverse(&reverse_dns_ip6_arpa("2001:db8::1", Some(30)).unwrap());
        assert!(text.contains("effectivePrefix: /32"));
        let text = render_neighbours(&next_previous_network("::/64", 1).unwrap());
        assert!(text.contains("previousPrefix: none (bottom of the address space)"));
        assert!(text.contains("(2^64 addresses)"));
    }
}
