//! Runs one CLI command and renders its result.

use crate::config::{Commands, OutputFormat};
use crate::models::{compress, compress_u128, expand, get_address_type, to_u128, Ipv6Prefix};
use crate::output::{
    format_row, render_address, render_containment, render_findings, render_groups,
    render_neighbours, render_range, render_reverse, render_scenario, render_subnet_list,
    render_window, subnet_list_csv, window_csv,
};
use crate::processing::{
    address_count_for_prefix, bits_for_subnet_count, containment_overlap_check,
    enumerate_subprefixes, generate_scenario, group_info, list_subnets, next_previous_network,
    reverse_dns_ip6_arpa, subnet_count_between, validate_user_plan,
};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use std::error::Error;

type CmdResult = Result<String, Box<dyn Error>>;

fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> CmdResult {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
        OutputFormat::Text | OutputFormat::Csv => Ok(text(value)),
    }
}

/// Execute `command` and return what should be printed to stdout.
pub fn run(command: &Commands, format: OutputFormat) -> CmdResult {
    log::debug!("run({command:?}, {format:?})");
    match command {
        Commands::Expand { address } => {
            let expanded = expand(address)?;
            emit(&json!({ "expanded": expanded }), format, |_| format!("{expanded}\n"))
        }
        Commands::Compress { address } => {
            let compressed = compress(address)?;
            emit(&json!({ "compressed": compressed }), format, |_| {
                format!("{compressed}\n")
            })
        }
        Commands::Info { input } => info(input, format),
        Commands::Range { cidr } => {
            let prefix = Ipv6Prefix::new(cidr)?;
            emit(&prefix.range(), format, |r| render_range(r, prefix.len))
        }
        Commands::Subnets {
            cidr,
            add_bits,
            show,
        } => {
            let list = list_subnets(cidr, *add_bits, *show)?;
            match format {
                OutputFormat::Csv => Ok(subnet_list_csv(&list)),
                _ => emit(&list, format, render_subnet_list),
            }
        }
        Commands::Enumerate {
            cidr,
            target,
            offset,
            limit,
        } => {
            let window = enumerate_subprefixes(cidr, *target, *offset, *limit)?;
            match format {
                OutputFormat::Csv => Ok(window_csv(&window)),
                _ => emit(&window, format, render_window),
            }
        }
        Commands::Count { len, new_len } => match new_len {
            None => {
                let count = address_count_for_prefix(*len)?.to_string();
                emit(
                    &json!({ "prefixLen": len, "addressCount": count }),
                    format,
                    |_| format!("{}\n", format_row(&format!("addresses in /{len}"), &count, 18)),
                )
            }
            Some(new_len) => {
                let count = subnet_count_between(*len, *new_len)?.to_string();
                emit(
                    &json!({ "oldLen": len, "newLen": new_len, "subnetCount": count }),
                    format,
                    |_| {
                        format!(
                            "{}\n",
                            format_row(&format!("/{new_len} in /{len}"), &count, 18)
                        )
                    },
                )
            }
        },
        Commands::Bits { needed } => {
            let bits = bits_for_subnet_count(*needed)?;
            emit(
                &json!({ "needed": needed.to_string(), "bits": bits }),
                format,
                |_| format!("{}\n", format_row(&format!("bits for {needed}"), bits, 18)),
            )
        }
        Commands::Contains { a, b } => {
            let check = containment_overlap_check(a, b)?;
            emit(&check, format, render_containment)
        }
        Commands::Reverse { address, prefix } => {
            let rdns = reverse_dns_ip6_arpa(address, *prefix)?;
            emit(&rdns, format, render_reverse)
        }
        Commands::Navigate { cidr, steps } => {
            let neighbours = next_previous_network(cidr, *steps)?;
            emit(&neighbours, format, render_neighbours)
        }
        Commands::Groups { address, prefix } => {
            let groups = group_info(address, *prefix)?;
            emit(&groups, format, |g| render_groups(g))
        }
        Commands::Scenario { seed, site, vlan } => {
            let scenario = generate_scenario(*seed)?;
            match (site, vlan) {
                (Some(site), Some(vlan)) => {
                    let findings = validate_user_plan(&scenario, *site, *vlan);
                    emit(
                        &json!({ "scenario": scenario, "findings": findings }),
                        format,
                        |_| render_scenario(&scenario) + &render_findings(&findings),
                    )
                }
                _ => emit(&scenario, format, render_scenario),
            }
        }
    }
}

/// `info` accepts a bare address or `address/len`.
fn info(input: &str, format: OutputFormat) -> CmdResult {
    let (address, prefix) = match input.split_once('/') {
        Some(_) => {
            let prefix = Ipv6Prefix::new(input)?;
            (compress_u128(prefix.addr), Some(prefix))
        }
        None => (input.trim().to_string(), None),
    };
    let expanded = expand(&address)?;
    let compressed = compress(&address)?;
    let kind = get_address_type(&address)?;
    let range = prefix.map(|p| p.range());
    let address_count = prefix
        .map(|p| address_count_for_prefix(p.len))
        .transpose()?
        .map(|c| c.to_string());
    let reverse = reverse_dns_ip6_arpa(&address, prefix.map(|p| p.len))?;
    log::trace!("info({input}) = {:#x}", to_u128(&address)?);

    let value = json!({
        "expanded": expanded,
        "compressed": compressed,
        "type": kind,
        "range": range,
        "addressCount": address_count,
        "reverse": reverse,
    });
    emit(&value, format, |_| {
        let mut out = render_address(&expanded, &compressed, &kind);
        if let (Some(range), Some(p), Some(count)) = (&range, prefix, &address_count) {
            out += &render_range(range, p.len);
            out += &format!("{}\n", format_row("addresses", count.bold(), 18));
        }
        out + &render_reverse(&reverse)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(command: Commands) -> String {
        colored::control::set_override(false);
        run(&command, OutputFormat::Text).unwrap()
    }

    fn json(command: Commands) -> serde_json::Value {
        serde_json::from_str(&run(&command, OutputFormat::Json).unwrap()).unwrap()
    }

    #[test]
    fn test_expand_and_compress() {
        assert_eq!(
            text(Commands::Expand {
                address: "2001:db8::1".to_string()
            }),
            "2001:0db8:0000:0000:0000:0000:0000:0001\n"
        );
        assert_eq!(
            json(Commands::Compress {
                address: "2001:0db8:0000:0000:0000:0000:0000:0001".to_string()
            })["compressed"],
            "2001:db8::1"
        );
    }

    #[test]
    fn test_info_prefix() {
        let value = json(Commands::Info {
            input: "fd00:1234::42/48".to_string(),
        });
        assert_eq!(value["type"]["type"], "ula");
        assert_eq!(
            value["range"]["network"],
            "fd00:1234:0000:0000:0000:0000:0000:0000"
        );
        assert_eq!(
            value["range"]["last"],
            "fd00:1234:0000:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(value["addressCount"], "1208925819614629174706176");
        assert_eq!(value["reverse"]["effectivePrefix"], 48);
    }

    #[test]
    fn test_range_uses_network_of_cidr() {
        let value = json(Commands::Range {
            cidr: "2001:db8:0:1234::99/56".to_string(),
        });
        assert_eq!(value["network"], "2001:0db8:0000:1200:0000:0000:0000:0000");
        assert_eq!(value["first"], value["network"]);
        assert_eq!(value["last"], "2001:0db8:0000:12ff:ffff:ffff:ffff:ffff");

        let all = json(Commands::Range {
            cidr: "::/0".to_string(),
        });
        assert_eq!(all["last"], "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_info_address() {
        let value = json(Commands::Info {
            input: "::1".to_string(),
        });
        assert_eq!(value["type"]["type"], "loopback");
        assert!(value["range"].is_null());
        assert!(value["reverse"]["ip6ArpaBisPrefix"].is_null());
    }

    #[test]
    fn test_count_and_bits() {
        assert_eq!(
            json(Commands::Count {
                len: 48,
                new_len: Some(64)
            })["subnetCount"],
            "65536"
        );
        assert_eq!(json(Commands::Bits { needed: 13 })["bits"], 4);
        assert!(text(Commands::Count {
            len: 0,
            new_len: None
        })
        .contains("340282366920938463463374607431768211456"));
    }

    #[test]
    fn test_csv_only_for_listings() {
        let csv = run(
            &Commands::Enumerate {
                cidr: "2001:db8::/48".to_string(),
                target: 50,
                offset: 0,
                limit: 16,
            },
            OutputFormat::Csv,
        )
        .unwrap();
        assert_eq!(csv.lines().count(), 5);

        colored::control::set_override(false);
        let fallback = run(
            &Commands::Navigate {
                cidr: "2001:db8::/64".to_string(),
                steps: 1,
            },
            OutputFormat::Csv,
        )
        .unwrap();
        assert!(fallback.contains("nextPrefix: 2001:db8:0:1::/64"));
    }

    #[test]
    fn test_scenario_with_plan() {
        let value = json(Commands::Scenario {
            seed: 3,
            site: Some(40),
            vlan: Some(44),
        });
        assert_eq!(value["scenario"]["seed"], 3);
        assert_eq!(value["findings"][0]["type"], "error");
    }

    #[test]
    fn test_errors_propagate() {
        let err = run(
            &Commands::Subnets {
                cidr: "2001:db8::/120".to_string(),
                add_bits: 16,
                show: 4,
            },
            OutputFormat::Text,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Resulting prefix length /136 > /128");
    }
}
