//! Reproducible address planning exercises.
//!
//! A seed picks a /48 parent, a number of sites and a number of VLANs per
//! site. The same seed always gives the same scenario. A user plan (site and
//! VLAN prefix lengths) is then checked against it.

use super::subnetting::{bits_for_subnet_count, subprefix, Subprefix};
use crate::error::Result;
use crate::models::is_nibble_boundary;
use serde::Serialize;

/// Parent prefix length of every scenario.
pub const PARENT_PREFIX_LEN: u8 = 48;

/// Linear congruential generator, 32-bit state.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seed 0 behaves like seed 1.
    pub fn new(seed: u32) -> Self {
        Lcg {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        f64::from(self.state) / 4_294_967_296.0
    }

    /// Uniform integer in `min..=max`.
    pub fn rand_int(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max - min + 1);
        min + (self.next_f64() * span).floor() as u32
    }
}

/// First site of a scenario with its first VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteExample {
    pub site: Subprefix,
    pub vlan: Subprefix,
}

/// A generated planning exercise with its model solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub seed: u32,
    pub parent: String,
    pub sites: u32,
    pub vlans: u32,
    pub site_bits: u8,
    pub vlan_bits: u8,
    pub site_prefix_len: u8,
    pub vlan_prefix_len: u8,
    pub site_examples: Vec<SiteExample>,
}

/// Build the scenario for `seed`.
pub fn generate_scenario(seed: u32) -> Result<Scenario> {
    let mut rng = Lcg::new(seed);
    let hex_a = rng.rand_int(0, 0xfffe);
    let hex_b = rng.rand_int(0, 0xfffe);
    // Third word is drawn to keep the sequence stable; it is not used.
    let _hex_c = rng.rand_int(0, 0xfffe);
    let parent = format!("2001:{hex_a:04x}:{hex_b:04x}::/{PARENT_PREFIX_LEN}");

    let sites = rng.rand_int(2, 12);
    let vlans = rng.rand_int(4, 20);

    // One spare subnet each.
    let site_bits = bits_for_subnet_count(u128::from(sites) + 1)?;
    let vlan_bits = bits_for_subnet_count(u128::from(vlans) + 1)?;
    let site_prefix_len = PARENT_PREFIX_LEN + site_bits;
    let vlan_prefix_len = site_prefix_len + vlan_bits;

    let site_examples = (0..sites.min(3))
        .map(|i| {
            let site = subprefix(&parent, site_bits, u128::from(i))?;
            let vlan = subprefix(&site.cidr, vlan_bits, 0)?;
            Ok(SiteExample { site, vlan })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "generate_scenario({seed}) parent={parent} sites={sites} vlans={vlans} /{site_prefix_len} /{vlan_prefix_len}"
    );
    Ok(Scenario {
        seed,
        parent,
        sites,
        vlans,
        site_bits,
        vlan_bits,
        site_prefix_len,
        vlan_prefix_len,
        site_examples,
    })
}

/// Severity of a plan finding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Ok,
}

/// One message about a user plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanFinding {
    #[serde(rename = "type")]
    pub severity: Severity,
    #[serde(rename = "msg")]
    pub message: String,
}

impl PlanFinding {
    fn new(severity: Severity, message: String) -> Self {
        PlanFinding { severity, message }
    }
}

fn capacity(bits: i32) -> u128 {
    match bits {
        b if b < 0 => 0,
        b if b >= 128 => u128::MAX,
        b => 1u128 << b,
    }
}

fn next_nibble(len: u8) -> u16 {
    u16::from(len).div_ceil(4) * 4
}

/// Check a user's site and VLAN prefix lengths against `scenario`.
pub fn validate_user_plan(scenario: &Scenario, site_len: u8, vlan_len: u8) -> Vec<PlanFinding> {
    if !(1..=128).contains(&site_len) {
        return vec![PlanFinding::new(
            Severity::Error,
            "Invalid site prefix length.".to_string(),
        )];
    }
    if !(1..=128).contains(&vlan_len) {
        return vec![PlanFinding::new(
            Severity::Error,
            "Invalid VLAN prefix length.".to_string(),
        )];
    }

    let site_capacity = capacity(i32::from(site_len) - i32::from(PARENT_PREFIX_LEN));
    let vlan_capacity = capacity(i32::from(vlan_len) - i32::from(site_len));
    let mut findings = Vec::new();

    if site_len <= PARENT_PREFIX_LEN {
        findings.push(PlanFinding::new(
            Severity::Error,
            format!("Site prefix must be longer than /{PARENT_PREFIX_LEN} (yours: /{site_len})."),
        ));
    }
    if vlan_len <= site_len {
        findings.push(PlanFinding::new(
            Severity::Error,
            format!("VLAN prefix (/{vlan_len}) must be longer than the site prefix (/{site_len})."),
        ));
    }
    if vlan_len > 64 {
        findings.push(PlanFinding::new(
            Severity::Warn,
            format!("VLAN prefix /{vlan_len} > /64 leaves too few bits for the interface ID."),
        ));
    }
    if site_capacity < u128::from(scenario.sites) {
        findings.push(PlanFinding::new(
            Severity::Error,
            format!(
                "/{site_len} only provides {site_capacity} sites, {} are needed.",
                scenario.sites
            ),
        ));
    }
    if vlan_capacity < u128::from(scenario.vlans) {
        findings.push(PlanFinding::new(
            Severity::Error,
            format!(
                "/{vlan_len} only provides {vlan_capacity} VLANs per site, {} are needed.",
                scenario.vlans
            ),
        ));
    }
    if !is_nibble_boundary(site_len) {
        findings.push(PlanFinding::new(
            Severity::Warn,
            format!(
                "/{site_len} is not a nibble boundary (multiple of 4). Recommended: /{}.",
                next_nibble(site_len)
            ),
        ));
    }
    if !is_nibble_boundary(vlan_len) {
        findings.push(PlanFinding::new(
            Severity::Warn,
            format!(
                "/{vlan_len} is not a nibble boundary. Recommended: /{}.",
                next_nibble(vlan_len)
            ),
        ));
    }

    if findings.is_empty() {
        findings.push(PlanFinding::new(
            Severity::Ok,
            format!(
                "Correct: /{site_len} gives {site_capacity} sites (spare: {}), /{vlan_len} gives {vlan_capacity} VLANs.",
                site_capacity - u128::from(scenario.sites)
            ),
        ));
    }
    findings
}
