//! Dashboard aggregation: headline counts, the asset breakdown bars, the
//! quick-action shortcuts and the recent-activity feed.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::{Asset, AssetType, Customer, Site};

/// Headline counts for the stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub customers: usize,
    pub sites: usize,
    pub vms: usize,
    pub switches: usize,
    pub firewalls: usize,
}

impl DashboardStats {
    pub fn new(
        customers: &[Customer],
        sites: &[Site],
        vms: &[Asset],
        switches: &[Asset],
        firewalls: &[Asset],
    ) -> Self {
        Self {
            customers: customers.len(),
            sites: sites.len(),
            vms: vms.len(),
            switches: switches.len(),
            firewalls: firewalls.len(),
        }
    }

    pub fn breakdown(&self) -> AssetBreakdown {
        AssetBreakdown::new(self.vms, self.switches, self.firewalls)
    }
}

/// Each asset class as a fraction (0.0..=1.0) of all assets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetBreakdown {
    pub vms: f64,
    pub switches: f64,
    pub firewalls: f64,
}

impl AssetBreakdown {
    /// With no assets at all every share is `0.0`.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn new(vms: usize, switches: usize, firewalls: usize) -> Self {
        let total = vms + switches + firewalls;
        if total == 0 {
            return Self::default();
        }
        let share = |count: usize| count as f64 / total as f64;
        Self {
            vms: share(vms),
            switches: share(switches),
            firewalls: share(firewalls),
        }
    }
}

/// A dashboard shortcut and the view it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub view: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Add Customer",
        view: "customers",
    },
    QuickAction {
        label: "Add Site",
        view: "sites",
    },
    QuickAction {
        label: "Add VM",
        view: "vms",
    },
    QuickAction {
        label: "Add Network Device",
        view: "switches",
    },
];

// ── Recent activity ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Vm,
    Network,
    Site,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub name: String,
    pub description: &'static str,
    pub added: NaiveDateTime,
}

impl ActivityItem {
    pub fn age(&self, now: NaiveDateTime) -> String {
        relative_age(self.added, now)
    }
}

/// Parse a backend timestamp: RFC 3339, or naive ISO-8601 taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Newest additions across sites and assets, newest first.
/// Records without a parseable `added` timestamp are skipped.
///
/// The feed is built from live records instead of a fixed sample list, so
/// an empty inventory shows an empty feed.
pub fn recent_activity<'a>(
    sites: impl IntoIterator<Item = &'a Site>,
    assets: impl IntoIterator<Item = &'a Asset>,
    limit: usize,
) -> Vec<ActivityItem> {
    let site_items = sites.into_iter().filter_map(|site| {
        Some(ActivityItem {
            kind: ActivityKind::Site,
            name: site.name.clone(),
            description: "New site added",
            added: parse_timestamp(site.added.as_deref()?)?,
        })
    });
    let asset_items = assets.into_iter().filter_map(|asset| {
        let (kind, description) = match asset.asset_type() {
            AssetType::Vm => (ActivityKind::Vm, "New virtual machine added"),
            AssetType::Switch => (ActivityKind::Network, "New switch added"),
            AssetType::Firewall => (ActivityKind::Network, "New firewall added"),
            AssetType::Host => (ActivityKind::Vm, "New host added"),
        };
        Some(ActivityItem {
            kind,
            name: asset.hostname.clone(),
            description,
            added: parse_timestamp(asset.added.as_deref()?)?,
        })
    });

    let mut items: Vec<_> = site_items.chain(asset_items).collect();
    items.sort_by(|a, b| b.added.cmp(&a.added));
    items.truncate(limit);
    items
}

/// `"just now"`, `"5 minutes ago"`, `"1 hour ago"`, `"3 days ago"`.
pub fn relative_age(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now.signed_duration_since(then);
    let (count, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".into();
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[allow(clippy::unwrap_used, clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::model::{AssetKind, VmSpecs};

    fn at(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    fn vm(hostname: &str, added: Option<&str>) -> Asset {
        Asset {
            id: hostname.into(),
            hostname: hostname.into(),
            ip_address: String::new(),
            customer_id: "c1".into(),
            notes: None,
            added: added.map(Into::into),
            modified: None,
            kind: AssetKind::Vm {
                specs: VmSpecs::default(),
            },
        }
    }

    fn site(name: &str, added: &str) -> Site {
        Site {
            id: name.into(),
            name: name.into(),
            customer_id: "c1".into(),
            address: None,
            is_primary: false,
            notes: None,
            added: Some(added.into()),
            modified: None,
        }
    }

    #[test]
    fn zero_assets_never_divides_by_zero() {
        let breakdown = AssetBreakdown::new(0, 0, 0);
        assert_eq!(breakdown, AssetBreakdown::default());
        assert!(!breakdown.vms.is_nan());
    }

    #[test]
    fn shares_sum_to_one() {
        let breakdown = AssetBreakdown::new(2, 1, 1);
        assert_eq!(breakdown.vms, 0.5);
        assert_eq!(breakdown.switches, 0.25);
        assert_eq!(breakdown.vms + breakdown.switches + breakdown.firewalls, 1.0);
    }

    #[test]
    fn timestamps_with_and_without_offset() {
        assert_eq!(at("2024-03-01T10:00:00"), at("2024-03-01T10:00:00Z"));
        assert_eq!(at("2024-03-01T10:00:00.123456").and_utc().timestamp(), 1_709_287_200);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn relative_ages() {
        let now = at("2024-03-01T12:00:00");
        assert_eq!(relative_age(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative_age(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_age(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(relative_age(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative_age(now + Duration::hours(1), now), "just now");
    }

    #[test]
    fn activity_is_newest_first_and_skips_untimed() {
        let sites = [site("Acme - HQ", "2024-03-01T08:00:00")];
        let assets = [
            vm("web-01", Some("2024-03-01T10:00:00")),
            vm("legacy", None),
            vm("db-01", Some("2024-02-28T09:00:00")),
        ];
        let items = recent_activity(&sites, &assets, 5);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["web-01", "Acme - HQ", "db-01"]);
        assert_eq!(items[0].description, "New virtual machine added");
        assert_eq!(items[1].kind, ActivityKind::Site);

        assert_eq!(recent_activity(&sites, &assets, 1).len(), 1);
    }

    #[test]
    fn empty_inventory_has_no_activity() {
        let sites: [Site; 0] = [];
        let assets: [Asset; 0] = [];
        assert!(recent_activity(&sites, &assets, 5).is_empty());
    }

    #[test]
    fn quick_actions_target_views() {
        let views: Vec<_> = QUICK_ACTIONS.iter().map(|a| a.view).collect();
        assert_eq!(views, ["customers", "sites", "vms", "switches"]);
    }
}
