//! Screen identifiers and the sidebar navigation model.

use std::fmt;

use assetdesk_core::{DeviceKind, InfraFlavor};

/// Every view reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard,
    Customers,
    Sites,
    /// Generic infrastructure list ("All Locations").
    Infrastructure,
    Azure,
    Aws,
    Datacenter,
    OnPremise,
    VirtualMachines,
    Switches,
    Firewalls,
}

impl ScreenId {
    pub const ALL: [ScreenId; 11] = [
        Self::Dashboard,
        Self::Customers,
        Self::Sites,
        Self::Infrastructure,
        Self::Azure,
        Self::Aws,
        Self::Datacenter,
        Self::OnPremise,
        Self::VirtualMachines,
        Self::Switches,
        Self::Firewalls,
    ];

    /// View identifier used by the config file and `--view`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Customers => "customers",
            Self::Sites => "sites",
            Self::Infrastructure => "infrastructure",
            Self::Azure => "azure",
            Self::Aws => "aws",
            Self::Datacenter => "datacenter",
            Self::OnPremise => "on_premise",
            Self::VirtualMachines => "vms",
            Self::Switches => "switches",
            Self::Firewalls => "firewalls",
        }
    }

    /// Resolve a view identifier. Unknown identifiers land on the dashboard.
    pub fn from_key(key: &str) -> Self {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "virtual_machines" => Self::VirtualMachines,
            "locations" | "all_locations" => Self::Infrastructure,
            "onpremise" => Self::OnPremise,
            other => Self::ALL
                .into_iter()
                .find(|id| id.key() == other)
                .unwrap_or_default(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Customers => "Customers",
            Self::Sites => "Sites",
            Self::Infrastructure => "All Locations",
            Self::Azure => "Azure",
            Self::Aws => "AWS",
            Self::Datacenter => "Datacenter",
            Self::OnPremise => "On-Premise",
            Self::VirtualMachines => "Virtual Machines",
            Self::Switches => "Switches",
            Self::Firewalls => "Firewalls",
        }
    }

    pub fn device_kind(self) -> Option<DeviceKind> {
        match self {
            Self::Switches => Some(DeviceKind::Switch),
            Self::Firewalls => Some(DeviceKind::Firewall),
            _ => None,
        }
    }

    pub fn flavor(self) -> Option<InfraFlavor> {
        match self {
            Self::Azure => Some(InfraFlavor::Azure),
            Self::Aws => Some(InfraFlavor::Aws),
            Self::Datacenter => Some(InfraFlavor::Datacenter),
            Self::OnPremise => Some(InfraFlavor::OnPremise),
            _ => None,
        }
    }

    fn section(self) -> Option<Section> {
        match self {
            Self::Infrastructure | Self::Azure | Self::Aws | Self::Datacenter | Self::OnPremise => {
                Some(Section::Infrastructure)
            }
            Self::VirtualMachines | Self::Switches | Self::Firewalls => Some(Section::Assets),
            Self::Dashboard | Self::Customers | Self::Sites => None,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Sidebar ──────────────────────────────────────────────────────────

/// Collapsible sidebar groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Infrastructure,
    Assets,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Assets => "Assets",
        }
    }

    fn members(self) -> &'static [ScreenId] {
        match self {
            Self::Infrastructure => &[
                ScreenId::Infrastructure,
                ScreenId::Azure,
                ScreenId::Aws,
                ScreenId::Datacenter,
                ScreenId::OnPremise,
            ],
            Self::Assets => &[
                ScreenId::VirtualMachines,
                ScreenId::Switches,
                ScreenId::Firewalls,
            ],
        }
    }
}

/// One visible sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Screen { id: ScreenId, nested: bool },
    Section { section: Section, expanded: bool },
}

/// Sidebar state: collapse flags plus the highlighted row.
#[derive(Debug, Clone)]
pub struct Sidebar {
    open: bool,
    infrastructure_open: bool,
    assets_open: bool,
    cursor: usize,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Sidebar {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            infrastructure_open: true,
            assets_open: true,
            cursor: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        match section {
            Section::Infrastructure => self.infrastructure_open,
            Section::Assets => self.assets_open,
        }
    }

    pub fn toggle_section(&mut self, section: Section) {
        match section {
            Section::Infrastructure => self.infrastructure_open = !self.infrastructure_open,
            Section::Assets => self.assets_open = !self.assets_open,
        }
        self.cursor = self.cursor.min(self.entries().len().saturating_sub(1));
    }

    /// Rows in display order, skipping members of collapsed sections.
    pub fn entries(&self) -> Vec<NavEntry> {
        let mut rows = vec![NavEntry::Screen {
            id: ScreenId::Dashboard,
            nested: false,
        }];
        for section in [Section::Infrastructure, Section::Assets] {
            let expanded = self.is_expanded(section);
            rows.push(NavEntry::Section { section, expanded });
            if expanded {
                rows.extend(section.members().iter().map(|&id| NavEntry::Screen {
                    id,
                    nested: true,
                }));
            }
        }
        rows.extend([ScreenId::Customers, ScreenId::Sites].map(|id| NavEntry::Screen {
            id,
            nested: false,
        }));
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.entries().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Activate the highlighted row: sections toggle, screens are returned.
    pub fn activate(&mut self) -> Option<ScreenId> {
        match self.entries().get(self.cursor).copied()? {
            NavEntry::Section { section, .. } => {
                self.toggle_section(section);
                None
            }
            NavEntry::Screen { id, .. } => Some(id),
        }
    }

    /// Expand the section holding `id` and move the cursor onto it.
    pub fn reveal(&mut self, id: ScreenId) {
        if let Some(section) = id.section() {
            if !self.is_expanded(section) {
                self.toggle_section(section);
            }
        }
        if let Some(pos) = self
            .entries()
            .iter()
            .position(|entry| matches!(entry, NavEntry::Screen { id: row, .. } if *row == id))
        {
            self.cursor = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn view_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_key(id.key()), id);
        }
        assert_eq!(ScreenId::from_key("On-Premise"), ScreenId::OnPremise);
        assert_eq!(ScreenId::from_key("virtual-machines"), ScreenId::VirtualMachines);
    }

    #[test]
    fn unknown_view_falls_back_to_dashboard() {
        assert_eq!(ScreenId::from_key("reports"), ScreenId::Dashboard);
        assert_eq!(ScreenId::from_key(""), ScreenId::Dashboard);
    }

    #[test]
    fn sidebar_starts_fully_expanded() {
        let sidebar = Sidebar::default();
        assert!(sidebar.is_open());
        assert_eq!(sidebar.entries().len(), 13);
    }

    #[test]
    fn collapsing_a_section_hides_its_members() {
        let mut sidebar = Sidebar::default();
        sidebar.toggle_section(Section::Infrastructure);
        let entries = sidebar.entries();
        assert_eq!(entries.len(), 8);
        assert!(!entries.contains(&NavEntry::Screen {
            id: ScreenId::Aws,
            nested: true
        }));
        assert!(entries.contains(&NavEntry::Section {
            section: Section::Infrastructure,
            expanded: false
        }));
    }

    #[test]
    fn activate_toggles_sections_and_returns_screens() {
        let mut sidebar = Sidebar::default();
        sidebar.move_cursor(1);
        assert_eq!(sidebar.activate(), None);
        assert!(!sidebar.is_expanded(Section::Infrastructure));

        // Assets header, then Virtual Machines.
        sidebar.move_cursor(2);
        assert_eq!(sidebar.activate(), Some(ScreenId::VirtualMachines));
    }

    #[test]
    fn reveal_expands_the_owning_section() {
        let mut sidebar = Sidebar::default();
        sidebar.toggle_section(Section::Assets);
        sidebar.reveal(ScreenId::Firewalls);
        assert!(sidebar.is_expanded(Section::Assets));
        assert_eq!(
            sidebar.entries()[sidebar.cursor()],
            NavEntry::Screen {
                id: ScreenId::Firewalls,
                nested: true
            }
        );
    }

    #[test]
    fn cursor_is_clamped() {
        let mut sidebar = Sidebar::default();
        sidebar.move_cursor(-3);
        assert_eq!(sidebar.cursor(), 0);
        sidebar.move_cursor(100);
        assert_eq!(sidebar.cursor(), 12);
        sidebar.toggle_section(Section::Assets);
        assert_eq!(sidebar.cursor(), 9);
    }
}
