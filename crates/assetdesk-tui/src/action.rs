//! Every state change in the UI travels through the action channel.

use std::fmt;

use assetdesk_core::{
    Command, CommandResult, CustomersData, DashboardData, InfrastructureData, NetworkDevicesData,
    SitesData, TypedInfrastructureData, VmsData,
};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast shown in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// A delete waiting on the confirm dialog.
#[derive(Debug, Clone)]
pub struct ConfirmAction {
    pub origin: ScreenId,
    pub prompt: String,
    pub command: Command,
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}

/// Payload of a finished view load.
#[derive(Debug, Clone)]
pub enum ViewData {
    Dashboard(DashboardData),
    Customers(CustomersData),
    Sites(SitesData),
    VirtualMachines(VmsData),
    NetworkDevices(NetworkDevicesData),
    Infrastructure(InfrastructureData),
    TypedInfrastructure(TypedInfrastructureData),
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    /// Switch, then open that screen's create form.
    SwitchAndCreate(ScreenId),
    ToggleSidebar,
    ToggleFocus,
    Reload,

    // ── View loading ──────────────────────────────────────────────
    LoadStarted(ScreenId),
    Loaded(ScreenId, Box<ViewData>),
    LoadFailed(ScreenId, String),

    // ── Mutations ─────────────────────────────────────────────────
    OpenCreate,
    Execute { origin: ScreenId, command: Command },
    CommandDone { origin: ScreenId, result: Box<CommandResult> },
    CommandFailed { origin: ScreenId, message: String },

    // ── Confirm dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
}

impl Action {
    /// The screen a routed action belongs to, if any.
    pub fn target(&self) -> Option<ScreenId> {
        match self {
            Self::LoadStarted(id) | Self::Loaded(id, _) | Self::LoadFailed(id, _) => Some(*id),
            Self::CommandDone { origin, .. } | Self::CommandFailed { origin, .. } => Some(*origin),
            _ => None,
        }
    }
}
