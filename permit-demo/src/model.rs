//! Sample data for the admin console.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Reviewer,
    Clerk,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Reviewer => "Reviewer",
            Role::Clerk => "Clerk",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Admin {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub active: bool,
    pub permits_reviewed: u32,
    /// Account creation date, `YYYY-MM-DD`.
    pub created: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    SignedIn,
    ApprovedPermit(String),
    RejectedPermit(String),
    ChangedRole(Role),
    Deactivated,
}

#[derive(Clone, Debug)]
pub struct HistoryLogItem {
    /// `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
    pub actor: String,
    pub action: HistoryAction,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryAction::SignedIn => write!(f, "signed in"),
            HistoryAction::ApprovedPermit(permit) => write!(f, "approved permit {permit}"),
            HistoryAction::RejectedPermit(permit) => write!(f, "rejected permit {permit}"),
            HistoryAction::ChangedRole(role) => write!(f, "changed role to {}", role.name()),
            HistoryAction::Deactivated => write!(f, "deactivated the account"),
        }
    }
}

/// Read-only store of admins and their audit history.
#[derive(Debug, Default)]
pub struct Directory {
    admins: Vec<Admin>,
    history: Vec<(u32, HistoryLogItem)>,
}

impl Directory {
    pub fn new(admins: Vec<Admin>, history: Vec<(u32, HistoryLogItem)>) -> Self {
        Self { admins, history }
    }

    pub fn sample() -> Self {
        let admin = |id, name: &str, email: &str, phone: &str, role, active, permits_reviewed, created: &str| Admin {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            role,
            active,
            permits_reviewed,
            created: created.to_string(),
        };
        let item = |timestamp: &str, actor: &str, action| HistoryLogItem {
            timestamp: timestamp.to_string(),
            actor: actor.to_string(),
            action,
        };

        let admins = vec![
            admin(1, "Marta Kowalczyk", "marta@permits.example", "+1 555 0101", Role::Owner, true, 412, "2021-03-14"),
            admin(2, "Daniel Osei", "daniel@permits.example", "+1 555 0102", Role::Reviewer, true, 268, "2022-07-01"),
            admin(3, "Priya Raman", "priya@permits.example", "+1 555 0103", Role::Reviewer, true, 153, "2023-01-09"),
            admin(4, "Tomas Lind", "tomas@permits.example", "+1 555 0104", Role::Clerk, false, 37, "2023-11-20"),
        ];
        let history = vec![
            (1, item("2024-05-02 08:14", "Marta Kowalczyk", HistoryAction::SignedIn)),
            (1, item("2024-05-02 08:31", "Marta Kowalczyk", HistoryAction::ApprovedPermit("BP-2231".into()))),
            (1, item("2024-05-03 10:02", "Marta Kowalczyk", HistoryAction::ChangedRole(Role::Owner))),
            (2, item("2024-05-02 09:00", "Daniel Osei", HistoryAction::SignedIn)),
            (2, item("2024-05-02 09:12", "Daniel Osei", HistoryAction::RejectedPermit("BP-2240".into()))),
            (2, item("2024-05-02 11:47", "Daniel Osei", HistoryAction::ApprovedPermit("BP-2244".into()))),
            (3, item("2024-05-04 13:20", "Priya Raman", HistoryAction::ApprovedPermit("EP-0912".into()))),
            (4, item("2024-04-28 16:55", "Marta Kowalczyk", HistoryAction::Deactivated)),
        ];
        Self::new(admins, history)
    }

    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    pub fn admin(&self, id: u32) -> Option<&Admin> {
        self.admins.iter().find(|admin| admin.id == id)
    }

    /// History entries for `id`, newest first.
    pub fn history(&self, id: u32) -> Vec<HistoryLogItem> {
        let mut items: Vec<HistoryLogItem> = self
            .history
            .iter()
            .filter(|(admin, _)| *admin == id)
            .map(|(_, item)| item.clone())
            .collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }
}
