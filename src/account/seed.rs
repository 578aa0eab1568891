use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

use super::model::{Account, Role, Status};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn account(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    status: Status,
    created_at: DateTime<Utc>,
    last_login: DateTime<Utc>,
    company: &str,
    permissions: &[&str],
    balance: Decimal,
    project_id: Option<&str>,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        created_at,
        last_login,
        company: company.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        balance: Some(balance),
        currency: "USD".to_string(),
        project_id: project_id.map(str::to_string),
    }
}

/// The fixed account list the service starts with.
pub fn mock_accounts() -> Vec<Account> {
    vec![
        account(
            "user_1",
            "John Doe",
            "john.doe@example.com",
            Role::Admin,
            Status::Active,
            at(2024, 1, 15, 10, 30),
            at(2024, 1, 20, 14, 22),
            "Acme Corporation",
            &["read", "write", "admin", "impersonate"],
            dec!(0),
            None,
        ),
        account(
            "user_2",
            "Jane Smith",
            "jane.smith@example.com",
            Role::User,
            Status::Active,
            at(2024, 1, 16, 9, 15),
            at(2024, 1, 20, 13, 45),
            "Tech Solutions Inc",
            &["read", "write"],
            dec!(250.75),
            Some("proj_1"),
        ),
        account(
            "user_3",
            "Bob Johnson",
            "bob.johnson@example.com",
            Role::User,
            Status::Active,
            at(2024, 1, 17, 11, 20),
            at(2024, 1, 20, 12, 30),
            "Marketing Agency",
            &["read", "write"],
            dec!(89.50),
            Some("proj_2"),
        ),
        account(
            "user_4",
            "Alice Brown",
            "alice.brown@example.com",
            Role::User,
            Status::Inactive,
            at(2024, 1, 18, 16, 45),
            at(2024, 1, 19, 10, 15),
            "E-commerce Store",
            &["read"],
            dec!(0),
            Some("proj_3"),
        ),
        account(
            "user_5",
            "Charlie Wilson",
            "charlie.wilson@example.com",
            Role::User,
            Status::Suspended,
            at(2024, 1, 19, 8, 30),
            at(2024, 1, 19, 15, 20),
            "Startup Inc",
            &["read"],
            dec!(15.25),
            Some("proj_4"),
        ),
    ]
}

/// Loads a replacement seed list from a JSON array of accounts.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}
