//! Demo seed data
//!
//! Deterministic inventory and review cases for the demo workflow and the
//! test fixtures. Timestamps are fixed so weekly buckets and exports are
//! stable.

use chrono::{DateTime, TimeZone, Utc};
use shadow_model::{
    AppCategory, AppUser, CasePriority, Department, Rationale, RationaleReason, RationaleSource,
    ReviewCase, RiskLevel, ScopeGrant, ScopeRiskTag, ShadowApp,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    // Seed dates are compile-time constants; the panic path is unreachable.
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn user(id: &str, name: &str, email: &str, dept: Department, role: Option<&str>) -> AppUser {
    AppUser {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        dept,
        role: role.map(str::to_string),
    }
}

/// The demo inventory
#[must_use]
pub fn demo_apps() -> Vec<ShadowApp> {
    vec![
        ShadowApp::new(
            "app_sketchymail",
            "SketchyMail",
            "Pixel Harbor Labs",
            AppCategory::Communication,
            RiskLevel::High,
            at(2026, 6, 2, 9),
        )
        .with_description("Unvetted mail client with full mailbox access and offline tokens")
        .with_risk_score(87.0)
        .with_scope(
            ScopeGrant::new("Mail.Read", "Read user mail").with_risk_tag(ScopeRiskTag::Mail),
        )
        .with_scope(
            ScopeGrant::new("Mail.Send", "Send mail as the user")
                .with_risk_tag(ScopeRiskTag::Mail),
        )
        .with_scope(
            ScopeGrant::new("offline_access", "Maintain access to granted data")
                .with_risk_tag(ScopeRiskTag::Identity),
        )
        .with_user(user(
            "u_kim",
            "Kim Reyes",
            "kim.reyes@corp.example",
            Department::Sales,
            None,
        ))
        .with_user(user(
            "u_ola",
            "Ola Berg",
            "ola.berg@corp.example",
            Department::Marketing,
            Some("Manager"),
        ))
        .with_user(user(
            "u_dev",
            "Devon Price",
            "devon.price@corp.example",
            Department::Engineering,
            None,
        ))
        .with_tag("mail")
        .with_tag("oauth")
        .with_tag("exfil-risk")
        .with_rationale(Rationale {
            summary: "Mailbox-wide read/send grant from an unknown publisher".to_string(),
            reasons: vec![
                RationaleReason {
                    text: "Requests Mail.Read and Mail.Send together".to_string(),
                    citation: Some("grant review 2026-06-02".to_string()),
                },
                RationaleReason {
                    text: "Publisher has no verified domain".to_string(),
                    citation: None,
                },
            ],
            sources: vec![RationaleSource {
                title: "OAuth consent audit".to_string(),
                url: "https://intranet.corp.example/audits/oauth".to_string(),
            }],
        }),
        ShadowApp::new(
            "app_calendarsync",
            "CalendarSync",
            "SyncWorks Ltd",
            AppCategory::Productivity,
            RiskLevel::Medium,
            at(2026, 6, 4, 14),
        )
        .with_description("Two-way calendar sync with a personal account")
        .with_risk_score(55.0)
        .with_scope(
            ScopeGrant::new("Calendars.ReadWrite", "Full calendar access")
                .with_risk_tag(ScopeRiskTag::Calendar),
        )
        .with_user(user(
            "u_kim",
            "Kim Reyes",
            "kim.reyes@corp.example",
            Department::Sales,
            None,
        ))
        .with_user(user(
            "u_jas",
            "Jas Nair",
            "jas.nair@corp.example",
            Department::Finance,
            None,
        ))
        .with_tag("calendar")
        .with_tag("oauth"),
        ShadowApp::new(
            "app_freevpn",
            "TunnelFree VPN",
            "Anon Networks",
            AppCategory::Utilities,
            RiskLevel::High,
            at(2026, 6, 16, 11),
        )
        .with_description("Free VPN extension observed on two managed laptops")
        .with_risk_score(91.0)
        .with_scope(
            ScopeGrant::new("User.Read", "Sign in and read profile")
                .with_risk_tag(ScopeRiskTag::Identity),
        )
        .with_user(user(
            "u_rio",
            "Rio Tanaka",
            "rio.tanaka@corp.example",
            Department::Support,
            None,
        ))
        .with_tag("network")
        .with_tag("personal-use"),
        ShadowApp::new(
            "app_notegenie",
            "NoteGenie",
            "BrightApps",
            AppCategory::Productivity,
            RiskLevel::Medium,
            at(2026, 6, 23, 10),
        )
        .with_description("AI note summarizer reading shared files")
        .with_risk_score(48.0)
        .with_scope(
            ScopeGrant::new("Files.Read.All", "Read all files the user can access")
                .with_risk_tag(ScopeRiskTag::Files),
        )
        .with_user(user(
            "u_ola",
            "Ola Berg",
            "ola.berg@corp.example",
            Department::Marketing,
            Some("Manager"),
        ))
        .with_tag("notes")
        .with_tag("ai"),
        {
            let mut app = ShadowApp::new(
                "app_dropvault",
                "DropVault",
                "DropVault Inc",
                AppCategory::Storage,
                RiskLevel::Medium,
                at(2026, 7, 7, 16),
            )
            .with_description("Team file vault approved for the design org")
            .with_risk_score(40.0)
            .with_scope(
                ScopeGrant::new("Files.ReadWrite", "Read and write user files")
                    .with_risk_tag(ScopeRiskTag::Files),
            )
            .with_user(user(
                "u_mia",
                "Mia Kowalski",
                "mia.kowalski@corp.example",
                Department::Engineering,
                None,
            ))
            .with_tag("storage");
            app.status = shadow_model::AppStatus::Sanctioned;
            app
        },
        ShadowApp::new(
            "app_devhookz",
            "DevHookz",
            "Hookz.io",
            AppCategory::Developer,
            RiskLevel::Low,
            at(2026, 7, 21, 9),
        )
        .with_description("Webhook relay used by one CI pipeline")
        .with_risk_score(22.0)
        .with_scope(ScopeGrant::new("User.Read", "Sign in and read profile"))
        .with_user(user(
            "u_dev",
            "Devon Price",
            "devon.price@corp.example",
            Department::Engineering,
            None,
        ))
        .with_tag("webhooks")
        .with_tag("ci"),
        {
            let mut app = ShadowApp::new(
                "app_pixelboard",
                "PixelBoard",
                "Craftware",
                AppCategory::Other,
                RiskLevel::Low,
                at(2026, 8, 4, 13),
            )
            .with_description("Moodboard tool; reviewed and accepted as low risk")
            .with_risk_score(15.0)
            .with_user(user(
                "u_mia",
                "Mia Kowalski",
                "mia.kowalski@corp.example",
                Department::Engineering,
                None,
            ))
            .with_tag("design");
            app.status = shadow_model::AppStatus::Dismissed;
            app
        },
    ]
}

/// Review cases bound to a subset of the demo apps
#[must_use]
pub fn demo_cases() -> Vec<ReviewCase> {
    vec![
        ReviewCase::new("case_sketchymail", "app_sketchymail", CasePriority::P0, 0.92, 0.8)
            .with_event(at(2026, 6, 2, 9), "First consent grant observed")
            .with_event(at(2026, 6, 3, 8), "Two more users consented")
            .with_event(at(2026, 6, 3, 15), "Escalated to P0 after scope review")
            .with_recommendation("Revoke OAuth grant")
            .with_recommendation("Notify affected users")
            .with_recommendation("Create tracking ticket"),
        ReviewCase::new("case_freevpn", "app_freevpn", CasePriority::P1, 0.78, 0.5)
            .with_event(at(2026, 6, 16, 11), "Extension detected on managed laptop")
            .with_recommendation("End active sessions")
            .with_recommendation("Block publisher domain"),
        ReviewCase::new("case_notegenie", "app_notegenie", CasePriority::P2, 0.6, 0.3)
            .with_event(at(2026, 6, 23, 10), "Files.Read.All grant observed")
            .with_recommendation("Request business justification"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_model::AppStatus;

    #[test]
    fn seed_ids_are_unique() {
        let apps = demo_apps();
        let mut ids: Vec<_> = apps.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), apps.len());
    }

    #[test]
    fn seed_covers_the_scenario_apps() {
        let apps = demo_apps();
        let sketchy = apps
            .iter()
            .find(|a| a.id.as_str() == "app_sketchymail")
            .unwrap();
        assert_eq!(sketchy.risk_level, RiskLevel::High);
        assert_eq!(sketchy.status, AppStatus::Unsanctioned);
        assert!(apps.iter().any(|a| a.name == "CalendarSync"));
    }

    #[test]
    fn cases_bind_to_seeded_apps() {
        let apps = demo_apps();
        for case in demo_cases() {
            assert!(apps.iter().any(|a| a.id == case.app_id), "{}", case.id);
        }
    }

    #[test]
    fn statuses_span_the_state_machine() {
        let apps = demo_apps();
        assert!(apps.iter().any(|a| a.status == AppStatus::Sanctioned));
        assert!(apps.iter().any(|a| a.status == AppStatus::Dismissed));
        assert!(apps.iter().any(|a| a.status == AppStatus::Unsanctioned));
    }
}
