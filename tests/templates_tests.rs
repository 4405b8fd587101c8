use chrono::{NaiveDate, Utc};
use fundmatch::{
    accounts::{AuthenticatedUser, Role},
    ledger::{FundingRecord, InvestorProfile, PortfolioEntry, StartupProfile},
    matching::{InvestorMatch, StartupMatch},
    session::UserSession,
    templates::{render, InvestorDashboardPage, Layout, StartupDashboardPage},
};
use rust_decimal::Decimal;

fn layout_for(role: Role, name: &str) -> Layout {
    let user = AuthenticatedUser {
        role,
        id: 1,
        name: name.to_string(),
    };
    Layout {
        user: Some(UserSession::new(&user, Utc::now())),
        flashes: Vec::new(),
    }
}

fn startup_profile() -> StartupProfile {
    StartupProfile {
        startup_id: 1,
        name: "AI Insights".to_string(),
        email: "contact@aiinsights.com".to_string(),
        domain_id: 1,
        domain_name: "AI/ML".to_string(),
        funding_required: Decimal::from(5_000_000),
        description: Some("Predictive analytics for retail".to_string()),
        founded_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        location: Some("Bangalore".to_string()),
        website: None,
        is_funded: true,
        total_funding_received: Decimal::from(2_500_000),
    }
}

fn investor_profile() -> InvestorProfile {
    InvestorProfile {
        investor_id: 2,
        name: "Sequoia Capital India".to_string(),
        email: "india@sequoiacap.com".to_string(),
        investment_min: Decimal::from(1_000_000),
        investment_max: Decimal::from(20_000_000),
        preferred_domains: "1,2,4".to_string(),
        phone: None,
        location: Some("Bangalore".to_string()),
        portfolio_size: 1,
        total_invested: Decimal::from(3_000_000),
        startups_funded: 1,
    }
}

#[test]
fn test_startup_dashboard_renders_matches_and_history() {
    let page = StartupDashboardPage {
        layout: layout_for(Role::Startup, "AI Insights"),
        startup: startup_profile(),
        matched_investors: vec![
            InvestorMatch {
                investor_id: 4,
                name: "Kalaari Capital".to_string(),
                investment_min: Decimal::from(1_000_000),
                investment_max: Decimal::from(10_000_000),
                preferred_domains: "1,3".to_string(),
                location: Some("Pune".to_string()),
                portfolio_size: 2,
                match_score: 100,
            },
            InvestorMatch {
                investor_id: 1,
                name: "Accel Partners".to_string(),
                investment_min: Decimal::from(500_000),
                investment_max: Decimal::from(6_000_000),
                preferred_domains: "2".to_string(),
                location: None,
                portfolio_size: 0,
                match_score: 50,
            },
        ],
        funding_history: vec![FundingRecord {
            funding_id: 7,
            investor_id: 2,
            investor_name: "Sequoia Capital India".to_string(),
            amount: Decimal::from(2_500_000),
            funding_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            funding_round: Some("Seed".to_string()),
            notes: Some("Led the round".to_string()),
        }],
    };

    let body = render(&page).unwrap().0;

    assert!(body.contains("<h1>AI Insights</h1>"));
    assert!(body.contains("Predictive analytics for retail"));
    assert!(body.contains("Kalaari Capital"));
    assert!(body.contains("Perfect domain match"));
    assert!(body.contains("Accel Partners"));
    assert!(body.contains("Investment range compatible"));
    assert!(body.contains("badge badge-strong"));
    assert!(body.contains("2024-06-01"));
    assert!(body.contains("Seed"));
    assert!(body.contains("Led the round"));
    assert!(!body.contains("No funding recorded yet."));
}

#[test]
fn test_startup_dashboard_without_rows() {
    let page = StartupDashboardPage {
        layout: Layout::default(),
        startup: startup_profile(),
        matched_investors: Vec::new(),
        funding_history: Vec::new(),
    };

    let body = render(&page).unwrap().0;

    assert!(body.contains("No investors currently cover your funding requirement."));
    assert!(body.contains("No funding recorded yet."));
}

#[test]
fn test_investor_dashboard_renders_matches_and_portfolio() {
    let page = InvestorDashboardPage {
        layout: layout_for(Role::Investor, "Sequoia Capital India"),
        investor: investor_profile(),
        matched_startups: vec![
            StartupMatch {
                startup_id: 8,
                name: "FoodieHub".to_string(),
                domain_name: "FoodTech".to_string(),
                funding_required: Decimal::from(3_500_000),
                location: Some("Mumbai".to_string()),
                description: Some("Cloud kitchens".to_string()),
                founded_date: NaiveDate::from_ymd_opt(2024, 5, 20),
                is_funded: false,
                match_score: 100,
            },
            StartupMatch {
                startup_id: 9,
                name: "GreenGrid".to_string(),
                domain_name: "CleanTech".to_string(),
                funding_required: Decimal::from(4_000_000),
                location: None,
                description: None,
                founded_date: None,
                is_funded: false,
                match_score: 50,
            },
        ],
        portfolio: vec![PortfolioEntry {
            funding_id: 3,
            startup_id: 5,
            startup_name: "PayEasy".to_string(),
            domain_name: "FinTech".to_string(),
            amount: Decimal::from(3_000_000),
            funding_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            funding_round: Some("Series A".to_string()),
            notes: None,
        }],
    };

    let body = render(&page).unwrap().0;

    assert!(body.contains("<h1>Sequoia Capital India</h1>"));
    assert!(body.contains("FoodieHub"));
    assert!(body.contains("Cloud kitchens"));
    assert!(body.contains("Preferred domain"));
    assert!(body.contains("GreenGrid"));
    assert!(body.contains("Within investment range"));
    assert!(body.contains("PayEasy"));
    assert!(body.contains("Series A"));
    assert!(body.contains("2024-03-20"));
    assert!(!body.contains("You have not funded any startups yet."));
}

#[test]
fn test_investor_dashboard_without_rows() {
    let page = InvestorDashboardPage {
        layout: Layout::default(),
        investor: investor_profile(),
        matched_startups: Vec::new(),
        portfolio: Vec::new(),
    };

    let body = render(&page).unwrap().0;

    assert!(body.contains("No unfunded startups fall inside your investment range."));
    assert!(body.contains("You have not funded any startups yet."));
}
