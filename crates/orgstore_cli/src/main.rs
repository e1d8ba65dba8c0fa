//! Demonstration entry point.
//!
//! # Responsibility
//! - Open the configured store and run the fixed insert/update/delete
//!   sequence followed by the relational queries.
//! - Print one human-readable status line per step.
//!
//! Configuration comes from `ORGSTORE_*` environment variables; see
//! `orgstore_core::config`.

use log::error;
use orgstore_core::{
    init_logging_from_config, MemberPatch, QueryReport, RepoResult, Store, StoreConfig,
};
use std::fmt::Display;
use std::process::ExitCode;

const ORGANIZATIONS: [(&str, &str); 3] = [
    ("TechCorp", "New York"),
    ("HealthInc", "San Francisco"),
    ("FinTech", "India"),
];

const MEMBERS: [(&str, i64, i64); 3] = [("A", 35, 1), ("B", 20, 2), ("C", 20, 3)];

fn main() -> ExitCode {
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let mut store = match Store::open(&config) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_demo(&mut store) {
        Ok(query_report) => {
            print_query_report(&query_report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs every write step, then returns the query report for printing.
///
/// Individual write failures are reported and skipped. Failing to obtain
/// a service (schema not ready) or to run the queries aborts the run.
fn run_demo(store: &mut Store) -> RepoResult<QueryReport> {
    {
        let mut organizations = store.organizations()?;
        for (name, location) in ORGANIZATIONS {
            report(
                organizations.insert_organization(name, location),
                "Organization added successfully",
            );
        }
    }

    {
        let mut members = store.members()?;
        for (name, age, organization_id) in MEMBERS {
            report(
                members.insert_member(name, age, Some(organization_id)),
                "Member added successfully",
            );
        }
        report(
            members.update_member(2, &MemberPatch::default().name("R").age(26)),
            "Member updated successfully",
        );
    }

    report(
        store.organizations()?.delete_organization(1),
        "Organization deleted successfully",
    );

    store.query_report()
}

fn report<T, E: Display>(result: Result<T, E>, success: &str) {
    match result {
        Ok(_) => println!("{success}"),
        Err(err) => println!("Error: {err}"),
    }
}

fn print_query_report(query_report: &QueryReport) {
    for pair in &query_report.joined {
        println!(
            "Organization: {}, Member: {}",
            pair.organization.name, pair.member.name
        );
    }
    for member in &query_report.ordered_by_age {
        println!("Ordered Member: {}, Age: {}", member.name, member.age);
    }
    for group in &query_report.age_groups {
        println!("Age: {}, Count: {}", group.age, group.count);
    }
}
