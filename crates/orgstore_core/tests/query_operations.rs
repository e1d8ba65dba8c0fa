use orgstore_core::{
    age_groups, members_by_age, organization_members, AgeGroup, ReferentialPolicy, RepoError,
    Store,
};

/// Organizations {TechCorp, HealthInc}; members Alice/30/TechCorp,
/// Bob/25/HealthInc, Charlie/30/TechCorp.
fn sample_store() -> Store {
    let mut store = Store::open_in_memory(ReferentialPolicy::Orphan).unwrap();
    let (tech_id, health_id) = {
        let mut orgs = store.organizations().unwrap();
        let tech = orgs.insert_organization("TechCorp", "New York").unwrap();
        let health = orgs.insert_organization("HealthInc", "San Francisco").unwrap();
        (tech.id, health.id)
    };
    {
        let mut members = store.members().unwrap();
        members.insert_member("Alice", 30, Some(tech_id)).unwrap();
        members.insert_member("Bob", 25, Some(health_id)).unwrap();
        members.insert_member("Charlie", 30, Some(tech_id)).unwrap();
    }
    store
}

#[test]
fn join_yields_one_pair_per_member_with_organization() {
    let store = sample_store();
    let pairs = organization_members(store.connection()).unwrap();

    assert_eq!(pairs.len(), 3);
    let names: Vec<_> = pairs
        .iter()
        .map(|pair| (pair.organization.name.as_str(), pair.member.name.as_str()))
        .collect();
    assert_eq!(
        names,
        [
            ("TechCorp", "Alice"),
            ("TechCorp", "Charlie"),
            ("HealthInc", "Bob"),
        ]
    );
    assert!(pairs
        .iter()
        .all(|pair| pair.member.organization_id == Some(pair.organization.id)));
}

#[test]
fn join_excludes_organizations_without_members_and_unmatched_members() {
    let mut store = sample_store();
    store
        .organizations()
        .unwrap()
        .insert_organization("FinTech", "India")
        .unwrap();
    {
        let mut members = store.members().unwrap();
        members.insert_member("Nomad", 44, None).unwrap();
        members.insert_member("Ghost", 51, Some(777)).unwrap();
    }

    let pairs = organization_members(store.connection()).unwrap();
    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|pair| pair.organization.name != "FinTech"));
}

#[test]
fn members_are_ordered_by_age_ascending() {
    let store = sample_store();
    let ordered = members_by_age(store.connection()).unwrap();

    let ages: Vec<_> = ordered.iter().map(|member| member.age).collect();
    assert_eq!(ages, [25, 30, 30]);
    assert_eq!(ordered[0].name, "Bob");

    let mut tied: Vec<_> = ordered[1..].iter().map(|m| m.name.as_str()).collect();
    tied.sort_unstable();
    assert_eq!(tied, ["Alice", "Charlie"]);
}

#[test]
fn group_by_age_keeps_only_repeated_ages() {
    let store = sample_store();
    let groups = age_groups(store.connection(), 1).unwrap();
    assert_eq!(groups, vec![AgeGroup { age: 30, count: 2 }]);

    let all = age_groups(store.connection(), 0).unwrap();
    assert_eq!(
        all,
        vec![
            AgeGroup { age: 25, count: 1 },
            AgeGroup { age: 30, count: 2 },
        ]
    );
}

#[test]
fn query_report_returns_all_three_results() {
    let store = sample_store();
    let report = store.query_report().unwrap();

    assert!(!report.is_empty());
    assert_eq!(report.joined.len(), 3);
    assert_eq!(report.ordered_by_age.len(), 3);
    assert_eq!(report.age_groups, vec![AgeGroup { age: 30, count: 2 }]);
}

#[test]
fn query_report_on_empty_store_is_empty() {
    let store = Store::open_in_memory(ReferentialPolicy::Orphan).unwrap();
    let report = store.query_report().unwrap();
    assert!(report.is_empty());
}

#[test]
fn query_report_serializes_for_external_consumers() {
    let store = sample_store();
    let report = store.query_report().unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["age_groups"][0]["age"], 30);
    assert_eq!(value["age_groups"][0]["count"], 2);
    assert_eq!(value["joined"][0]["organization"]["name"], "TechCorp");
    assert_eq!(value["ordered_by_age"][0]["name"], "Bob");
}

#[test]
fn age_groups_reject_null_age() {
    let store = sample_store();
    store
        .connection()
        .execute(
            "INSERT INTO employees (name, age, corporate_id) VALUES ('Nobody', NULL, NULL);",
            [],
        )
        .unwrap();

    match age_groups(store.connection(), 0).unwrap_err() {
        RepoError::InvalidData(message) => assert!(message.contains("employees.age"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}
