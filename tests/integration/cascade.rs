use std::sync::Arc;
use std::time::Duration;

use zbx_query::core::Level;
use zbx_query::models::{CandidateEntry, Target};
use zbx_query::resolver::{FetchRequest, MetricLists};
use zbx_query::templating::StaticTemplateStore;
use zbx_query::test_utils::{init_test_logging, resolver_for, sample_catalog, sample_store};

fn names(entries: &[CandidateEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[tokio::test]
async fn wildcard_group_with_two_variables() {
    init_test_logging(None);
    let resolver = resolver_for(Arc::new(sample_catalog()));
    let store = StaticTemplateStore::new()
        .with_variable("env", ["prod"])
        .with_variable("region", ["eu"]);
    let mut target = Target::new("A");
    target.group = Some(CandidateEntry::new("*"));
    let mut lists = MetricLists::loading("Loading...");

    resolver.refresh(&mut lists, &Level::ALL, &target, &store).await;

    let groups = lists.get(Level::Group);
    assert_eq!(groups[0].name, "*");
    assert!(!groups[0].templated);
    assert_eq!(groups[1], CandidateEntry::templated("$env"));
    assert_eq!(groups[2], CandidateEntry::templated("$region"));
    assert_eq!(names(&groups[3..]), ["Linux servers", "Zabbix servers"]);

    // the wildcard group matches every host
    assert_eq!(names(&lists.get(Level::Host)[3..]), ["web01", "web02", "Zabbix server"]);
}

#[tokio::test]
async fn multi_value_variable_scopes_descendant_fetches() {
    let catalog = Arc::new(sample_catalog());
    let resolver = resolver_for(catalog.clone());
    let store = sample_store();
    let mut target = Target::new("A");
    target.group = Some(CandidateEntry::templated("$env"));
    target.host = Some(CandidateEntry::templated("$region"));
    let mut lists = MetricLists::loading("Loading...");

    resolver.refresh(&mut lists, &[Level::Application, Level::Item], &target, &store).await;

    assert_eq!(catalog.calls_for(Level::Application), vec![FetchRequest::Applications {
        hosts: Some(vec!["web01".to_string(), "web02".to_string()]),
        groups: Some(vec!["Linux servers".to_string()]),
    }]);
    assert_eq!(names(&lists.get(Level::Application)[3..]), ["CPU", "Memory"]);
    assert_eq!(names(&lists.get(Level::Item)[3..]), [
        "CPU system time (avg1)",
        "CPU user time (avg1)",
        "Available memory"
    ]);
}

#[tokio::test]
async fn item_list_has_unique_expanded_names() {
    let resolver = resolver_for(Arc::new(sample_catalog()));
    let mut lists = MetricLists::loading("Loading...");

    resolver
        .refresh(&mut lists, &[Level::Item], &Target::new("A"), &StaticTemplateStore::new())
        .await;

    let items = names(lists.get(Level::Item));
    let mut unique = items.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), items.len());
    assert!(items.contains(&"Zabbix busy poller processes, in %"));
}

#[tokio::test]
async fn late_result_from_superseded_cycle_is_discarded() {
    let catalog = Arc::new(sample_catalog());
    catalog.delay_next(Level::Host, &[Duration::from_millis(50), Duration::from_millis(5)]);
    let resolver = resolver_for(catalog);
    let store = StaticTemplateStore::new();
    let mut lists = MetricLists::loading("Loading...");

    let mut linux = Target::new("A");
    linux.group = Some(CandidateEntry::new("Linux servers"));
    let mut zabbix = Target::new("A");
    zabbix.group = Some(CandidateEntry::new("Zabbix servers"));

    let first = resolver.begin(&mut lists, Level::Host, &linux, &store);
    let first_fetch = tokio::spawn(resolver.fetch(&first));
    tokio::task::yield_now().await;

    let second = resolver.begin(&mut lists, Level::Host, &zabbix, &store);
    let second_fetch = tokio::spawn(resolver.fetch(&second));

    // B resolves first, A after it
    let second_result = second_fetch.await.unwrap();
    assert!(resolver.complete(&mut lists, second, second_result));
    let first_result = first_fetch.await.unwrap();
    assert!(!resolver.complete(&mut lists, first, first_result));

    assert_eq!(names(lists.get(Level::Host)), ["*", "Zabbix server"]);
}

#[tokio::test]
async fn failing_level_degrades_and_recovers() {
    let catalog = Arc::new(sample_catalog());
    catalog.fail_level(Level::Item);
    let resolver = resolver_for(catalog.clone());
    let store = sample_store();
    let mut lists = MetricLists::loading("Loading...");
    let target = Target::new("A");

    resolver.refresh(&mut lists, &[Level::Item], &target, &store).await;
    assert_eq!(names(lists.get(Level::Item)), ["All", "$env", "$region"]);

    catalog.recover_level(Level::Item);
    resolver.refresh(&mut lists, &[Level::Item], &target, &store).await;
    assert_eq!(lists.get(Level::Item).len(), 3 + 4);
}
