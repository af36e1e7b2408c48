use std::sync::Arc;
use std::time::Duration;

use zbx_query::core::Level;
use zbx_query::editor::QueryEditor;
use zbx_query::models::{CandidateEntry, MetricCatalogItem, Target};
use zbx_query::templating::StaticTemplateStore;
use zbx_query::test_utils::{resolver_for, sample_catalog, sample_store};
use zbx_query::validation::{RuleValidator, TemplateReferenceRule};

fn names(entries: &[CandidateEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[tokio::test]
async fn full_selection_walkthrough() {
    let catalog = Arc::new(sample_catalog());
    let store = StaticTemplateStore::new();
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(catalog.clone()));
    editor.init(&store).await;

    assert!(editor.select_host_group(Some(CandidateEntry::new("Linux servers")), &store).await);
    assert_eq!(names(editor.candidates(Level::Host)), ["*", "web01", "web02"]);

    assert!(editor.select_host(Some(CandidateEntry::new("web01")), &store).await);
    assert_eq!(names(editor.candidates(Level::Application)), ["*", "CPU", "Memory"]);

    assert!(editor.select_application(Some(CandidateEntry::new("CPU")), &store).await);
    assert_eq!(names(editor.candidates(Level::Item)), [
        "All",
        "CPU system time (avg1)",
        "CPU user time (avg1)"
    ]);

    let picked = editor.candidates(Level::Item)[2].clone();
    assert!(editor.select_item(Some(MetricCatalogItem::from(&picked))));
    assert_eq!(editor.target().alias, "CPU user time (avg1)");
    assert_eq!(
        editor.target().item.as_ref().and_then(|i| i.key.as_deref()),
        Some("system.cpu.util[,user,avg1]")
    );

    // a blur with no edits is not a change
    assert!(!editor.target_blur());
    let accepted = editor.last_accepted().unwrap();
    assert!(accepted.matches(editor.target()));
}

#[tokio::test]
async fn reselecting_same_group_does_not_signal() {
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(Arc::new(sample_catalog())));
    let store = sample_store();
    editor.init(&store).await;

    let group = Some(CandidateEntry::new("Zabbix servers"));
    assert!(editor.select_host_group(group.clone(), &store).await);
    assert!(!editor.select_host_group(group, &store).await);
}

#[tokio::test]
async fn group_change_resets_descendant_lists_before_results() {
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(Arc::new(sample_catalog())));
    let store = sample_store();
    editor.init(&store).await;
    assert!(editor.candidates(Level::Item).len() > 3);

    let change = editor.begin_select(Level::Group, Some(CandidateEntry::new("Zabbix servers")), &store);
    assert!(change.run_query);

    assert_eq!(names(editor.candidates(Level::Host)), ["*", "$env", "$region"]);
    assert_eq!(names(editor.candidates(Level::Application)), ["*", "$env", "$region"]);
    assert_eq!(names(editor.candidates(Level::Item)), ["All", "$env", "$region"]);

    for pending in change.pending {
        let result = editor.fetch(&pending).await;
        assert!(editor.complete_refresh(pending, result));
    }
    assert_eq!(names(&editor.candidates(Level::Item)[3..]), ["Zabbix busy poller processes, in %"]);
}

#[tokio::test]
async fn second_group_change_wins_over_slower_first() {
    let catalog = Arc::new(sample_catalog());
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(catalog.clone()));
    let store = sample_store();
    editor.init(&store).await;

    catalog.delay_next(Level::Host, &[Duration::from_millis(200)]);
    let first = editor.begin_select(Level::Group, Some(CandidateEntry::new("Linux servers")), &store);
    let slow: Vec<_> = first.pending.iter().map(|pending| tokio::spawn(editor.fetch(pending))).collect();

    let second = editor.begin_select(Level::Group, Some(CandidateEntry::new("Zabbix servers")), &store);
    assert!(first.run_query && second.run_query);
    for pending in second.pending {
        let result = editor.fetch(&pending).await;
        editor.complete_refresh(pending, result);
    }
    for (pending, handle) in first.pending.into_iter().zip(slow) {
        assert!(!editor.complete_refresh(pending, handle.await.unwrap()));
    }

    assert_eq!(names(editor.candidates(Level::Host)), ["*", "$env", "$region", "Zabbix server"]);
    assert_eq!(
        editor.target().group.as_ref().map(|g| g.name.as_str()),
        Some("Zabbix servers")
    );
}

#[tokio::test]
async fn unknown_variable_blocks_query_until_fixed() {
    let store = sample_store();
    let validator = RuleValidator::new().with_rule(TemplateReferenceRule::new(Level::Group, &store, "$"));
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(Arc::new(sample_catalog())))
        .with_validator(validator);
    editor.init(&store).await;

    assert!(!editor.select_host_group(Some(CandidateEntry::templated("$enb")), &store).await);
    assert_eq!(
        editor.target().errors["group"],
        "Unknown template variable '$enb' (did you mean $env?)"
    );
    assert!(editor.last_accepted().is_none());

    assert!(editor.select_host_group(Some(CandidateEntry::templated("$env")), &store).await);
    assert!(editor.target().errors.is_empty());
}

#[tokio::test]
async fn alias_edit_signals_on_blur() {
    let mut editor = QueryEditor::new(Target::new("A"), resolver_for(Arc::new(sample_catalog())));
    editor.init(&StaticTemplateStore::new()).await;
    assert!(editor.target_blur());

    editor.set_alias("cpu of web01");
    assert!(editor.target_blur());
    assert!(!editor.target_blur());
    assert_eq!(editor.into_target().alias, "cpu of web01");
}
